//! Flat, exact cosine-similarity index persisted as a directory.
//!
//! Layout: `<index_path>/index.json` holding the embedding model id, the
//! vector size and every `(chunk, vector)` pair in insertion order. The index
//! is read-only once built; there is no incremental insert.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::RagError;
use crate::record::{DocumentChunk, RagHit};

/// File name of the manifest inside the index directory.
pub const INDEX_FILE: &str = "index.json";
const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct IndexEntry {
    chunk: DocumentChunk,
    vector: Vec<f32>,
    /// L2 norm cached at build time.
    norm: f32,
}

/// Ordered `(chunk, vector)` pairs with exact top-k cosine lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VectorIndex {
    version: u32,
    model: String,
    dimension: usize,
    entries: Vec<IndexEntry>,
}

/// Small summary used by logs and `/health`.
#[derive(Clone, Debug, Serialize)]
pub struct IndexStats {
    pub model: String,
    pub dimension: usize,
    pub chunks: usize,
}

impl VectorIndex {
    /// Builds an index from chunks and their vectors (same order, same length).
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if lengths differ or a vector has the wrong size.
    pub fn from_parts(
        model: impl Into<String>,
        chunks: Vec<DocumentChunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self, RagError> {
        if chunks.len() != vectors.len() {
            return Err(RagError::VectorSizeMismatch {
                got: vectors.len(),
                want: chunks.len(),
            });
        }
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            if vector.len() != dimension {
                return Err(RagError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dimension,
                });
            }
            let norm = l2_norm(&vector);
            entries.push(IndexEntry {
                chunk,
                vector,
                norm,
            });
        }

        Ok(Self {
            version: FORMAT_VERSION,
            model: model.into(),
            dimension,
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            model: self.model.clone(),
            dimension: self.dimension,
            chunks: self.entries.len(),
        }
    }

    /// Chunks in insertion order.
    pub fn chunks(&self) -> impl Iterator<Item = &DocumentChunk> {
        self.entries.iter().map(|e| &e.chunk)
    }

    /// Top-`k` entries by cosine similarity, best first.
    ///
    /// Ties keep insertion order. A zero query vector scores every entry 0.
    ///
    /// # Errors
    /// [`RagError::VectorSizeMismatch`] if `query` has the wrong size.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<RagHit>, RagError> {
        if !self.entries.is_empty() && query.len() != self.dimension {
            return Err(RagError::VectorSizeMismatch {
                got: query.len(),
                want: self.dimension,
            });
        }

        let qn = l2_norm(query);
        let mut scored: Vec<(f32, usize)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (cosine(query, qn, &e.vector, e.norm), i))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(score, i)| RagHit {
                score,
                chunk: self.entries[i].chunk.clone(),
            })
            .collect())
    }

    /// Writes `index.json` under `dir`, creating parent directories as needed.
    ///
    /// The file is written to a temporary name first and renamed into place.
    pub fn persist(&self, dir: &Path) -> Result<PathBuf, RagError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(INDEX_FILE);
        let tmp = dir.join(format!("{INDEX_FILE}.tmp"));

        let bytes = serde_json::to_vec(self)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;

        info!(path = ?path, chunks = self.len(), dim = self.dimension, "index persisted");
        Ok(path)
    }

    /// Loads a persisted index from `dir`.
    ///
    /// # Errors
    /// [`RagError::CorruptIndex`] if the manifest is missing, unreadable or inconsistent.
    pub fn load(dir: &Path) -> Result<Self, RagError> {
        let path = dir.join(INDEX_FILE);
        let corrupt = |reason: String| RagError::CorruptIndex {
            path: dir.to_path_buf(),
            reason,
        };

        let bytes = fs::read(&path).map_err(|e| corrupt(format!("{INDEX_FILE}: {e}")))?;
        let index: VectorIndex =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(format!("{INDEX_FILE}: {e}")))?;

        if index.version != FORMAT_VERSION {
            return Err(corrupt(format!(
                "unsupported format version {}",
                index.version
            )));
        }
        if let Some(bad) = index
            .entries
            .iter()
            .find(|e| e.vector.len() != index.dimension)
        {
            return Err(corrupt(format!(
                "chunk {} has {} dims, manifest says {}",
                bad.chunk.id,
                bad.vector.len(),
                index.dimension
            )));
        }

        debug!(path = ?path, chunks = index.len(), "index loaded");
        Ok(index)
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine(a: &[f32], a_norm: f32, b: &[f32], b_norm: f32) -> f32 {
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (a_norm * b_norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &str) -> DocumentChunk {
        DocumentChunk {
            id: id.into(),
            text: format!("text of {id}"),
            source: "doc.txt".into(),
            page: 0,
            chunk: 0,
            word_start: 0,
        }
    }

    fn sample() -> VectorIndex {
        VectorIndex::from_parts(
            "test-model",
            vec![chunk("a"), chunk("b"), chunk("c"), chunk("d")],
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.7, 0.7, 0.0],
                vec![0.0, 1.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn search_ranks_by_cosine_and_keeps_insertion_order_on_ties() {
        let idx = sample();
        let hits = idx.search(&[0.0, 2.0, 0.0], 3).unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c"]);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn search_rejects_wrong_dimension() {
        let err = sample().search(&[1.0, 0.0], 3).unwrap_err();
        assert!(matches!(err, RagError::VectorSizeMismatch { got: 2, want: 3 }));
    }

    #[test]
    fn k_larger_than_index_returns_everything() {
        assert_eq!(sample().search(&[1.0, 0.0, 0.0], 10).unwrap().len(), 4);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("idx");
        sample().persist(&target).unwrap();
        assert!(target.join(INDEX_FILE).exists());
        assert!(!target.join("index.json.tmp").exists());

        let loaded = VectorIndex::load(&target).unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.model(), "test-model");
        let hits = loaded.search(&[1.0, 0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].chunk.id, "a");
    }

    #[test]
    fn missing_or_garbled_manifest_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            VectorIndex::load(dir.path()).unwrap_err(),
            RagError::CorruptIndex { .. }
        ));

        std::fs::write(dir.path().join(INDEX_FILE), b"{not json").unwrap();
        assert!(matches!(
            VectorIndex::load(dir.path()).unwrap_err(),
            RagError::CorruptIndex { .. }
        ));
    }
}
