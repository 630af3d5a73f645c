//! Ingestion and retrieval configuration.

use std::path::PathBuf;

use crate::errors::RagError;

/// Configuration for index building and retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Source document (PDF or plain text).
    pub document_path: PathBuf,
    /// Index directory. If it exists, the document is not re-ingested.
    pub index_path: PathBuf,
    /// Target chunk size in whitespace-delimited words.
    pub chunk_words: usize,
    /// Words shared between consecutive chunks of one page.
    pub chunk_overlap_words: usize,
    /// Number of chunks returned per query.
    pub top_k: usize,
    /// Expected embedding size; `None` accepts whatever the provider returns.
    pub embedding_dim: Option<usize>,
    /// Concurrent embedding requests during the build.
    pub embedding_concurrency: usize,
}

impl RagConfig {
    /// Defaults used by the pricing document deployment.
    pub fn new_default(document_path: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            index_path: index_path.into(),
            chunk_words: 500,
            chunk_overlap_words: 200,
            top_k: 3,
            embedding_dim: Some(300),
            embedding_concurrency: 4,
        }
    }

    /// Builds from environment variables on top of [`RagConfig::new_default`].
    ///
    /// Vars: `PRICING_DOC_PATH`, `INDEX_PATH`, `CHUNK_WORDS`, `CHUNK_OVERLAP_WORDS`,
    /// `RAG_TOP_K`, `EMBEDDING_DIM`, `EMBEDDING_CONCURRENCY`.
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(&|k| std::env::var(k).ok())
    }

    /// Same as [`RagConfig::from_env`] but with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, RagError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::new_default(
            lookup("PRICING_DOC_PATH").unwrap_or_else(|| "finance_company_pricing.pdf".into()),
            lookup("INDEX_PATH").unwrap_or_else(|| "faiss_index_pricing".into()),
        );
        if let Some(v) = parse_var(lookup, "CHUNK_WORDS")? {
            cfg.chunk_words = v;
        }
        if let Some(v) = parse_var(lookup, "CHUNK_OVERLAP_WORDS")? {
            cfg.chunk_overlap_words = v;
        }
        if let Some(v) = parse_var(lookup, "RAG_TOP_K")? {
            cfg.top_k = v;
        }
        if let Some(v) = parse_var(lookup, "EMBEDDING_DIM")? {
            cfg.embedding_dim = Some(v);
        }
        if let Some(v) = parse_var(lookup, "EMBEDDING_CONCURRENCY")? {
            cfg.embedding_concurrency = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.chunk_words == 0 {
            return Err(RagError::Config("chunk_words must be > 0".into()));
        }
        if self.chunk_overlap_words >= self.chunk_words {
            return Err(RagError::Config(
                "chunk_overlap_words must be smaller than chunk_words".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(RagError::Config("embedding_dim must be > 0".into()));
        }
        Ok(())
    }
}

fn parse_var<F>(lookup: &F, name: &str) -> Result<Option<usize>, RagError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| RagError::Config(format!("{name} must be a non-negative integer"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_pricing_deployment() {
        let cfg = RagConfig::from_lookup(&|_| None).unwrap();
        assert_eq!(cfg.chunk_words, 500);
        assert_eq!(cfg.chunk_overlap_words, 200);
        assert_eq!(cfg.top_k, 3);
        assert_eq!(cfg.embedding_dim, Some(300));
        assert_eq!(cfg.index_path, PathBuf::from("faiss_index_pricing"));
    }

    #[test]
    fn overlap_must_leave_room_to_advance() {
        let err = RagConfig::from_lookup(&|k| match k {
            "CHUNK_WORDS" => Some("100".into()),
            "CHUNK_OVERLAP_WORDS" => Some("100".into()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, RagError::Config(_)));
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let err = RagConfig::from_lookup(&|k| (k == "RAG_TOP_K").then(|| "three".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("RAG_TOP_K"));
    }
}
