//! Index lifecycle: load the persisted index, or build it once from the document.
//!
//! Pipeline on first start: load pages → split into word windows → embed
//! every chunk → persist under `index_path`. The directory's existence is the
//! only freshness signal; a changed document is not re-ingested.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::chunker::split_pages;
use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_chunks;
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::loader::load_pages;

/// How [`build_or_load`] obtained the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexOrigin {
    /// Read from an existing index directory.
    Loaded,
    /// Built from the source document and persisted.
    Built,
}

/// Returns the index at `cfg.index_path`, building it first if the directory is absent.
///
/// # Errors
/// - [`RagError::CorruptIndex`] if the directory exists but cannot be read
/// - document, embedding and I/O errors while building
pub async fn build_or_load(
    cfg: &RagConfig,
    provider: &dyn EmbeddingsProvider,
) -> Result<(VectorIndex, IndexOrigin), RagError> {
    if cfg.index_path.exists() {
        let index = VectorIndex::load(&cfg.index_path)?;
        if index.model() != provider.model_id() {
            warn!(
                index_model = index.model(),
                provider_model = provider.model_id(),
                "index was built with a different embedding model"
            );
        }
        if let Some(want) = cfg.embedding_dim {
            if !index.is_empty() && index.dimension() != want {
                return Err(RagError::CorruptIndex {
                    path: cfg.index_path.clone(),
                    reason: format!(
                        "index has {} dims, configured {want}",
                        index.dimension()
                    ),
                });
            }
        }
        info!(path = ?cfg.index_path, chunks = index.len(), "using existing index");
        return Ok((index, IndexOrigin::Loaded));
    }

    let index = build_index(cfg, provider).await?;
    index.persist(&cfg.index_path)?;
    Ok((index, IndexOrigin::Built))
}

/// Builds an index in memory without touching `index_path`.
pub async fn build_index(
    cfg: &RagConfig,
    provider: &dyn EmbeddingsProvider,
) -> Result<VectorIndex, RagError> {
    info!(document = ?cfg.document_path, "building index");

    let pages = load_pages(&cfg.document_path)?;
    let source = document_name(&cfg.document_path);
    let chunks = split_pages(&pages, &source, cfg.chunk_words, cfg.chunk_overlap_words);
    debug!(pages = pages.len(), chunks = chunks.len(), "document chunked");

    let pb = ProgressBar::new(chunks.len() as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }

    let vectors = embed_chunks(
        &chunks,
        provider,
        cfg.embedding_dim,
        cfg.embedding_concurrency,
        &pb,
    )
    .await?;
    pb.finish_with_message("embedding complete");

    let index = VectorIndex::from_parts(provider.model_id(), chunks, vectors)?;
    info!(chunks = index.len(), dim = index.dimension(), "index built");
    Ok(index)
}

/// File name of the document, used as the chunk `source`.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
