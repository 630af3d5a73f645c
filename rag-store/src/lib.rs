//! High-level RAG facade over one source document.
//!
//! This crate provides a small API to:
//! - Build (once) and persist a cosine index over word-window chunks of a PDF or text file
//! - Retrieve top-K context chunks for a textual query
//!
//! The design is flat (no deep nesting) and splits responsibilities into focused modules.

mod chunker;
mod config;
mod embed;
mod embed_pool;
mod errors;
mod index;
mod ingest;
mod loader;
mod record;
mod retrieve;

pub use chunker::split_pages;
pub use config::RagConfig;
pub use embed::hashing::HashingEmbedder;
pub use embed::openai::OpenAiEmbedder;
pub use embed::EmbeddingsProvider;
pub use errors::RagError;
pub use index::{INDEX_FILE, IndexStats, VectorIndex};
pub use ingest::IndexOrigin;
pub use loader::{load_pages, split_text_pages};
pub use record::{DocumentChunk, DocumentPage, RagHit, RagQuery, clamp_snippet};

use tracing::{debug, trace};

/// Read-only store: configuration plus the loaded index.
///
/// This is the single entry point recommended for application code.
#[derive(Debug)]
pub struct RagStore {
    cfg: RagConfig,
    index: VectorIndex,
    origin: IndexOrigin,
}

impl RagStore {
    /// Opens the index at `cfg.index_path`, building it from the document if absent.
    ///
    /// # Errors
    /// Returns `RagError::CorruptIndex` for an unreadable index directory, or
    /// document/embedding/I/O errors during a first build.
    pub async fn open(
        cfg: RagConfig,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        debug!("RagStore::open index={:?}", cfg.index_path);
        let (index, origin) = ingest::build_or_load(&cfg, provider).await?;
        Ok(Self { cfg, index, origin })
    }

    /// Wraps an already built index (no disk access).
    pub fn from_index(cfg: RagConfig, index: VectorIndex) -> Self {
        Self {
            cfg,
            index,
            origin: IndexOrigin::Loaded,
        }
    }

    /// Builds RAG context for a textual query using the provided embedding provider.
    ///
    /// # Errors
    /// Returns embedding errors or a vector size mismatch.
    pub async fn rag_context(
        &self,
        query: RagQuery<'_>,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<RagHit>, RagError> {
        trace!("RagStore::rag_context top_k={}", query.top_k);
        retrieve::rag_context(&self.index, query, provider).await
    }

    /// Configured number of chunks per query.
    pub fn top_k(&self) -> usize {
        self.cfg.top_k
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    pub fn origin(&self) -> IndexOrigin {
        self.origin
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// File name of the source document.
    pub fn document_name(&self) -> String {
        ingest::document_name(&self.cfg.document_path)
    }
}
