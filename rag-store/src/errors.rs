//! Unified error types for the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The source document could not be read or parsed.
    #[error("cannot read document {path:?}: {reason}")]
    Document { path: PathBuf, reason: String },

    /// The source document produced no text at all.
    #[error("document {0:?} contains no extractable text")]
    EmptyDocument(PathBuf),

    /// An index directory exists but its contents are unusable.
    #[error("corrupt index at {path:?}: {reason}")]
    CorruptIndex { path: PathBuf, reason: String },

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Upstream embedding service failure.
    #[error("embedding failed: {0}")]
    Embedding(#[from] ai_llm_service::AiLlmError),
}
