//! Typed error for the contextor crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The caller sent something we cannot answer (e.g. a blank question).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Errors from the underlying rag-store crate.
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// Chat-completion failures from the shared LLM service.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Upstream failure reported by a non-OpenAI chat backend.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The bot configuration file is missing or malformed.
    #[error("bot config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Coarse classification used by the HTTP layer to pick a status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidInput,
    Upstream,
    Internal,
}

impl ContextorError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput(_) => ErrorClass::InvalidInput,
            Self::Llm(_) | Self::Upstream(_) | Self::Rag(rag_store::RagError::Embedding(_)) => {
                ErrorClass::Upstream
            }
            Self::Rag(_) | Self::Config { .. } => ErrorClass::Internal,
        }
    }
}
