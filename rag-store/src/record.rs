//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// One page of a loaded source document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPage {
    /// 0-based page number.
    pub page: u32,
    pub text: String,
}

/// Bounded slice of the source document; the unit that is embedded and retrieved.
///
/// Produced once at index-build time, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Stable id: `<source>#p<page>c<ordinal>`.
    pub id: String,
    pub text: String,
    /// File name of the source document.
    pub source: String,
    /// 0-based page the chunk was cut from.
    pub page: u32,
    /// Ordinal of the chunk within the whole document.
    pub chunk: u32,
    /// Index of the first word of the chunk within its page.
    pub word_start: u32,
}

/// Query parameters for RAG retrieval.
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: usize,
}

/// A single retrieval hit.
#[derive(Clone, Debug)]
pub struct RagHit {
    /// Cosine similarity in `[-1, 1]`.
    pub score: f32,
    pub chunk: DocumentChunk,
}

/// Clamps a chunk body for previews: at most `max_chars`, cut on a char boundary.
pub fn clamp_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
