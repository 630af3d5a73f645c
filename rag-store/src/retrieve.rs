//! Retrieval: embed the query text and take the nearest chunks.

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::record::{RagHit, RagQuery};

use tracing::trace;

/// Embeds the query text and returns up to `query.top_k` hits, best first.
///
/// # Errors
/// Returns embedding/provider errors or [`RagError::VectorSizeMismatch`].
pub async fn rag_context(
    index: &VectorIndex,
    query: RagQuery<'_>,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<RagHit>, RagError> {
    trace!("retrieve::rag_context top_k={}", query.top_k);

    if index.is_empty() || query.top_k == 0 {
        return Ok(Vec::new());
    }

    let qv = provider.embed(query.text).await?;
    let hits = index.search(&qv, query.top_k)?;

    trace!("retrieve::rag_context hits={}", hits.len());
    Ok(hits)
}
