//! Embedding executor with concurrency and dimension checks.

use crate::{embed::EmbeddingsProvider, errors::RagError, record::DocumentChunk};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Embeds every chunk, returning vectors in chunk order.
///
/// # Arguments
/// - `chunks`: chunks to embed.
/// - `provider`: embedding backend.
/// - `expected_dim`: if `Some`, enforces this vector size (error on mismatch).
///   Otherwise all vectors must share the size of the first one.
/// - `concurrency`: maximum number of in-flight embedding requests.
/// - `pb`: progress bar advanced once per embedded chunk.
///
/// # Errors
/// Returns [`RagError::VectorSizeMismatch`] on size mismatch, or the
/// provider's error on the first failed request.
pub async fn embed_chunks(
    chunks: &[DocumentChunk],
    provider: &dyn EmbeddingsProvider,
    expected_dim: Option<usize>,
    concurrency: usize,
    pb: &ProgressBar,
) -> Result<Vec<Vec<f32>>, RagError> {
    info!(
        "embed_pool::embed_chunks: total={} concurrency={}",
        chunks.len(),
        concurrency
    );

    let vectors = stream::iter(chunks.iter())
        .map(|chunk| async move {
            let v = provider.embed(&chunk.text).await;
            pb.inc(1);
            v
        })
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<_>, RagError>>()?;

    let want = expected_dim.or_else(|| vectors.first().map(Vec::len));
    if let Some(want) = want {
        if let Some(bad) = vectors.iter().find(|v| v.len() != want) {
            return Err(RagError::VectorSizeMismatch {
                got: bad.len(),
                want,
            });
        }
    }

    debug!("embed_pool::embed_chunks: {} vectors ready", vectors.len());
    Ok(vectors)
}
