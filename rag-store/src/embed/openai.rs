//! Embedding provider backed by the shared OpenAI service.

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;

use crate::{EmbeddingsProvider, RagError};

/// Embeds text through [`LlmServiceProfiles::embed`].
#[derive(Clone)]
pub struct OpenAiEmbedder {
    svc: Arc<LlmServiceProfiles>,
    model: String,
    dim: Option<usize>,
}

impl OpenAiEmbedder {
    /// `dim`, when set, is enforced on every returned vector.
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        let model = svc.profiles().1.model.clone();
        Self { svc, model, dim }
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>
    {
        Box::pin(async move {
            let v = self.svc.embed(text).await?;
            if let Some(want) = self.dim {
                if v.len() != want {
                    return Err(RagError::VectorSizeMismatch { got: v.len(), want });
                }
            }
            Ok(v)
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
