//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Both HTTP clients are built eagerly, so bad config fails at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//! use ai_llm_service::config::default_config::{config_openai_chat, config_openai_embedding};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::new(
//!     config_openai_chat()?,
//!     config_openai_embedding()?,
//!     Some(10),
//! )?);
//!
//! let txt = svc.generate("What does the premium plan cost?", None).await?;
//! let emb = svc.embed("premium plan").await?;
//! println!("{txt} / dim={}", emb.len());
//! # Ok(()) }
//! ```

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::open_ai_service::OpenAiService,
};

/// Chat + embedding profiles over the OpenAI API.
pub struct LlmServiceProfiles {
    chat: OpenAiService,
    embedding: OpenAiService,
    health: HealthService,
}

impl std::fmt::Debug for LlmServiceProfiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmServiceProfiles")
            .field("chat_model", &self.chat.config().model)
            .field("embedding_model", &self.embedding.config().model)
            .finish()
    }
}

impl LlmServiceProfiles {
    /// Creates the service and eagerly builds both HTTP clients.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client fails validation or construction.
    pub fn new(
        chat: LlmModelConfig,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            chat: OpenAiService::new(chat)?,
            embedding: OpenAiService::new(embedding)?,
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Generates text with the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        self.chat.generate(prompt, system).await
    }

    /// Computes an embedding with the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }

    /// Health snapshot for the distinct profiles.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let (chat, embedding) = self.profiles();
        if chat.endpoint == embedding.endpoint && chat.model == embedding.model {
            self.health.check_many(&[chat]).await
        } else {
            self.health.check_many(&[chat, embedding]).await
        }
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (self.chat.config(), self.embedding.config())
    }
}
