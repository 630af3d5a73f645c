use std::sync::Arc;

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_openai_chat, config_openai_embedding},
};
use contextor::{BotConfig, ConversationalChain, SalesAssistant};
use rag_store::{EmbeddingsProvider, OpenAiEmbedder, RagConfig, RagStore};
use tracing::info;

/// Timeout for `/health` model probes.
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<SalesAssistant>,
    /// `None` when running against stub backends (no health probes).
    pub llm: Option<Arc<LlmServiceProfiles>>,
}

impl AppState {
    pub fn new(assistant: Arc<SalesAssistant>, llm: Option<Arc<LlmServiceProfiles>>) -> Self {
        Self { assistant, llm }
    }

    /// Builds everything from environment variables.
    ///
    /// Opens (or builds, on first start) the document index, so this can take
    /// a while. Any error here is fatal: the server must not start.
    pub async fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let llm = Arc::new(LlmServiceProfiles::new(
            config_openai_chat()?,
            config_openai_embedding()?,
            Some(HEALTH_TIMEOUT_SECS),
        )?);

        let rag_cfg = RagConfig::from_env()?;
        let embedder: Arc<dyn EmbeddingsProvider> =
            Arc::new(OpenAiEmbedder::new(llm.clone(), rag_cfg.embedding_dim));
        let store = Arc::new(RagStore::open(rag_cfg, embedder.as_ref()).await?);
        info!(
            origin = ?store.origin(),
            chunks = store.stats().chunks,
            "document index ready"
        );

        let bot_cfg = BotConfig::from_env()?;
        let chain = ConversationalChain::new(store, embedder, llm.clone());
        let assistant = Arc::new(SalesAssistant::new(bot_cfg, chain));

        Ok(Self::new(assistant, Some(llm)))
    }
}
