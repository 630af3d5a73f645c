//! Conversational retrieval: retrieve → prompt with history → generate → remember.

use std::sync::Arc;
use std::time::Instant;

use rag_store::{EmbeddingsProvider, RagQuery, RagStore, clamp_snippet};
use tracing::{debug, info, trace};

use crate::error::ContextorError;
use crate::llm::ChatModel;
use crate::memory::ConversationMemory;
use crate::prompt;

/// Shown when the model returns an empty completion.
pub const EMPTY_ANSWER_FALLBACK: &str = "Sorry, I could not generate an answer.";

/// Answer plus the source names of the context it was grounded on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Retrieval-augmented answering over one [`RagStore`].
pub struct ConversationalChain {
    store: Arc<RagStore>,
    embedder: Arc<dyn EmbeddingsProvider>,
    chat: Arc<dyn ChatModel>,
}

impl ConversationalChain {
    pub fn new(
        store: Arc<RagStore>,
        embedder: Arc<dyn EmbeddingsProvider>,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        Self {
            store,
            embedder,
            chat,
        }
    }

    pub fn store(&self) -> &RagStore {
        &self.store
    }

    /// Answers `question` using the session `memory`, then records the exchange.
    ///
    /// Memory is only touched after a successful completion.
    ///
    /// # Errors
    /// Embedding, retrieval or chat failures; no retry.
    pub async fn answer(
        &self,
        question: &str,
        memory: &mut ConversationMemory,
    ) -> Result<ChainAnswer, ContextorError> {
        let t0 = Instant::now();

        let hits = self
            .store
            .rag_context(
                RagQuery {
                    text: question,
                    top_k: self.store.top_k(),
                },
                self.embedder.as_ref(),
            )
            .await?;
        debug!(hits = hits.len(), "context retrieved");
        for h in &hits {
            trace!(
                id = %h.chunk.id,
                score = h.score,
                preview = %clamp_snippet(&h.chunk.text, 80),
                "hit"
            );
        }

        let user_prompt = prompt::build_user_prompt(&memory.render(), &hits, question);
        let raw = self.chat.complete(prompt::DEFAULT_SYSTEM, &user_prompt).await?;

        let answer = match raw.trim() {
            "" => EMPTY_ANSWER_FALLBACK.to_string(),
            s => s.to_string(),
        };
        memory.record(question, &answer);

        let mut sources: Vec<String> = Vec::new();
        for h in &hits {
            if !sources.contains(&h.chunk.source) {
                sources.push(h.chunk.source.clone());
            }
        }
        if sources.is_empty() {
            sources.push(self.store.document_name());
        }

        info!(
            latency_ms = t0.elapsed().as_millis() as u64,
            sources = sources.len(),
            "chain answered"
        );
        Ok(ChainAnswer { answer, sources })
    }
}
