//! In-crate stubs for the embedding and chat seams.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rag_store::{
    DocumentChunk, EmbeddingsProvider, HashingEmbedder, RagConfig, RagError, RagStore, VectorIndex,
};

use crate::error::ContextorError;
use crate::llm::ChatModel;

pub const DIM: usize = 64;

/// Keyword-bag embedder that counts calls.
#[derive(Default)]
pub struct CountingEmbedder {
    pub calls: AtomicUsize,
}

impl EmbeddingsProvider for CountingEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(HashingEmbedder::new(DIM).vectorize(text)) })
    }

    fn model_id(&self) -> &str {
        "hashing-bow"
    }
}

/// Chat stub: answers "echo: <question>" and keeps every user prompt.
#[derive(Default)]
pub struct EchoChat {
    pub prompts: Mutex<Vec<String>>,
    pub delay: Option<Duration>,
    pub fail: bool,
    pub blank: bool,
}

impl EchoChat {
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl ChatModel for EchoChat {
    fn complete<'a>(
        &'a self,
        _system: &'a str,
        user: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(user.to_string());
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            if self.fail {
                return Err(ContextorError::Upstream("chat backend unavailable".into()));
            }
            if self.blank {
                return Ok("   ".into());
            }
            let question = user
                .rsplit("Current Question:\n")
                .next()
                .unwrap_or_default()
                .trim();
            Ok(format!("echo: {question}"))
        })
    }
}

/// Three-chunk pricing store built in memory.
pub fn pricing_store() -> Arc<RagStore> {
    let texts = [
        "Personal loan interest rate starts at 10.5 percent per annum",
        "Home loan tenure up to 30 years with flexible repayment",
        "Gold loan valuation is done at the branch on the same day",
    ];
    let embedder = HashingEmbedder::new(DIM);
    let chunks: Vec<DocumentChunk> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| DocumentChunk {
            id: format!("pricing.pdf#p{i}c{i}"),
            text: t.to_string(),
            source: "pricing.pdf".into(),
            page: i as u32,
            chunk: i as u32,
            word_start: 0,
        })
        .collect();
    let vectors = texts.iter().map(|t| embedder.vectorize(t)).collect();
    let index = VectorIndex::from_parts("hashing-bow", chunks, vectors).unwrap();

    let mut cfg = RagConfig::new_default("pricing.pdf", "unused-index");
    cfg.embedding_dim = Some(DIM);
    Arc::new(RagStore::from_index(cfg, index))
}
