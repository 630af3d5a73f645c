//! Request handler: counter → instant FAQ → conversational retrieval → lead nudge.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api_types::{BotReply, Query};
use crate::cfg::BotConfig;
use crate::chain::ConversationalChain;
use crate::error::ContextorError;
use crate::faq::FaqMatcher;
use crate::session::SessionStore;

/// Per-process assistant shared by all requests.
pub struct SalesAssistant {
    cfg: Arc<BotConfig>,
    faq: FaqMatcher,
    sessions: SessionStore,
    chain: ConversationalChain,
}

impl SalesAssistant {
    pub fn new(cfg: BotConfig, chain: ConversationalChain) -> Self {
        let faq = FaqMatcher::new(cfg.faqs.clone());
        let sessions = SessionStore::new(cfg.memory_window);
        Self {
            cfg: Arc::new(cfg),
            faq,
            sessions,
            chain,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.cfg
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn chain(&self) -> &ConversationalChain {
        &self.chain
    }

    /// Answers one query.
    ///
    /// The session's question counter is incremented first and is not rolled
    /// back if answering fails. FAQ hits bypass retrieval and are not recorded
    /// in conversation memory. The lead nudge is attached on the retrieval
    /// path only, when the counter equals `lead_nudge_threshold`.
    ///
    /// # Errors
    /// - [`ContextorError::InvalidInput`] for a blank question
    /// - embedding/chat failures from the retrieval path
    pub async fn handle(&self, query: Query) -> Result<BotReply, ContextorError> {
        let question = query.text.trim();
        if question.is_empty() {
            return Err(ContextorError::InvalidInput(
                "user_query must not be empty".into(),
            ));
        }

        let session = self.sessions.get_or_create(&query.session_id);
        let mut state = session.lock().await;
        state.questions += 1;
        let n = state.questions;
        debug!(session_id = %session.id(), question_no = n, "handling query");

        if let Some(hit) = self.faq.find(question) {
            info!(session_id = %session.id(), category = hit.category, "instant faq");
            let sources = if hit.source.is_empty() {
                Vec::new()
            } else {
                vec![hit.source.to_string()]
            };
            return Ok(BotReply {
                answer: hit.answer.to_string(),
                sources,
                is_instant_faq: true,
                nudge: self.cfg.nudges.for_category(hit.category).map(str::to_string),
            });
        }

        let answered = self.chain.answer(question, &mut state.memory).await;
        let out = match answered {
            Ok(out) => out,
            Err(e) => {
                warn!(session_id = %session.id(), question_no = n, error = %e, "answer failed");
                return Err(e);
            }
        };

        let nudge = if n == self.cfg.lead_nudge_threshold {
            self.cfg.nudges.lead().map(str::to_string)
        } else {
            None
        };

        Ok(BotReply {
            answer: out.answer,
            sources: out.sources,
            is_instant_faq: false,
            nudge,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::{DEFAULT_LEAD_NUDGE, FaqEntry};
    use crate::chain::EMPTY_ANSWER_FALLBACK;
    use crate::test_support::{CountingEmbedder, EchoChat, pricing_store};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    fn bot_config() -> BotConfig {
        let mut cfg = BotConfig::default();
        cfg.faqs = vec![
            FaqEntry {
                category: "processing_fee".into(),
                keywords: vec!["processing fee".into()],
                answer: "The processing fee is 1% of the loan amount.".into(),
                source: "Pricing Sheet".into(),
            },
            FaqEntry {
                category: "contact".into(),
                keywords: vec!["phone".into(), "contact".into()],
                answer: "Call 1800-000-000.".into(),
                source: "Office".into(),
            },
        ];
        cfg
    }

    fn assistant(
        cfg: BotConfig,
        chat: EchoChat,
    ) -> (SalesAssistant, Arc<CountingEmbedder>, Arc<EchoChat>) {
        let embedder = Arc::new(CountingEmbedder::default());
        let chat = Arc::new(chat);
        let chain = ConversationalChain::new(pricing_store(), embedder.clone(), chat.clone());
        (SalesAssistant::new(cfg, chain), embedder, chat)
    }

    fn q(text: &str, session: &str) -> Query {
        Query::new(text, Some(session.to_string()))
    }

    #[tokio::test]
    async fn faq_hit_skips_retrieval_and_generation() {
        let (a, embedder, chat) = assistant(bot_config(), EchoChat::default());

        let r = a.handle(q("What is the Processing Fee?", "s")).await.unwrap();
        assert!(r.is_instant_faq);
        assert_eq!(r.answer, "The processing fee is 1% of the loan amount.");
        assert_eq!(r.sources, vec!["Pricing Sheet"]);
        assert_eq!(r.nudge, None);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(chat.calls(), 0);

        let r = a.handle(q("what is your phone number", "s")).await.unwrap();
        assert_eq!(r.nudge.as_deref(), Some(crate::cfg::DEFAULT_CONTACT_NUDGE));
    }

    #[tokio::test]
    async fn lead_nudge_only_on_threshold_question() {
        let (a, _, _) = assistant(bot_config(), EchoChat::default());
        let mut nudges = Vec::new();
        for i in 0..5 {
            let r = a
                .handle(q(&format!("tell me about home loan {i}"), "lead"))
                .await
                .unwrap();
            assert!(!r.is_instant_faq);
            nudges.push(r.nudge);
        }
        assert_eq!(nudges[1].as_deref(), Some(DEFAULT_LEAD_NUDGE));
        assert!(nudges.iter().enumerate().all(|(i, n)| (i == 1) == n.is_some()));
    }

    #[tokio::test]
    async fn faq_questions_count_towards_the_threshold() {
        let (a, _, _) = assistant(bot_config(), EchoChat::default());
        a.handle(q("processing fee?", "mix")).await.unwrap();
        let r = a.handle(q("gold loan valuation", "mix")).await.unwrap();
        assert_eq!(r.nudge.as_deref(), Some(DEFAULT_LEAD_NUDGE));
    }

    #[tokio::test]
    async fn history_carries_across_turns() {
        let (a, _, chat) = assistant(bot_config(), EchoChat::default());
        a.handle(q("My name is Alex", "alex")).await.unwrap();
        let r = a.handle(q("What is my name?", "alex")).await.unwrap();
        assert_eq!(r.answer, "echo: What is my name?");
        let prompt = chat.last_prompt();
        assert!(prompt.contains("Alex"));
        assert!(prompt.contains("Human: My name is Alex"));

        // Other sessions do not see it.
        a.handle(q("What is my name?", "someone-else")).await.unwrap();
        assert!(!chat.last_prompt().contains("Alex"));
    }

    #[tokio::test]
    async fn faq_turns_are_not_remembered() {
        let (a, _, chat) = assistant(bot_config(), EchoChat::default());
        a.handle(q("processing fee?", "m")).await.unwrap();
        a.handle(q("interest rate for personal loan", "m")).await.unwrap();
        assert!(!chat.last_prompt().contains("processing fee"));

        let session = a.sessions().get_or_create("m");
        let st = session.lock().await;
        assert_eq!(st.questions, 2);
        assert_eq!(st.memory.exchanges(), 1);
    }

    #[tokio::test]
    async fn retrieval_reply_lists_document_sources() {
        let (a, embedder, _) = assistant(bot_config(), EchoChat::default());
        let r = a.handle(q("personal loan interest rate", "src")).await.unwrap();
        assert_eq!(r.sources, vec!["pricing.pdf"]);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_completion_uses_fallback_text() {
        let chat = EchoChat {
            blank: true,
            ..Default::default()
        };
        let (a, _, _) = assistant(bot_config(), chat);
        let r = a.handle(q("home loan tenure", "b")).await.unwrap();
        assert_eq!(r.answer, EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_touching_sessions() {
        let (a, _, _) = assistant(bot_config(), EchoChat::default());
        let err = a.handle(q("   ", "x")).await.unwrap_err();
        assert!(matches!(err, ContextorError::InvalidInput(_)));
        assert!(a.sessions().is_empty());
    }

    #[tokio::test]
    async fn failed_answer_still_counts_the_question() {
        let chat = EchoChat {
            fail: true,
            ..Default::default()
        };
        let (a, _, _) = assistant(bot_config(), chat);
        let err = a.handle(q("home loan", "f")).await.unwrap_err();
        assert_eq!(err.class(), crate::error::ErrorClass::Upstream);

        let session = a.sessions().get_or_create("f");
        let st = session.lock().await;
        assert_eq!(st.questions, 1);
        assert!(st.memory.is_empty());
    }

    #[tokio::test]
    async fn concurrent_requests_on_a_fresh_session_are_serialized() {
        let chat = EchoChat {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        };
        let (a, _, _) = assistant(bot_config(), chat);
        let (r1, r2) = tokio::join!(
            a.handle(q("home loan tenure", "race")),
            a.handle(q("gold loan valuation", "race")),
        );
        let (r1, r2) = (r1.unwrap(), r2.unwrap());

        // Counters are 1 and 2, so exactly one reply carries the lead nudge.
        assert_eq!(
            [r1.nudge.is_some(), r2.nudge.is_some()]
                .iter()
                .filter(|b| **b)
                .count(),
            1
        );
        let session = a.sessions().get_or_create("race");
        let st = session.lock().await;
        assert_eq!(st.questions, 2);
        assert_eq!(st.memory.exchanges(), 2);
    }

    #[tokio::test]
    async fn memory_window_bounds_history() {
        let mut cfg = bot_config();
        cfg.memory_window = 2;
        let (a, _, chat) = assistant(cfg, EchoChat::default());
        for word in ["alpha", "bravo", "charlie"] {
            a.handle(q(&format!("loan {word}"), "w")).await.unwrap();
        }
        a.handle(q("loan delta", "w")).await.unwrap();
        let prompt = chat.last_prompt();
        assert!(!prompt.contains("alpha"));
        assert!(prompt.contains("bravo") && prompt.contains("charlie"));
    }
}
