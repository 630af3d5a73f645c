//! Session-aware question answering over the pricing document.
//!
//! Public API: [`SalesAssistant::handle`]. A query first bumps its session's
//! question counter, then either hits the instant FAQ table (no retrieval, no
//! memory) or goes through [`ConversationalChain`]: embed the question,
//! retrieve top-K chunks from `rag-store`, build a prompt with the session's
//! chat history, call the chat model and remember the exchange. The Nth
//! question of a session (N = `lead_nudge_threshold`) gets a lead nudge.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use contextor::{BotConfig, ConversationalChain, Query, SalesAssistant};
//! # async fn run(chain: ConversationalChain) -> Result<(), contextor::ContextorError> {
//! let assistant = SalesAssistant::new(BotConfig::from_env()?, chain);
//! let reply = assistant
//!     .handle(Query::new("What is the processing fee?", Some("abc".into())))
//!     .await?;
//! println!("{} (faq: {})", reply.answer, reply.is_instant_faq);
//! # Ok(()) }
//! ```

mod api_types;
mod assistant;
mod cfg;
mod chain;
mod error;
mod faq;
mod llm;
mod memory;
pub mod prompt;
mod session;

#[cfg(test)]
mod test_support;

pub use api_types::{BotReply, DEFAULT_SESSION_ID, Query};
pub use assistant::SalesAssistant;
pub use cfg::{BotConfig, FaqEntry, Nudges};
pub use chain::{ChainAnswer, ConversationalChain, EMPTY_ANSWER_FALLBACK};
pub use error::{ContextorError, ErrorClass};
pub use faq::{FaqMatch, FaqMatcher};
pub use llm::ChatModel;
pub use memory::{ConversationMemory, Role, Turn};
pub use session::{Session, SessionState, SessionStore};
