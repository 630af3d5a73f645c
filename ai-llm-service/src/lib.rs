//! OpenAI-backed LLM service shared by the retrieval and chat layers.
//!
//! - [`config`]: model configs resolved from environment variables.
//! - [`services::open_ai_service`]: chat completions + embeddings client.
//! - [`service_profiles::LlmServiceProfiles`]: `chat` and `embedding` profiles behind one handle.
//! - [`health_service`]: best-effort upstream probes for `/health`.
//! - [`telemetry`]: library-scoped log layer.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{AiLlmError, ConfigError};
pub use service_profiles::LlmServiceProfiles;
