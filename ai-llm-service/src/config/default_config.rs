//! Default OpenAI model configs loaded from environment variables.
//!
//! Two roles are resolved here:
//!
//! - **Chat**      → answers questions over retrieved context (low temperature)
//! - **Embedding** → turns document chunks and queries into vectors
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`          = bearer token (mandatory)
//! - `OPENAI_BASE_URL`         = API base (default `https://api.openai.com`)
//! - `OPENAI_CHAT_MODEL`       = chat model (default `gpt-3.5-turbo`)
//! - `OPENAI_EMBEDDING_MODEL`  = embedding model (default `text-embedding-3-large`)
//! - `EMBEDDING_DIM`           = requested embedding size (default `300`)
//! - `LLM_TEMPERATURE`         = chat temperature (default `0.2`)
//! - `LLM_MAX_TOKENS`          = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS`        = request timeout (default `60`)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        AiLlmError, must_var, process_env, validate_http_endpoint, validate_range_f32,
        var_opt_parse, var_or,
    },
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-large";
pub const DEFAULT_EMBEDDING_DIM: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolves the API base and key shared by both roles.
fn openai_base<F>(lookup: &F) -> Result<(String, String), AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(lookup, "OPENAI_API_KEY")?;
    let endpoint = var_or(lookup, "OPENAI_BASE_URL", DEFAULT_BASE_URL);
    validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;
    Ok((endpoint, api_key))
}

/// Chat profile from the process environment.
///
/// # Errors
/// Missing `OPENAI_API_KEY`, malformed numbers, or out-of-range temperature.
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    config_openai_chat_from(&process_env)
}

/// Chat profile from an arbitrary variable lookup.
pub fn config_openai_chat_from<F>(lookup: &F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let (endpoint, api_key) = openai_base(lookup)?;
    let temperature = var_opt_parse::<_, f32>(lookup, "LLM_TEMPERATURE", "expected f32")?
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", temperature, 0.0, 2.0)?;

    Ok(LlmModelConfig {
        model: var_or(lookup, "OPENAI_CHAT_MODEL", DEFAULT_CHAT_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: var_opt_parse(lookup, "LLM_MAX_TOKENS", "expected u32")?,
        temperature: Some(temperature),
        top_p: None,
        dimensions: None,
        timeout_secs: Some(
            var_opt_parse(lookup, "LLM_TIMEOUT_SECS", "expected u64")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    })
}

/// Embedding profile from the process environment.
///
/// # Errors
/// Missing `OPENAI_API_KEY` or malformed `EMBEDDING_DIM`.
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    config_openai_embedding_from(&process_env)
}

/// Embedding profile from an arbitrary variable lookup.
pub fn config_openai_embedding_from<F>(lookup: &F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let (endpoint, api_key) = openai_base(lookup)?;

    Ok(LlmModelConfig {
        model: var_or(lookup, "OPENAI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        dimensions: Some(
            var_opt_parse(lookup, "EMBEDDING_DIM", "expected u32")?
                .unwrap_or(DEFAULT_EMBEDDING_DIM),
        ),
        timeout_secs: Some(
            var_opt_parse(lookup, "LLM_TIMEOUT_SECS", "expected u64")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ConfigError;

    fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |k| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn chat_defaults_match_the_deployment() {
        let cfg = config_openai_chat_from(&env_with(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(cfg.model, DEFAULT_CHAT_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_BASE_URL);
        assert_eq!(cfg.temperature, Some(0.2));
        assert_eq!(cfg.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn embedding_requests_shortened_vectors() {
        let cfg = config_openai_embedding_from(&env_with(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("EMBEDDING_DIM", "256"),
        ]))
        .unwrap();
        assert_eq!(cfg.model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(cfg.dimensions, Some(256));
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = config_openai_chat_from(&env_with(&[])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let err = config_openai_chat_from(&env_with(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_TEMPERATURE", "5.0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::OutOfRange { .. })));
    }
}
