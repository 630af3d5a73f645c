//! Chat backend seam used by the conversational chain.

use std::{future::Future, pin::Pin};

use ai_llm_service::LlmServiceProfiles;

use crate::error::ContextorError;

/// Non-streaming chat completion.
///
/// The production implementation is [`LlmServiceProfiles`]; tests plug in
/// stubs that echo or count calls.
pub trait ChatModel: Send + Sync {
    /// Sends a `(system, user)` prompt pair and returns the assistant's text.
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>>;
}

impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.generate(user, Some(system)).await?) })
    }
}
