//! LLM access: the chat-completions client and the prompts sent through it.

pub mod client;
pub mod prompts;

use std::future::Future;

/// Failures from a single chat-completions call.
///
/// Transport failures (connection refused, DNS, TLS) are surfaced distinctly
/// from upstream failures (the API answered with a non-success status) so
/// callers can tell a dead network from a rejected request.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM API returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM response contained no completion choices")]
    EmptyCompletion,
}

/// Seam between the repair loop and whatever produces completions.
///
/// The production implementation is [`client::LlmClient`]; tests substitute a
/// scripted mock. Provider-specific request shapes stay behind this trait.
pub trait CodeGenerator {
    /// Send a two-message (system, user) conversation and return the first
    /// completion's text content.
    fn generate(
        &self,
        system: &str,
        user: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
