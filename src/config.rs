//! Runtime configuration for animagen
//!
//! All configuration is resolved once at process start (flags and environment,
//! see `main.rs`) and threaded through explicitly. Nothing in the pipeline
//! reads ambient global state.

use crate::render::RenderConfig;

/// Settings for the chat-completions client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential for the API
    pub api_key: String,
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to, e.g. "127.0.0.1:8000"
    pub bind_addr: String,
    pub llm: LlmConfig,
    pub render: RenderConfig,
}
