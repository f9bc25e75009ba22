//! Animagen library crate
//!
//! Exposes the generation pipeline so integration tests and external tooling
//! can exercise it without going through server startup.

pub mod codegen;
pub mod config;
pub mod llm;
pub mod render;
pub mod server;
pub mod util;
