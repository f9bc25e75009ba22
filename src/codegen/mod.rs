//! Turning raw LLM output into renderable Manim source: fence stripping,
//! syntax repair, structural validation, and scene-name extraction.

pub mod clean;
pub mod parse;
pub mod repair;
pub mod scene;
pub mod validate;
