//! Strip markdown code fences from LLM output.
//!
//! One strategy only: extract the FIRST well-formed fenced block (an optional
//! language tag may follow the opening fence). Input without fences passes
//! through trimmed. Line-filtering of fence markers is deliberately not used;
//! the two strategies disagree on malformed input and mixing them helps
//! nobody.

use regex::Regex;
use std::sync::OnceLock;

static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| {
        // (?s) so the block body may span lines; lazy body so the first
        // closing fence wins.
        Regex::new(r"(?s)```[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)```").expect("fence regex is valid")
    })
}

/// Return the contents of the first fenced code block in `raw`, trimmed; or
/// the whole input trimmed when no block is present. Never fails.
pub fn clean(raw: &str) -> String {
    match fence_re().captures(raw) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .trim()
            .to_string(),
        None => raw.trim().to_string(),
    }
}
