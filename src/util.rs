/// Cap a string at `max_chars` characters for log and error messages.
/// Counts chars, not bytes, so multi-byte UTF-8 never gets split.
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    if s.chars().count() <= max_chars {
        return s;
    }
    let cut = s
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..cut]
}

/// Keep the last `max_chars` characters of command output (Unicode-safe).
pub fn tail_chars(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    s.chars().skip(count - max_chars).collect()
}
