//! Cleanup of raw question strings returned by the extraction service.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a whisper-style timestamp bracket at the start of a question:
/// `[HH:MM:SS.mmm --> HH:MM:SS.mmm]` or `[HH:MM:SS.mmm]`, plus trailing space.
static TIMESTAMP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\[\d{2}:\d{2}:\d{2}\.\d{3}( --> \d{2}:\d{2}:\d{2}\.\d{3})?\]\s*")
        .expect("timestamp prefix pattern is valid")
});

/// Normalize one extracted question: strip the timestamp-bracket prefix,
/// collapse embedded newlines to spaces, and trim surrounding whitespace.
pub fn clean_question(raw: &str) -> String {
    TIMESTAMP_PREFIX
        .replace(raw, "")
        .replace('\n', " ")
        .trim()
        .to_string()
}
