//! Terminal rendering of the accumulated question log.

use crate::error::Result;
use crate::pipeline::types::QuestionAnswer;
use owo_colors::OwoColorize;

/// Print the final question log in human-readable form.
pub fn render_results(entries: &[QuestionAnswer]) {
    if entries.is_empty() {
        println!("No questions were captured.");
        return;
    }

    println!(
        "Captured {} question{}:",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" }
    );
    println!();

    for entry in entries {
        println!("👉 {}", entry.question.bold());
        if entry.answer.is_empty() {
            println!("💬 {}", "(no answer)".dimmed());
        } else {
            println!("💬 {}", entry.answer);
        }
        println!("   {}", entry.source.dimmed());
        println!();
    }
}

/// Render the question log as a pretty-printed JSON array.
pub fn render_json(entries: &[QuestionAnswer]) -> Result<String> {
    serde_json::to_string_pretty(entries)
        .map_err(|e| crate::error::OverhearError::Other(e.to_string()))
}
