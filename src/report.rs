//! Rendering a finished [`AnalysisResult`] for the terminal.

use std::fmt::Write;

use crate::analysis::{AnalysisResult, Definition};
use crate::consts::DEFINITION_NOT_FOUND;

/// Multi-line human-readable report.
pub fn text(result: &AnalysisResult) -> String {
    let definition = match &result.definition {
        Definition::Text(text) => text.as_str(),
        Definition::Unavailable { .. } => DEFINITION_NOT_FOUND,
    };

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "----RESULT----");
    let _ = writeln!(out, "Your word is {}", result.word);
    let _ = writeln!(out, "Definition: {}", definition);
    let _ = writeln!(out, "Is Palindrome: {}", result.is_palindrome);
    let _ = writeln!(out, "Duplicate Character: {}", list(&result.duplicates));
    let _ = writeln!(out, "Word Permutation: {}", list(&result.permutations));
    out
}

/// Pretty-printed JSON.
pub fn json(result: &AnalysisResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn list(items: &[String]) -> String {
    format!("[{}]", items.join(" "))
}
