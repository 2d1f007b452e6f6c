//! Text normalization for extracted paper text.
//!
//! PDF extraction leaves ligature debris, bullet glyphs and ragged
//! line breaks behind. `clean` strips everything outside a small
//! allow-list of characters that matter in scientific prose (word
//! characters, punctuation, brackets, arithmetic and comparison
//! operators, Greek letters and a few calculus symbols) and then
//! flattens whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s\-.,;:()\[\]{}=+*/^<>≥≤≈∼°αβγδεζηθικλμνξοπρστυφχψω∫∂∇]")
        .expect("cleaner allow-list regex is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Normalize raw extracted text.
///
/// Disallowed characters are deleted first, then every whitespace
/// run (newlines included) becomes a single space and the result is
/// trimmed. Deleting first means a removed glyph between two spaces
/// never leaves a double space behind.
pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let filtered = DISALLOWED.replace_all(raw, "");
    let collapsed = WHITESPACE_RUN.replace_all(&filtered, " ");
    collapsed.trim().to_string()
}
