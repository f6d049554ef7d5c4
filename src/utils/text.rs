// src/utils/text.rs
//! Text normalisation applied before any heading comparison or pattern test.

use once_cell::sync::Lazy;
use regex::Regex;

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ ]{2,}").expect("Failed to compile MULTI_SPACE_RE")
});

static DASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-\u{2013}]").expect("Failed to compile DASH_RE")
});

/// Replaces non-breaking spaces and newlines with spaces, collapses runs of
/// spaces and trims the result.
pub fn clean_extra_whitespace(text: &str) -> String {
    let spaced = text.replace(['\u{a0}', '\n'], " ");
    MULTI_SPACE_RE.replace_all(&spaced, " ").trim().to_string()
}

/// Replaces hyphens and en dashes with spaces.
pub fn clean_dashes(text: &str) -> String {
    DASH_RE.replace_all(text, " ").trim().to_string()
}

/// Strips trailing `.`, `,`, `:` and `;` after trimming whitespace.
pub fn clean_trailing_punctuation(text: &str) -> String {
    text.trim()
        .trim_end_matches(['.', ',', ':', ';'])
        .to_string()
}

/// The cleaner used for every comparison against filing text.
///
/// Order matters: lowercase, trailing punctuation, dashes, whitespace.
pub fn clean_sec_text(text: &str, lowercase: bool) -> String {
    let cleaned = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    let cleaned = clean_trailing_punctuation(&cleaned);
    let cleaned = clean_dashes(&cleaned);
    let cleaned = clean_extra_whitespace(&cleaned);
    cleaned.trim().to_string()
}

/// True for non-empty text made only of numeric characters (page numbers).
pub fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_numeric)
}
