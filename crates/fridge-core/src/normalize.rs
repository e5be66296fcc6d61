//! Text canonicalization applied to corpus and query strings alike.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trim, lower-case, and strip diacritics ("  Café" -> "cafe").
///
/// Applied identically on both sides of every comparison so matching
/// stays symmetric. Idempotent; the empty string is valid input.
pub fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Naive singular form: "tomatoes" -> "tomato", "huevos" -> "huevo".
///
/// Trailing "ss" is left alone so words like "couscous" survive. Only
/// used for the cleaner's dedup key, never on corpus text.
pub fn singularize(word: &str) -> String {
    if word.ends_with("oes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Canonical key under which detections are deduplicated and checked
/// against the discard list.
pub fn ingredient_key(name: &str) -> String {
    singularize(&normalize(name))
}
