//! Builtin stateless filters
//!
//! These are plain `&str -> String` functions. [`super::FilterRegistry::builtin`]
//! exposes them by name so pipelines can be assembled from configuration.

use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive whitespace characters
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    tracing::debug!("Compiling whitespace collapse regex");
    Regex::new(r"\s{2,}").expect("whitespace regex is valid")
});

/// Title-case the first character and lower-case the rest
///
/// An empty string stays empty. The Latin digraphs (`Ǆ`, `Ǉ`, `Ǌ`, `Ǳ` and
/// their lowercase forms) map to their titlecase form, so `"ǆx"` becomes
/// `"ǅx"`. Any other first character is upper-cased, which may expand it
/// (for example `ß` becomes `SS`).
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(input.len());
    match digraph_titlecase(first) {
        Some(title) => out.push(title),
        None => out.extend(first.to_uppercase()),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// Titlecase form of the Latin digraph letters, which differs from uppercase
fn digraph_titlecase(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}

/// Replace every non-overlapping pair of spaces with a single space
///
/// This is a single left-to-right pass, so three spaces become two.
pub fn remove_double_spaces(input: &str) -> String {
    input.replace("  ", " ")
}

/// Collapse any run of whitespace into a single space
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE_RUN.replace_all(input, " ").into_owned()
}

pub fn trim(input: &str) -> String {
    input.trim().to_string()
}

pub fn lowercase(input: &str) -> String {
    input.to_lowercase()
}

pub fn uppercase(input: &str) -> String {
    input.to_uppercase()
}
