//! Placeholder substitution for template text.
//!
//! A placeholder is any run of text enclosed by two consecutive `@`
//! sentinels. There is no escaping and no nesting: the scan simply pairs
//! sentinels from left to right, and a lone `@` is left alone.

use crate::constants::SENTINEL;
use crate::table::Row;
use indexmap::IndexMap;
use log::debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let sentinel = regex::escape(&SENTINEL.to_string());
        // The pattern is built from a constant and always compiles.
        Regex::new(&format!("{sentinel}[^{sentinel}]*{sentinel}")).expect("valid placeholder pattern")
    })
}

/// Finds the distinct placeholders in `text`.
///
/// Returns a map from each token as written (sentinels included) to its
/// lookup key (sentinels stripped, upper-cased), in order of first
/// appearance.
pub fn placeholders(text: &str) -> IndexMap<String, String> {
    placeholder_regex()
        .find_iter(text)
        .map(|m| {
            let token = m.as_str();
            let key = token.trim_matches(SENTINEL).to_uppercase();
            (token.to_string(), key)
        })
        .collect()
}

/// Replaces every placeholder whose key exists in `replacements`.
///
/// The text is scanned once, so inserted values are never scanned again.
/// Tokens without a matching key stay in the text unchanged; an empty value
/// is a valid replacement.
pub fn substitute(text: &str, replacements: &Row) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            let key = token.trim_matches(SENTINEL).to_uppercase();
            match replacements.get(&key) {
                Some(value) => value.clone(),
                None => {
                    debug!("No value for placeholder {token}");
                    token.to_string()
                }
            }
        })
        .into_owned()
}
