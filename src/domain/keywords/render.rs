//! Placeholder rendering for keyword and SEO patterns.
//!
//! Tokens look like `{name}`; padding inside the braces (`{ name }`) is
//! ignored. A `{name_lower}` token inserts the lower-cased value of `name`.
//! Braces around more than one word are not a token, so [`render`] drops
//! the braces and keeps the words. [`render`] resolves known tokens, strips
//! the rest and normalizes whitespace; [`substitute`] only fills what it knows.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\s*([^{}\s]*)\s*\}").unwrap());

const LOWER_SUFFIX: &str = "_lower";

/// Values available to a pattern, by placeholder name.
#[derive(Debug, Clone, Default)]
pub struct Placeholders<'a> {
    values: Vec<(&'a str, &'a str)>,
}

impl<'a> Placeholders<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a value.
    pub fn with(mut self, key: &'a str, value: &'a str) -> Self {
        self.values.retain(|(k, _)| *k != key);
        self.values.push((key, value));
        self
    }

    fn lookup(&self, token: &str) -> Option<String> {
        if let Some((_, value)) = self.values.iter().find(|(k, _)| *k == token) {
            return Some((*value).to_string());
        }
        let base = token.strip_suffix(LOWER_SUFFIX)?;
        self.values
            .iter()
            .find(|(k, _)| *k == base)
            .map(|(_, value)| value.to_lowercase())
    }
}

/// Fills known tokens and leaves unknown ones in place.
pub fn substitute(pattern: &str, values: &Placeholders<'_>) -> String {
    TOKEN
        .replace_all(pattern, |caps: &Captures<'_>| {
            values.lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Fully resolves `pattern`: known tokens are filled, unknown tokens and any
/// stray braces are removed, whitespace is collapsed and trimmed.
///
/// Never fails; rendering an already rendered string returns it unchanged.
pub fn render(pattern: &str, values: &Placeholders<'_>) -> String {
    let filled = TOKEN.replace_all(pattern, |caps: &Captures<'_>| {
        values.lookup(&caps[1]).unwrap_or_default()
    });
    let unbraced: String = filled.chars().filter(|c| *c != '{' && *c != '}').collect();
    collapse_whitespace(&unbraced)
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
