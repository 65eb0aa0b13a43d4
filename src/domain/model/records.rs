//! Reference records loaded from workbooks or built-in defaults, and the
//! generated keyword rows.

use super::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Localized text keyed by language. Blank entries are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<Language, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(code, text)` pairs, ignoring unsupported codes.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = Self::new();
        for (code, text) in pairs {
            if let Some(language) = Language::from_code(code) {
                map.insert(language, text);
            }
        }
        map
    }

    pub fn insert(&mut self, language: Language, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.0.remove(&language);
        } else {
            self.0.insert(language, text.trim().to_string());
        }
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.0.get(&language).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A sellable offering of a platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub key: String,
    pub category: Option<String>,
    pub translations: Translations,
}

/// Search intent carried from a template onto every keyword it produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    #[default]
    Informational,
    Transactional,
    Commercial,
    Navigational,
}

impl IntentType {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentType::Informational => "informational",
            IntentType::Transactional => "transactional",
            IntentType::Commercial => "commercial",
            IntentType::Navigational => "navigational",
        }
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "informational" | "info" => Ok(IntentType::Informational),
            "transactional" => Ok(IntentType::Transactional),
            "commercial" => Ok(IntentType::Commercial),
            "navigational" => Ok(IntentType::Navigational),
            other => Err(format!("unknown intent type '{}'", other)),
        }
    }
}

/// A keyword pattern such as `"{service} {country}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseTemplate {
    pub key: String,
    pub pattern: String,
    pub intent: IntentType,
    pub priority: i32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    /// Canonical name, used when no translation is available.
    pub name: String,
    pub translations: Translations,
}

/// Title and meta description patterns for one page type in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoTemplate {
    pub language: Language,
    pub page_type: String,
    pub title: String,
    pub meta_description: String,
}

/// A short localized snippet used when composing natural-sounding copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalPhrase {
    pub language: Language,
    pub key: String,
    pub text: String,
}

/// A record paired with the primary key it received in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: i64,
    pub record: T,
}

impl<T> Stored<T> {
    pub fn new(id: i64, record: T) -> Self {
        Self { id, record }
    }
}

/// Initial competition score before enrichment.
pub const INITIAL_COMPETITION: f64 = 0.50;

/// One rendered keyword for a (service, template, country, language) tuple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCombination {
    pub platform_id: i64,
    pub service_id: i64,
    pub template_id: i64,
    pub country_code: String,
    pub language: Language,
    pub keyword: String,
    pub keyword_normalized: String,
    pub intent: IntentType,
    pub search_volume: i32,
    pub competition: f64,
    pub priority: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_translations_are_absent() {
        let t = Translations::from_pairs([("fr", "  "), ("en", " lawyer "), ("xx", "ignored")]);
        assert_eq!(t.get(Language::Fr), None);
        assert_eq!(t.get(Language::En), Some("lawyer"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn translations_serialize_as_code_map() {
        let t = Translations::from_pairs([("de", "Anwalt"), ("fr", "avocat")]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json, serde_json::json!({"fr": "avocat", "de": "Anwalt"}));
    }

    #[test]
    fn intent_parsing_defaults_blank_to_informational() {
        assert_eq!("".parse::<IntentType>(), Ok(IntentType::Informational));
        assert_eq!("Transactional".parse::<IntentType>(), Ok(IntentType::Transactional));
        assert!("buy-now".parse::<IntentType>().is_err());
    }
}
