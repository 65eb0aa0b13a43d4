//! Ordered-fallback lookup of localized text.

use crate::domain::model::{Country, Language, Service, Translations};

/// Returns the first non-empty translation among `language` and then
/// [`Language::DEFAULT_CHAIN`].
pub fn resolve(translations: &Translations, language: Language) -> Option<&str> {
    std::iter::once(language)
        .chain(Language::DEFAULT_CHAIN)
        .find_map(|candidate| translations.get(candidate))
}

/// Localized display text of a service; the key when no translation exists.
pub fn service_text(service: &Service, language: Language) -> &str {
    resolve(&service.translations, language).unwrap_or(service.key.as_str())
}

/// Localized country name; the canonical name when the language is missing.
pub fn country_name(country: &Country, language: Language) -> &str {
    country
        .translations
        .get(language)
        .unwrap_or(country.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plumber() -> Service {
        Service {
            key: "plumber".into(),
            category: None,
            translations: Translations::from_pairs([("fr", "plombier"), ("de", "Klempner")]),
        }
    }

    #[test]
    fn prefers_requested_language() {
        assert_eq!(service_text(&plumber(), Language::De), "Klempner");
    }

    #[test]
    fn missing_language_falls_back_through_default_chain() {
        // no "es" and no "en": the chain ends on "fr"
        assert_eq!(service_text(&plumber(), Language::Es), "plombier");

        let mut with_en = plumber();
        with_en.translations.insert(Language::En, "plumber");
        assert_eq!(service_text(&with_en, Language::Es), "plumber");
    }

    #[test]
    fn country_falls_back_to_canonical_name() {
        let country = Country {
            code: "TH".into(),
            name: "Thailand".into(),
            translations: Translations::from_pairs([("fr", "Thaïlande")]),
        };
        assert_eq!(country_name(&country, Language::Fr), "Thaïlande");
        assert_eq!(country_name(&country, Language::Ru), "Thailand");
    }
}
