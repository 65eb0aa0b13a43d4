//! Header-driven parsing of workbook sheets into reference records.
//!
//! A sheet is a grid of trimmed cell strings whose first row names the
//! columns. Columns are found by (case-insensitive) header name, so their
//! order in the workbook does not matter.

use crate::domain::keywords::slugify;
use crate::domain::model::{Country, IntentType, Language, PhraseTemplate, SeoTemplate, Service, Translations};
use crate::ingest::SheetError;
use std::collections::{HashMap, HashSet};

pub const COUNTRIES_SHEET: &str = "countries";
pub const SERVICES_SHEET: &str = "services";
pub const KEYWORDS_SHEET: &str = "keywords";
pub const SEO_TEMPLATES_SHEET: &str = "seo_templates";

pub type SheetRows = Vec<Vec<String>>;

/// Records parsed from one sheet, a note for every skipped row, and remarks
/// about rows kept in an adjusted form.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub skipped: Vec<String>,
    pub notes: Vec<String>,
}

impl<T> Parsed<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            notes: Vec::new(),
        }
    }
}

struct Header {
    sheet: &'static str,
    columns: HashMap<String, usize>,
}

impl Header {
    fn read(sheet: &'static str, rows: &[Vec<String>]) -> Result<Self, SheetError> {
        let first = rows.first().ok_or_else(|| SheetError::Empty(sheet.to_string()))?;
        let columns = first
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();
        Ok(Self { sheet, columns })
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    fn required(&self, name: &'static str) -> Result<usize, SheetError> {
        self.optional(name).ok_or_else(|| SheetError::MissingColumn {
            sheet: self.sheet.to_string(),
            column: name,
        })
    }

    fn languages(&self) -> Vec<(Language, usize)> {
        let mut found: Vec<(Language, usize)> = Language::ALL
            .into_iter()
            .filter_map(|language| self.optional(language.code()).map(|idx| (language, idx)))
            .collect();
        found.sort_by_key(|(_, idx)| *idx);
        found
    }
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn opt_cell(row: &[String], idx: Option<usize>) -> &str {
    idx.map(|i| cell(row, i)).unwrap_or("")
}

fn row_translations(row: &[String], languages: &[(Language, usize)]) -> Translations {
    let mut translations = Translations::new();
    for (language, idx) in languages {
        translations.insert(*language, cell(row, *idx));
    }
    translations
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Data rows with their 1-based spreadsheet line numbers.
fn data_rows(rows: &[Vec<String>]) -> impl Iterator<Item = (usize, &Vec<String>)> {
    rows.iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| !is_blank(row))
        .map(|(idx, row)| (idx + 1, row))
}

fn finish<T>(sheet: &str, parsed: Parsed<T>) -> Result<Parsed<T>, SheetError> {
    if parsed.records.is_empty() {
        return Err(SheetError::Empty(sheet.to_string()));
    }
    Ok(parsed)
}

/// Columns: `code`, `name`, and one column per language code.
pub fn parse_countries(rows: &[Vec<String>]) -> Result<Parsed<Country>, SheetError> {
    let header = Header::read(COUNTRIES_SHEET, rows)?;
    let code_col = header.required("code")?;
    let name_col = header.required("name")?;
    let languages = header.languages();

    let mut parsed: Parsed<Country> = Parsed::new();
    for (line, row) in data_rows(rows) {
        let code = cell(row, code_col);
        let name = cell(row, name_col);
        if code.is_empty() || name.is_empty() {
            parsed.skipped.push(format!("{} row {}: missing code or name", COUNTRIES_SHEET, line));
            continue;
        }
        let country = Country {
            code: code.to_uppercase(),
            name: name.to_string(),
            translations: row_translations(row, &languages),
        };
        // one row per code, the last definition wins
        match parsed.records.iter_mut().find(|c| c.code == country.code) {
            Some(existing) => {
                parsed.skipped.push(format!(
                    "{} row {}: duplicate code '{}' replaces an earlier row",
                    COUNTRIES_SHEET, line, country.code
                ));
                *existing = country;
            }
            None => parsed.records.push(country),
        }
    }
    finish(COUNTRIES_SHEET, parsed)
}

/// Columns: `key`, optional `category`, and one column per language code.
pub fn parse_services(rows: &[Vec<String>]) -> Result<Parsed<Service>, SheetError> {
    let header = Header::read(SERVICES_SHEET, rows)?;
    let key_col = header.required("key")?;
    let category_col = header.optional("category");
    let languages = header.languages();

    let mut parsed = Parsed::new();
    for (line, row) in data_rows(rows) {
        let key = cell(row, key_col);
        if key.is_empty() {
            parsed.skipped.push(format!("{} row {}: missing key", SERVICES_SHEET, line));
            continue;
        }
        let translations = row_translations(row, &languages);
        if translations.is_empty() {
            parsed.notes.push(format!(
                "{} row {}: '{}' has no translations; the key is used as text",
                SERVICES_SHEET, line, key
            ));
        }
        let category = opt_cell(row, category_col);
        parsed.records.push(Service {
            key: key.to_string(),
            category: (!category.is_empty()).then(|| category.to_string()),
            translations,
        });
    }
    finish(SERVICES_SHEET, parsed)
}

fn parse_active(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "y" | "oui" => Some(true),
        "0" | "false" | "no" | "n" | "non" => Some(false),
        _ => None,
    }
}

// Slug of the pattern, suffixed `-2`, `-3`, ... while the key is taken by an
// earlier row or by an explicit key anywhere in the sheet. Different patterns
// can share a slug once punctuation is dropped.
fn derived_key(pattern: &str, earlier: &[PhraseTemplate], explicit: &HashSet<String>) -> String {
    let base = slugify(pattern);
    let taken = |key: &str| explicit.contains(key) || earlier.iter().any(|t| t.key == key);
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let key = format!("{}-{}", base, n);
        if !taken(&key) {
            return key;
        }
        n += 1;
    }
}

/// Columns: `pattern`, optional `key`, `intent`, `priority`, `active`.
pub fn parse_templates(rows: &[Vec<String>]) -> Result<Parsed<PhraseTemplate>, SheetError> {
    let header = Header::read(KEYWORDS_SHEET, rows)?;
    let pattern_col = header.required("pattern")?;
    let key_col = header.optional("key");
    let intent_col = header.optional("intent");
    let priority_col = header.optional("priority");
    let active_col = header.optional("active");
    let explicit_keys: HashSet<String> = data_rows(rows)
        .map(|(_, row)| opt_cell(row, key_col).to_string())
        .filter(|key| !key.is_empty())
        .collect();

    let mut parsed = Parsed::new();
    for (line, row) in data_rows(rows) {
        let pattern = cell(row, pattern_col);
        if pattern.is_empty() {
            parsed.skipped.push(format!("{} row {}: missing pattern", KEYWORDS_SHEET, line));
            continue;
        }
        let intent = match opt_cell(row, intent_col).parse::<IntentType>() {
            Ok(intent) => intent,
            Err(e) => {
                parsed.skipped.push(format!("{} row {}: {}", KEYWORDS_SHEET, line, e));
                continue;
            }
        };
        let priority = match opt_cell(row, priority_col) {
            "" => 1,
            raw => match raw.parse::<i32>() {
                Ok(p) => p,
                Err(_) => {
                    parsed.skipped.push(format!("{} row {}: invalid priority '{}'", KEYWORDS_SHEET, line, raw));
                    continue;
                }
            },
        };
        let Some(active) = parse_active(opt_cell(row, active_col)) else {
            parsed.skipped.push(format!("{} row {}: invalid active flag", KEYWORDS_SHEET, line));
            continue;
        };
        let key = match opt_cell(row, key_col) {
            "" => {
                let key = derived_key(pattern, &parsed.records, &explicit_keys);
                if key != slugify(pattern) {
                    parsed.notes.push(format!(
                        "{} row {}: pattern '{}' keyed '{}' to stay distinct",
                        KEYWORDS_SHEET, line, pattern, key
                    ));
                }
                key
            }
            explicit => explicit.to_string(),
        };
        parsed.records.push(PhraseTemplate {
            key,
            pattern: pattern.to_string(),
            intent,
            priority,
            active,
        });
    }
    finish(KEYWORDS_SHEET, parsed)
}

/// Columns: `language`, `page_type`, `title`, optional `meta_description`.
pub fn parse_seo_templates(rows: &[Vec<String>]) -> Result<Parsed<SeoTemplate>, SheetError> {
    let header = Header::read(SEO_TEMPLATES_SHEET, rows)?;
    let language_col = header.required("language")?;
    let page_type_col = header.required("page_type")?;
    let title_col = header.required("title")?;
    let meta_col = header.optional("meta_description");

    let mut parsed = Parsed::new();
    for (line, row) in data_rows(rows) {
        let Some(language) = Language::from_code(cell(row, language_col)) else {
            parsed.skipped.push(format!(
                "{} row {}: unsupported language '{}'",
                SEO_TEMPLATES_SHEET,
                line,
                cell(row, language_col)
            ));
            continue;
        };
        let page_type = cell(row, page_type_col);
        let title = cell(row, title_col);
        if page_type.is_empty() || title.is_empty() {
            parsed.skipped.push(format!("{} row {}: missing page_type or title", SEO_TEMPLATES_SHEET, line));
            continue;
        }
        parsed.records.push(SeoTemplate {
            language,
            page_type: page_type.to_string(),
            title: title.to_string(),
            meta_description: opt_cell(row, meta_col).to_string(),
        });
    }
    finish(SEO_TEMPLATES_SHEET, parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> SheetRows {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn countries_use_header_positions() {
        let rows = grid(&[
            &["fr", "Code", "Name", "notes", "de"],
            &["Thaïlande", "th", "Thailand", "", "Thailand"],
            &["", "", "", "", ""],
            &["Espagne", "", "Spain", "", ""],
        ]);
        let parsed = parse_countries(&rows).unwrap();
        assert_eq!(parsed.records.len(), 1);
        let th = &parsed.records[0];
        assert_eq!(th.code, "TH");
        assert_eq!(th.translations.get(Language::Fr), Some("Thaïlande"));
        assert_eq!(th.translations.get(Language::En), None);
        assert_eq!(parsed.skipped, vec!["countries row 4: missing code or name".to_string()]);
    }

    #[test]
    fn services_require_key_column() {
        let rows = grid(&[&["name", "fr"], &["plumber", "plombier"]]);
        let err = parse_services(&rows).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn { column: "key", .. }));
    }

    #[test]
    fn services_keep_optional_category() {
        let rows = grid(&[
            &["key", "category", "fr", "en"],
            &["plumber", "", "plombier", ""],
            &["lawyer", "legal", "avocat", "lawyer"],
            &["ghost", "", "", ""],
        ]);
        let parsed = parse_services(&rows).unwrap();
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.records[0].category, None);
        assert_eq!(parsed.records[1].category.as_deref(), Some("legal"));
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn untranslated_service_is_kept_with_a_note() {
        let rows = grid(&[&["key", "fr"], &["notary", ""]]);
        let parsed = parse_services(&rows).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].translations.is_empty());
        assert_eq!(
            parsed.notes,
            vec!["services row 2: 'notary' has no translations; the key is used as text".to_string()]
        );
    }

    #[test]
    fn repeated_country_code_keeps_last_row() {
        let rows = grid(&[
            &["code", "name"],
            &["FR", "France"],
            &["es", "Spain"],
            &["fr", "France bis"],
        ]);
        let parsed = parse_countries(&rows).unwrap();
        let codes: Vec<&str> = parsed.records.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["FR", "ES"]);
        assert_eq!(parsed.records[0].name, "France bis");
        assert_eq!(
            parsed.skipped,
            vec!["countries row 4: duplicate code 'FR' replaces an earlier row".to_string()]
        );
    }

    #[test]
    fn patterns_sharing_a_slug_get_distinct_keys() {
        let rows = grid(&[
            &["pattern", "key"],
            &["{service} {country}", ""],
            &["{service}, {country}", ""],
            &["{service} {country}?", ""],
            &["{service} near me", "service-country-3"],
        ]);
        let parsed = parse_templates(&rows).unwrap();
        let keys: Vec<&str> = parsed.records.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["service-country", "service-country-2", "service-country-4", "service-country-3"]
        );
        assert_eq!(parsed.notes.len(), 2);
    }

    #[test]
    fn templates_default_key_priority_and_active() {
        let rows = grid(&[
            &["pattern", "intent", "priority", "active"],
            &["{service} {country}", "transactional", "3", ""],
            &["{service} urgent", "", "", "no"],
            &["{service} cheap", "impulse", "1", "yes"],
            &["{service} best", "commercial", "high", "yes"],
        ]);
        let parsed = parse_templates(&rows).unwrap();
        assert_eq!(parsed.records.len(), 2);
        let first = &parsed.records[0];
        assert_eq!(first.key, "service-country");
        assert_eq!(first.intent, IntentType::Transactional);
        assert_eq!(first.priority, 3);
        assert!(first.active);
        let second = &parsed.records[1];
        assert_eq!(second.intent, IntentType::Informational);
        assert_eq!(second.priority, 1);
        assert!(!second.active);
        assert_eq!(parsed.skipped.len(), 2);
    }

    #[test]
    fn seo_templates_reject_unknown_languages() {
        let rows = grid(&[
            &["language", "page_type", "title", "meta_description"],
            &["fr", "service_country", "{service} {country} | {platform}", "Trouvez..."],
            &["it", "service_country", "{service}", ""],
        ]);
        let parsed = parse_seo_templates(&rows).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].language, Language::Fr);
        assert!(parsed.skipped[0].contains("unsupported language 'it'"));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let rows = grid(&[&["code", "name"]]);
        assert!(matches!(parse_countries(&rows), Err(SheetError::Empty(_))));
        assert!(matches!(parse_countries(&[]), Err(SheetError::Empty(_))));
    }
}
