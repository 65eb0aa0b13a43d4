//! Assembles a platform's reference data from its workbook, falling back to
//! the built-in defaults section by section.

use crate::domain::model::{Country, NaturalPhrase, PhraseTemplate, Platform, SeoTemplate, Service};
use crate::ingest::defaults;
use crate::ingest::sheets::{
    self, Parsed, COUNTRIES_SHEET, KEYWORDS_SHEET, SERVICES_SHEET, SEO_TEMPLATES_SHEET,
};
use crate::ingest::{workbook_path, SheetError, Workbook};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// Where a section's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Workbook,
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionOrigins {
    pub countries: Origin,
    pub services: Origin,
    pub templates: Origin,
    pub seo_templates: Origin,
}

/// Everything seeded for one platform.
#[derive(Debug, Clone)]
pub struct PlatformDataset {
    pub platform: Platform,
    pub countries: Vec<Country>,
    pub services: Vec<Service>,
    pub templates: Vec<PhraseTemplate>,
    pub seo_templates: Vec<SeoTemplate>,
    pub phrases: Vec<NaturalPhrase>,
    pub origins: SectionOrigins,
    /// Recoverable problems met while loading (missing sheets, skipped rows).
    pub warnings: Vec<String>,
}

impl PlatformDataset {
    /// The built-in dataset, without touching the filesystem.
    pub fn from_defaults(platform: Platform) -> Self {
        Self {
            platform,
            countries: defaults::default_countries(),
            services: defaults::default_services(platform),
            templates: defaults::default_templates(),
            seo_templates: defaults::default_seo_templates(),
            phrases: defaults::default_phrases(),
            origins: SectionOrigins {
                countries: Origin::Defaults,
                services: Origin::Defaults,
                templates: Origin::Defaults,
                seo_templates: Origin::Defaults,
            },
            warnings: Vec::new(),
        }
    }
}

type SheetParser<T> = fn(&[Vec<String>]) -> Result<Parsed<T>, SheetError>;

struct Loader {
    platform: Platform,
    workbook: Option<Workbook>,
    workbook_problem: Option<String>,
    warnings: Vec<String>,
}

impl Loader {
    fn warn(&mut self, message: String) {
        warn!(platform = self.platform.slug(), "{}", message);
        self.warnings.push(message);
    }

    fn section<T>(
        &mut self,
        sheet: &'static str,
        parse: SheetParser<T>,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> (Vec<T>, Origin) {
        let outcome = match self.workbook.as_mut() {
            Some(workbook) => workbook.rows(sheet).and_then(|rows| parse(&rows)).map_err(|e| e.to_string()),
            None => Err(self
                .workbook_problem
                .clone()
                .unwrap_or_else(|| "no workbook".to_string())),
        };

        match outcome {
            Ok(parsed) => {
                for note in parsed.skipped {
                    self.warn(format!("{}: skipped {}", self.platform.slug(), note));
                }
                for note in parsed.notes {
                    self.warn(format!("{}: {}", self.platform.slug(), note));
                }
                info!(
                    platform = self.platform.slug(),
                    sheet,
                    records = parsed.records.len(),
                    "sheet loaded"
                );
                (parsed.records, Origin::Workbook)
            }
            Err(problem) => {
                self.warn(format!(
                    "{}: {}: {}; using built-in defaults",
                    self.platform.slug(),
                    sheet,
                    problem
                ));
                (fallback(), Origin::Defaults)
            }
        }
    }
}

/// Loads `<workbook_dir>/<slug>.xlsx`. Never fails: any unusable part is
/// replaced by the built-in data and reported in `warnings`.
pub fn load_platform_dataset(platform: Platform, workbook_dir: &Path) -> PlatformDataset {
    let path = workbook_path(workbook_dir, platform.slug());
    let (workbook, workbook_problem) = match Workbook::open(&path) {
        Ok(workbook) => {
            info!(platform = platform.slug(), path = %workbook.path().display(), "workbook opened");
            (Some(workbook), None)
        }
        Err(e) => (None, Some(e.to_string())),
    };

    let mut loader = Loader {
        platform,
        workbook,
        workbook_problem,
        warnings: Vec::new(),
    };

    let (countries, countries_origin) =
        loader.section(COUNTRIES_SHEET, sheets::parse_countries, defaults::default_countries);
    let (services, services_origin) = loader.section(SERVICES_SHEET, sheets::parse_services, || {
        defaults::default_services(platform)
    });
    let (templates, templates_origin) =
        loader.section(KEYWORDS_SHEET, sheets::parse_templates, defaults::default_templates);
    let (seo_templates, seo_origin) = loader.section(
        SEO_TEMPLATES_SHEET,
        sheets::parse_seo_templates,
        defaults::default_seo_templates,
    );

    PlatformDataset {
        platform,
        countries,
        services,
        templates,
        seo_templates,
        phrases: defaults::default_phrases(),
        origins: SectionOrigins {
            countries: countries_origin,
            services: services_origin,
            templates: templates_origin,
            seo_templates: seo_origin,
        },
        warnings: loader.warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Language;
    use crate::ingest::workbook::write_workbook;

    #[test]
    fn missing_workbook_falls_back_per_section() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = load_platform_dataset(Platform::Ulixai, dir.path());

        let defaults = PlatformDataset::from_defaults(Platform::Ulixai);
        assert_eq!(dataset.services, defaults.services);
        assert_eq!(dataset.templates, defaults.templates);
        assert_eq!(dataset.countries, defaults.countries);
        assert_eq!(dataset.origins, defaults.origins);
        assert_eq!(dataset.warnings.len(), 4);
        assert!(dataset.warnings[0].starts_with("ulixai: countries: workbook"));
        assert!(dataset.warnings.iter().all(|w| w.ends_with("using built-in defaults")));
    }

    #[test]
    fn unreadable_workbook_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sos-expat.xlsx"), b"corrupt").unwrap();
        let dataset = load_platform_dataset(Platform::SosExpat, dir.path());
        assert_eq!(dataset.origins.services, Origin::Defaults);
        assert!(dataset.warnings[0].contains("failed to open workbook"));
        assert!(!dataset.phrases.is_empty());
    }

    #[test]
    fn workbook_sections_load_and_missing_sheet_falls_back_alone() {
        let dir = tempfile::tempdir().unwrap();
        write_workbook(
            &workbook_path(dir.path(), "ulixai"),
            &[
                (
                    "Countries",
                    &[
                        &["code", "name", "fr"],
                        &["fr", "France", "France"],
                        &["JP", "Japan", "Japon"],
                        &["FR", "France", "Hexagone"],
                    ],
                ),
                (
                    "SERVICES",
                    &[
                        &["key", "category", "fr", "en"],
                        &["translator", "language", "traducteur", "translator"],
                        &["notary", "", "", ""],
                    ],
                ),
                (
                    "keywords",
                    &[
                        &["pattern", "intent", "priority"],
                        &["{service} {country}", "transactional", "3"],
                        &["{service}, {country}", "", ""],
                    ],
                ),
            ],
        );

        let dataset = load_platform_dataset(Platform::Ulixai, dir.path());

        assert_eq!(
            dataset.origins,
            SectionOrigins {
                countries: Origin::Workbook,
                services: Origin::Workbook,
                templates: Origin::Workbook,
                seo_templates: Origin::Defaults,
            }
        );
        let codes: Vec<&str> = dataset.countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["FR", "JP"]);
        assert_eq!(dataset.countries[0].translations.get(Language::Fr), Some("Hexagone"));
        assert_eq!(dataset.services.len(), 2);
        let keys: Vec<&str> = dataset.templates.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["service-country", "service-country-2"]);
        assert_eq!(dataset.seo_templates, defaults::default_seo_templates());

        let fallbacks: Vec<&String> = dataset
            .warnings
            .iter()
            .filter(|w| w.ends_with("using built-in defaults"))
            .collect();
        assert_eq!(fallbacks.len(), 1);
        assert!(fallbacks[0].starts_with("ulixai: seo_templates: sheet 'seo_templates' is missing"));
        assert!(dataset.warnings.iter().any(|w| w.contains("duplicate code 'FR'")));
        assert!(dataset.warnings.iter().any(|w| w.contains("'notary' has no translations")));
    }
}
