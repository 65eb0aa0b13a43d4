//! Orchestrates a seeding run across platforms.
//!
//! Reference data for every selected platform is written in a single
//! transaction; keyword generation then runs platform by platform with
//! one statement per batch.

use crate::app::seed_service::{SeedService, SeededPlatform};
use crate::app::summary::PlatformSummary;
use crate::domain::keywords::{generate_keywords, GenerationPlan, GenerationReport, PlatformRef};
use crate::domain::model::{Language, PhraseTemplate, Platform, Service, Stored};
use crate::ingest::dataset::SectionOrigins;
use crate::ingest::{load_platform_dataset, PlatformDataset};
use crate::storage::CountingSink;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub platforms: Vec<Platform>,
    pub workbook_dir: PathBuf,
    pub batch_size: usize,
    /// Delete the platform's keyword rows before generating.
    pub fresh: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformRun {
    pub platform: Platform,
    pub origins: SectionOrigins,
    pub warnings: Vec<String>,
    pub services: usize,
    pub templates: usize,
    pub countries: usize,
    pub seo_templates: u64,
    pub phrases: u64,
    pub expected: u64,
    pub cleared: u64,
    pub generation: GenerationReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub platforms: Vec<PlatformRun>,
}

impl PlatformRun {
    /// The summary row this run accounts for.
    pub fn summary(&self) -> PlatformSummary {
        PlatformSummary {
            slug: self.platform.slug().to_string(),
            name: self.platform.display_name().to_string(),
            services: self.services as i64,
            templates: self.templates as i64,
            seo_templates: self.seo_templates as i64,
            phrases: self.phrases as i64,
            keywords: self.generation.generated as i64,
        }
    }
}

impl RunReport {
    pub fn total_generated(&self) -> u64 {
        self.platforms.iter().map(|p| p.generation.generated).sum()
    }

    pub fn total_inserted(&self) -> u64 {
        self.platforms.iter().map(|p| p.generation.inserted).sum()
    }
}

fn load_all(options: &RunOptions) -> Vec<PlatformDataset> {
    options
        .platforms
        .iter()
        .map(|&platform| load_platform_dataset(platform, &options.workbook_dir))
        .collect()
}

fn expected_for(services: usize, templates: &[Stored<PhraseTemplate>], countries: usize) -> u64 {
    let active = templates.iter().filter(|t| t.record.active).count();
    (services * active * countries * Language::ALL.len()) as u64
}

/// Runs both phases against the database.
pub async fn run(service: &SeedService, options: &RunOptions) -> anyhow::Result<RunReport> {
    let started_at = Utc::now();
    let datasets = load_all(options);

    println!("> Seeding reference data for {} platform(s)...", datasets.len());
    let mut tx = service.pool().begin().await?;
    let mut seeded = Vec::with_capacity(datasets.len());
    for dataset in &datasets {
        let platform = dataset.platform;
        let platform_id = service.upsert_platform(&mut tx, platform).await?;
        let services = service
            .upsert_services(&mut tx, platform_id, &dataset.services)
            .await?;
        let templates = service
            .upsert_templates(&mut tx, platform_id, &dataset.templates)
            .await?;
        let seo_templates = service
            .upsert_seo_templates(&mut tx, platform, platform_id, &dataset.seo_templates)
            .await?;
        let phrases = service
            .upsert_phrases(&mut tx, platform_id, &dataset.phrases)
            .await?;
        info!(
            platform = platform.slug(),
            platform_id,
            services = services.len(),
            templates = templates.len(),
            seo_templates,
            phrases,
            "reference data upserted"
        );
        seeded.push(SeededPlatform {
            platform,
            platform_id,
            services,
            templates,
            seo_templates,
            phrases,
        });
    }
    tx.commit().await.context("reference data transaction failed to commit")?;
    println!("> Reference data committed.");

    let mut platforms = Vec::with_capacity(seeded.len());
    for (dataset, seeded) in datasets.into_iter().zip(&seeded) {
        let cleared = if options.fresh {
            let n = service.clear_keywords(seeded.platform_id).await?;
            println!("> Cleared {} keyword row(s) for {}.", n, seeded.platform);
            n
        } else {
            0
        };

        println!("> Generating keywords for {}...", seeded.platform);
        let generation = service
            .generate_keywords(seeded, &dataset.countries, options.batch_size)
            .await?;
        println!(
            "  {} generated, {} inserted in {} batch(es)",
            generation.generated, generation.inserted, generation.batches
        );

        platforms.push(PlatformRun {
            platform: seeded.platform,
            origins: dataset.origins,
            warnings: dataset.warnings,
            services: seeded.services.len(),
            templates: seeded.templates.len(),
            countries: dataset.countries.len(),
            seo_templates: seeded.seo_templates,
            phrases: seeded.phrases,
            expected: expected_for(seeded.services.len(), &seeded.templates, dataset.countries.len()),
            cleared,
            generation,
        });
    }

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        dry_run: false,
        platforms,
    })
}

/// Assigns 1-based ids by first appearance of each key; a repeated key
/// replaces the earlier record, matching what the upserts store.
fn positional<T: Clone>(records: &[T], key: impl Fn(&T) -> &str) -> Vec<Stored<T>> {
    let mut stored: Vec<Stored<T>> = Vec::with_capacity(records.len());
    for record in records {
        match stored.iter_mut().find(|s| key(&s.record) == key(record)) {
            Some(existing) => existing.record = record.clone(),
            None => {
                let id = stored.len() as i64 + 1;
                stored.push(Stored::new(id, record.clone()));
            }
        }
    }
    stored
}

// Rows the upserts would leave for these natural keys.
fn distinct<K: Ord>(keys: impl Iterator<Item = K>) -> u64 {
    keys.collect::<BTreeSet<K>>().len() as u64
}

/// Loads and generates everything without a database connection.
pub async fn dry_run(options: &RunOptions) -> anyhow::Result<RunReport> {
    let started_at = Utc::now();
    let mut platforms = Vec::with_capacity(options.platforms.len());

    for (index, dataset) in load_all(options).into_iter().enumerate() {
        let services: Vec<Stored<Service>> = positional(&dataset.services, |s| s.key.as_str());
        let templates: Vec<Stored<PhraseTemplate>> =
            positional(&dataset.templates, |t| t.key.as_str());

        let plan = GenerationPlan::new(
            PlatformRef {
                id: index as i64 + 1,
                name: dataset.platform.display_name(),
            },
            &services,
            &templates,
            &dataset.countries,
            &Language::ALL,
        );
        let expected = plan.expected_count();
        let mut sink = CountingSink::default();
        let generation = generate_keywords(&plan, options.batch_size, &mut sink).await?;
        println!(
            "> [dry-run] {}: {} keyword(s) in {} batch(es)",
            dataset.platform, generation.generated, generation.batches
        );

        platforms.push(PlatformRun {
            platform: dataset.platform,
            origins: dataset.origins,
            services: services.len(),
            templates: templates.len(),
            countries: dataset.countries.len(),
            seo_templates: distinct(dataset.seo_templates.iter().map(|t| (t.language, t.page_type.as_str()))),
            phrases: distinct(dataset.phrases.iter().map(|p| (p.language, p.key.as_str()))),
            warnings: dataset.warnings,
            expected,
            cleared: 0,
            generation,
        });
    }

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        dry_run: true,
        platforms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::summary::format_summary_table;
    use crate::ingest::workbook::write_workbook;
    use crate::ingest::{workbook_path, Origin};

    fn options(dir: &std::path::Path, platforms: Vec<Platform>) -> RunOptions {
        RunOptions {
            platforms,
            workbook_dir: dir.to_path_buf(),
            batch_size: 500,
            fresh: false,
        }
    }

    #[tokio::test]
    async fn dry_run_generates_full_product_from_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let report = dry_run(&options(dir.path(), Platform::ALL.to_vec())).await.unwrap();

        assert!(report.dry_run);
        assert_eq!(report.platforms.len(), 3);
        for run in &report.platforms {
            assert_eq!(run.origins.services, Origin::Defaults);
            assert_eq!(run.generation.generated, run.expected);
            assert_eq!(
                run.expected,
                (run.services * run.templates * run.countries * Language::ALL.len()) as u64
            );
            assert_eq!(run.warnings.len(), 4);
        }
        assert_eq!(report.total_generated(), report.total_inserted());
    }

    #[tokio::test]
    async fn dry_run_batches_follow_batch_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(dir.path(), vec![Platform::UlysseAi]);
        opts.batch_size = 100;
        let report = dry_run(&opts).await.unwrap();
        let run = &report.platforms[0];
        assert_eq!(run.generation.batches, run.expected.div_ceil(100));
    }

    #[tokio::test]
    async fn dry_run_summary_counts_seo_templates_and_phrases() {
        let dir = tempfile::tempdir().unwrap();
        let report = dry_run(&options(dir.path(), vec![Platform::SosExpat])).await.unwrap();
        let row = report.platforms[0].summary();

        assert_eq!(row.slug, "sos-expat");
        assert_eq!(row.seo_templates, 9);
        assert_eq!(row.phrases, 36);
        assert_eq!(row.keywords as u64, report.platforms[0].expected);

        let table = format_summary_table(&[row]);
        let line = table.lines().nth(2).unwrap();
        let cells: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(cells[3], "9");
        assert_eq!(cells[4], "36");
    }

    #[tokio::test]
    async fn workbook_templates_sharing_a_slug_all_generate() {
        let dir = tempfile::tempdir().unwrap();
        write_workbook(
            &workbook_path(dir.path(), "ulixai"),
            &[
                (
                    "countries",
                    &[&["code", "name"], &["FR", "France"], &["DE", "Germany"], &["fr", "France"]],
                ),
                ("services", &[&["key", "en"], &["translator", "translator"]]),
                (
                    "keywords",
                    &[
                        &["pattern"],
                        &["{service} {country}"],
                        &["{service}, {country}"],
                        &["{service} {country}?"],
                    ],
                ),
            ],
        );

        let report = dry_run(&options(dir.path(), vec![Platform::Ulixai])).await.unwrap();
        let run = &report.platforms[0];
        assert_eq!(run.origins.templates, Origin::Workbook);
        assert_eq!(run.templates, 3);
        assert_eq!(run.countries, 2);
        assert_eq!(run.expected, 3 * 2 * Language::ALL.len() as u64);
        assert_eq!(run.generation.generated, run.expected);
    }

    #[test]
    fn positional_ids_dedupe_by_key() {
        let records = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let stored = positional(&records, |s| s.as_str());
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].id, 1);
        assert_eq!(stored[1].id, 2);
    }

    #[test]
    fn expected_count_skips_inactive_templates() {
        let active = PhraseTemplate {
            key: "a".into(),
            pattern: "{service}".into(),
            intent: Default::default(),
            priority: 1,
            active: true,
        };
        let inactive = PhraseTemplate {
            active: false,
            key: "b".into(),
            ..active.clone()
        };
        let templates = vec![Stored::new(1, active), Stored::new(2, inactive)];
        assert_eq!(expected_for(2, &templates, 3), 2 * 3 * 9);
    }
}
