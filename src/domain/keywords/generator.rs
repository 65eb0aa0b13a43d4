//! Keyword combination generator.
//!
//! Produces one [`KeywordCombination`] per (service, template, country,
//! language) tuple. The product is walked lazily and written through a
//! [`KeywordSink`] in fixed-size batches, so peak memory depends on the
//! batch size only.

use crate::domain::keywords::locale::{country_name, service_text};
use crate::domain::keywords::normalize::normalize_phrase;
use crate::domain::keywords::render::{render, Placeholders};
use crate::domain::model::{
    Country, KeywordCombination, Language, PhraseTemplate, Service, Stored, INITIAL_COMPETITION,
};
use crate::storage::sink::KeywordSink;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_BATCH_SIZE: usize = 500;
/// Largest configurable batch; one statement then stays well under the
/// Postgres bind-parameter limit.
pub const MAX_BATCH_SIZE: usize = 5000;

/// The platform the keywords are generated for.
#[derive(Debug, Clone, Copy)]
pub struct PlatformRef<'a> {
    pub id: i64,
    pub name: &'a str,
}

/// Inputs of one generation run. Inactive templates are excluded up front.
pub struct GenerationPlan<'a> {
    platform: PlatformRef<'a>,
    services: &'a [Stored<Service>],
    templates: Vec<&'a Stored<PhraseTemplate>>,
    countries: &'a [Country],
    languages: &'a [Language],
}

impl<'a> GenerationPlan<'a> {
    pub fn new(
        platform: PlatformRef<'a>,
        services: &'a [Stored<Service>],
        templates: &'a [Stored<PhraseTemplate>],
        countries: &'a [Country],
        languages: &'a [Language],
    ) -> Self {
        Self {
            platform,
            services,
            templates: templates.iter().filter(|t| t.record.active).collect(),
            countries,
            languages,
        }
    }

    /// Number of combinations the plan yields.
    pub fn expected_count(&self) -> u64 {
        [
            self.services.len(),
            self.templates.len(),
            self.countries.len(),
            self.languages.len(),
        ]
        .iter()
        .map(|n| *n as u64)
        .product()
    }

    /// Every combination, services outermost and languages innermost.
    pub fn combinations(&self) -> impl Iterator<Item = KeywordCombination> + '_ {
        self.services.iter().flat_map(move |service| {
            self.templates.iter().flat_map(move |template| {
                self.countries.iter().flat_map(move |country| {
                    self.languages
                        .iter()
                        .map(move |&language| self.combine(service, template, country, language))
                })
            })
        })
    }

    fn combine(
        &self,
        service: &Stored<Service>,
        template: &Stored<PhraseTemplate>,
        country: &Country,
        language: Language,
    ) -> KeywordCombination {
        let values = Placeholders::new()
            .with("service", service_text(&service.record, language))
            .with("country", country_name(country, language))
            .with("platform", self.platform.name);
        let keyword = render(&template.record.pattern, &values);
        let keyword_normalized = normalize_phrase(&keyword);

        KeywordCombination {
            platform_id: self.platform.id,
            service_id: service.id,
            template_id: template.id,
            country_code: country.code.clone(),
            language,
            keyword,
            keyword_normalized,
            intent: template.record.intent,
            search_volume: 0,
            competition: INITIAL_COMPETITION,
            priority: template.record.priority,
        }
    }
}

/// Outcome of [`generate_keywords`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub generated: u64,
    /// Rows the sink reports as written; lower than `generated` when rows already existed.
    pub inserted: u64,
    pub batches: u64,
}

/// Walks the plan and writes it through `sink` in batches of `batch_size`
/// (at least 1). Batches already flushed stay written if a later one fails.
pub async fn generate_keywords<S>(
    plan: &GenerationPlan<'_>,
    batch_size: usize,
    sink: &mut S,
) -> anyhow::Result<GenerationReport>
where
    S: KeywordSink + ?Sized,
{
    let batch_size = batch_size.max(1);
    let mut batch: Vec<KeywordCombination> = Vec::with_capacity(batch_size);
    let mut report = GenerationReport::default();

    for combination in plan.combinations() {
        batch.push(combination);
        report.generated += 1;
        if batch.len() >= batch_size {
            flush(&mut batch, &mut *sink, &mut report, plan.platform.name).await?;
        }
    }
    if !batch.is_empty() {
        flush(&mut batch, &mut *sink, &mut report, plan.platform.name).await?;
    }

    info!(
        platform = plan.platform.name,
        generated = report.generated,
        inserted = report.inserted,
        batches = report.batches,
        "keyword generation complete"
    );
    Ok(report)
}

async fn flush<S>(
    batch: &mut Vec<KeywordCombination>,
    sink: &mut S,
    report: &mut GenerationReport,
    platform: &str,
) -> anyhow::Result<()>
where
    S: KeywordSink + ?Sized,
{
    report.inserted += sink.insert_batch(batch).await?;
    report.batches += 1;
    batch.clear();
    info!(platform, written = report.generated, "keyword batch flushed");
    Ok(())
}
