//! The Seed Service.
//!
//! This module acts as the intermediary between the seeding run and the database.
//! It is responsible for:
//! 1.  Creating the keyword tables when they do not exist yet.
//! 2.  Upserting reference data keyed on natural identifiers (platform slug,
//!     service key, template key, ...), inside a caller-owned transaction.
//! 3.  Streaming generated keyword combinations into `keyword_combinations`.
//! 4.  Reporting per-platform row counts.

use crate::app::summary::PlatformSummary;
use crate::domain::keywords::{generate_keywords, substitute, GenerationPlan, GenerationReport, Placeholders, PlatformRef};
use crate::domain::model::{
    Country, KeywordTemplateTable, Language, NaturalPhrase, NaturalPhraseTable, PhraseTemplate,
    Platform, PlatformTable, SeedTable, SeoTemplate, SeoTemplateTable, Service, ServiceTable,
    Stored, TableRegistry,
};
use crate::infra::config;
use crate::storage::PostgresKeywordSink;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{info, warn};

/// Reference rows written for one platform during the transactional phase.
#[derive(Debug, Clone)]
pub struct SeededPlatform {
    pub platform: Platform,
    pub platform_id: i64,
    pub services: Vec<Stored<Service>>,
    pub templates: Vec<Stored<PhraseTemplate>>,
    pub seo_templates: u64,
    pub phrases: u64,
}

/// `INSERT .. ON CONFLICT (<natural key>) DO UPDATE .. RETURNING id` for `table`.
///
/// Placeholders are numbered in `columns` order; every non-key column is
/// overwritten with the incoming value.
pub fn upsert_sql(table: &dyn SeedTable, columns: &[&str]) -> String {
    let key = table.natural_key();
    let placeholders = (1..=columns.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let set_clause = columns
        .iter()
        .filter(|c| !key.iter().any(|k| *k == **c))
        .map(|c| format!("{} = EXCLUDED.{}", c, c))
        .chain(std::iter::once("updated_at = now()".to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) DO UPDATE SET {} RETURNING id",
        table.table_name(),
        columns.join(", "),
        placeholders,
        key.join(", "),
        set_clause
    )
}

// Later rows with the same natural key overwrite earlier ones in storage;
// keep a single entry per id so the keyword product has no repeats.
fn push_unique<T>(stored: &mut Vec<Stored<T>>, id: i64, record: T, what: &str, key: &str) {
    if let Some(existing) = stored.iter_mut().find(|s| s.id == id) {
        warn!(key, "duplicate {} key; the last definition wins", what);
        existing.record = record;
    } else {
        stored.push(Stored::new(id, record));
    }
}

/// The main service that manages database interaction for a seeding run.
pub struct SeedService {
    pool: PgPool,
}

impl SeedService {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a new instance of the SeedService and connects to the database.
    pub async fn new() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let database_url = config::database_url()?;

        let pool = PgPoolOptions::new()
            .max_connections(config::max_connections()?)
            .connect(&database_url)
            .await
            .context("failed to connect to DATABASE_URL")?;

        Self::with_pool(pool).await
    }

    /// Wraps an existing pool, creating any missing table.
    pub async fn with_pool(pool: PgPool) -> anyhow::Result<Self> {
        let service = Self { pool };
        service.ensure_schema().await?;
        Ok(service)
    }

    async fn ensure_schema(&self) -> anyhow::Result<()> {
        let registry = TableRegistry::keyword_seeding();
        for statement in registry.get_all_create_sql() {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .with_context(|| format!("schema statement failed: {}", statement))?;
        }
        Ok(())
    }

    pub async fn upsert_platform(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        platform: Platform,
    ) -> anyhow::Result<i64> {
        let sql = upsert_sql(&PlatformTable, &["slug", "name"]);
        let id: i64 = sqlx::query_scalar(&sql)
            .bind(platform.slug())
            .bind(platform.display_name())
            .fetch_one(&mut **tx)
            .await
            .with_context(|| format!("upsert of platform '{}' failed", platform))?;
        Ok(id)
    }

    pub async fn upsert_services(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        platform_id: i64,
        services: &[Service],
    ) -> anyhow::Result<Vec<Stored<Service>>> {
        let sql = upsert_sql(
            &ServiceTable,
            &["platform_id", "service_key", "category", "translations"],
        );
        let mut stored = Vec::with_capacity(services.len());
        for service in services {
            let id: i64 = sqlx::query_scalar(&sql)
                .bind(platform_id)
                .bind(service.key.as_str())
                .bind(service.category.as_deref())
                .bind(Json(&service.translations))
                .fetch_one(&mut **tx)
                .await
                .with_context(|| format!("upsert of service '{}' failed", service.key))?;
            push_unique(&mut stored, id, service.clone(), "service", &service.key);
        }
        Ok(stored)
    }

    pub async fn upsert_templates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        platform_id: i64,
        templates: &[PhraseTemplate],
    ) -> anyhow::Result<Vec<Stored<PhraseTemplate>>> {
        let sql = upsert_sql(
            &KeywordTemplateTable,
            &["platform_id", "template_key", "pattern", "intent_type", "priority", "is_active"],
        );
        let mut stored = Vec::with_capacity(templates.len());
        for template in templates {
            let id: i64 = sqlx::query_scalar(&sql)
                .bind(platform_id)
                .bind(template.key.as_str())
                .bind(template.pattern.as_str())
                .bind(template.intent.as_str())
                .bind(template.priority)
                .bind(template.active)
                .fetch_one(&mut **tx)
                .await
                .with_context(|| format!("upsert of template '{}' failed", template.key))?;
            push_unique(&mut stored, id, template.clone(), "template", &template.key);
        }
        Ok(stored)
    }

    /// Stores SEO templates with `{platform}` filled in; other tokens are kept.
    pub async fn upsert_seo_templates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        platform: Platform,
        platform_id: i64,
        templates: &[SeoTemplate],
    ) -> anyhow::Result<u64> {
        let sql = upsert_sql(
            &SeoTemplateTable,
            &["platform_id", "language", "page_type", "title_template", "meta_description_template"],
        );
        let branding = Placeholders::new().with("platform", platform.display_name());
        let mut count = 0;
        for template in templates {
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(platform_id)
                .bind(template.language.code())
                .bind(template.page_type.as_str())
                .bind(substitute(&template.title, &branding))
                .bind(substitute(&template.meta_description, &branding))
                .fetch_one(&mut **tx)
                .await
                .with_context(|| {
                    format!(
                        "upsert of SEO template '{}' ({}) failed",
                        template.page_type, template.language
                    )
                })?;
            count += 1;
        }
        Ok(count)
    }

    pub async fn upsert_phrases(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        platform_id: i64,
        phrases: &[NaturalPhrase],
    ) -> anyhow::Result<u64> {
        let sql = upsert_sql(
            &NaturalPhraseTable,
            &["platform_id", "language", "phrase_key", "phrase"],
        );
        let mut count = 0;
        for phrase in phrases {
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(platform_id)
                .bind(phrase.language.code())
                .bind(phrase.key.as_str())
                .bind(phrase.text.as_str())
                .fetch_one(&mut **tx)
                .await
                .with_context(|| format!("upsert of phrase '{}' ({}) failed", phrase.key, phrase.language))?;
            count += 1;
        }
        Ok(count)
    }

    /// Deletes the generated keywords of one platform; returns the row count.
    pub async fn clear_keywords(&self, platform_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM keyword_combinations WHERE platform_id = $1")
            .bind(platform_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Generates the platform's keyword space into `keyword_combinations`.
    ///
    /// Each batch is its own statement: a failure keeps the batches already written.
    pub async fn generate_keywords(
        &self,
        seeded: &SeededPlatform,
        countries: &[Country],
        batch_size: usize,
    ) -> anyhow::Result<GenerationReport> {
        let plan = GenerationPlan::new(
            PlatformRef {
                id: seeded.platform_id,
                name: seeded.platform.display_name(),
            },
            &seeded.services,
            &seeded.templates,
            countries,
            &Language::ALL,
        );
        info!(
            platform = seeded.platform.slug(),
            expected = plan.expected_count(),
            batch_size,
            "generating keyword combinations"
        );
        let mut sink = PostgresKeywordSink::new(self.pool.clone());
        generate_keywords(&plan, batch_size, &mut sink)
            .await
            .with_context(|| format!("keyword generation for '{}' failed", seeded.platform))
    }

    /// Row counts per platform, ordered by slug.
    pub async fn summary(&self) -> anyhow::Result<Vec<PlatformSummary>> {
        let rows = sqlx::query(
            "SELECT p.slug, p.name,
                (SELECT COUNT(*) FROM services s WHERE s.platform_id = p.id) AS services,
                (SELECT COUNT(*) FROM keyword_templates t WHERE t.platform_id = p.id) AS templates,
                (SELECT COUNT(*) FROM seo_templates st WHERE st.platform_id = p.id) AS seo_templates,
                (SELECT COUNT(*) FROM natural_phrases np WHERE np.platform_id = p.id) AS phrases,
                (SELECT COUNT(*) FROM keyword_combinations k WHERE k.platform_id = p.id) AS keywords
             FROM platforms p
             ORDER BY p.slug",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            summaries.push(PlatformSummary {
                slug: row.try_get("slug")?,
                name: row.try_get("name")?,
                services: row.try_get("services")?,
                templates: row.try_get("templates")?,
                seo_templates: row.try_get("seo_templates")?,
                phrases: row.try_get("phrases")?,
                keywords: row.try_get("keywords")?,
            });
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_conflicts_on_natural_key() {
        let sql = upsert_sql(
            &ServiceTable,
            &["platform_id", "service_key", "category", "translations"],
        );
        assert_eq!(
            sql,
            "INSERT INTO services (platform_id, service_key, category, translations) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (platform_id, service_key) \
             DO UPDATE SET category = EXCLUDED.category, translations = EXCLUDED.translations, \
             updated_at = now() RETURNING id"
        );
    }

    #[test]
    fn key_only_upsert_still_touches_row() {
        let sql = upsert_sql(&PlatformTable, &["slug"]);
        assert!(sql.ends_with("DO UPDATE SET updated_at = now() RETURNING id"));
    }

    #[test]
    fn duplicate_ids_keep_last_record() {
        let mut stored = Vec::new();
        push_unique(&mut stored, 1, "first", "service", "a");
        push_unique(&mut stored, 2, "other", "service", "b");
        push_unique(&mut stored, 1, "second", "service", "a");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].record, "second");
    }
}
