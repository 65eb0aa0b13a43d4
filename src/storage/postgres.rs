//! Keyword sink backed by PostgreSQL.

use crate::domain::model::{KeywordCombination, KeywordCombinationTable, SeedTable};
use crate::storage::sink::KeywordSink;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Columns bound per keyword row.
pub const KEYWORD_COLUMNS: [&str; 11] = [
    "platform_id",
    "service_id",
    "template_id",
    "country_code",
    "language",
    "keyword",
    "keyword_normalized",
    "intent_type",
    "search_volume",
    "competition_score",
    "priority_score",
];

/// Postgres caps a statement at 65535 bind parameters.
pub const MAX_BATCH_ROWS: usize = u16::MAX as usize / KEYWORD_COLUMNS.len();

/// Writes each batch as one multi-row `INSERT .. ON CONFLICT DO NOTHING`.
#[derive(Clone)]
pub struct PostgresKeywordSink {
    pool: PgPool,
}

impl PostgresKeywordSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds the bulk insert for `batch`. Existing tuples are left untouched.
pub fn build_insert(batch: &[KeywordCombination]) -> QueryBuilder<'_, Postgres> {
    let table = KeywordCombinationTable;
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        table.table_name(),
        KEYWORD_COLUMNS.join(", ")
    ));
    qb.push_values(batch, |mut row, kw| {
        row.push_bind(kw.platform_id)
            .push_bind(kw.service_id)
            .push_bind(kw.template_id)
            .push_bind(kw.country_code.as_str())
            .push_bind(kw.language.code())
            .push_bind(kw.keyword.as_str())
            .push_bind(kw.keyword_normalized.as_str())
            .push_bind(kw.intent.as_str())
            .push_bind(kw.search_volume)
            .push_bind(kw.competition)
            .push_bind(kw.priority);
    });
    qb.push(format!(
        " ON CONFLICT ({}) DO NOTHING",
        table.natural_key().join(", ")
    ));
    qb
}

#[async_trait]
impl KeywordSink for PostgresKeywordSink {
    async fn insert_batch(&mut self, batch: &[KeywordCombination]) -> Result<u64> {
        if batch.is_empty() {
            return Ok(0);
        }
        if batch.len() > MAX_BATCH_ROWS {
            return Err(anyhow::anyhow!(
                "keyword batch of {} rows exceeds the {} row statement limit",
                batch.len(),
                MAX_BATCH_ROWS
            ));
        }
        let result = build_insert(batch)
            .build()
            .execute(&self.pool)
            .await
            .with_context(|| format!("bulk insert of {} keyword rows failed", batch.len()))?;
        Ok(result.rows_affected())
    }
}
