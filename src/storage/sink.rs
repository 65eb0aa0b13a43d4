//! Bulk-insert capability the keyword generator writes through.

use crate::domain::model::KeywordCombination;
use async_trait::async_trait;

/// Destination for batches of generated keywords.
///
/// Each call is one write unit; no atomicity spans calls.
#[async_trait]
pub trait KeywordSink: Send {
    /// Persists `batch` and returns how many rows were actually written.
    async fn insert_batch(&mut self, batch: &[KeywordCombination]) -> anyhow::Result<u64>;
}
