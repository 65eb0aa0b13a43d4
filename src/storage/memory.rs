//! In-process sinks used by dry runs and tests.

use crate::domain::model::KeywordCombination;
use crate::storage::sink::KeywordSink;
use async_trait::async_trait;

/// Keeps every row it receives, along with the size of each batch.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<KeywordCombination>,
    pub batch_sizes: Vec<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeywordSink for MemorySink {
    async fn insert_batch(&mut self, batch: &[KeywordCombination]) -> anyhow::Result<u64> {
        self.batch_sizes.push(batch.len());
        self.rows.extend_from_slice(batch);
        Ok(batch.len() as u64)
    }
}

/// Counts rows without retaining them.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub rows: u64,
    pub batches: u64,
}

#[async_trait]
impl KeywordSink for CountingSink {
    async fn insert_batch(&mut self, batch: &[KeywordCombination]) -> anyhow::Result<u64> {
        self.rows += batch.len() as u64;
        self.batches += 1;
        Ok(batch.len() as u64)
    }
}
