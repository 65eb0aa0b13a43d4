//! Centralized configuration (environment variables + defaults).

use crate::domain::keywords::{DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE};
use anyhow::Context;
use std::path::PathBuf;

pub const DEFAULT_WORKBOOK_DIR: &str = "data/workbooks";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Directory holding one `<platform-slug>.xlsx` per platform.
pub fn workbook_dir() -> PathBuf {
    std::env::var("SEED_WORKBOOK_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORKBOOK_DIR))
}

/// Keyword insert batch size (`KEYWORD_BATCH_SIZE`, default 500).
pub fn keyword_batch_size() -> anyhow::Result<usize> {
    match std::env::var("KEYWORD_BATCH_SIZE") {
        Ok(v) => {
            let size = v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("KEYWORD_BATCH_SIZE must be a positive integer, got '{}'", v))?;
            Ok(clamp_batch_size(size))
        }
        Err(_) => Ok(DEFAULT_BATCH_SIZE),
    }
}

/// Pool size (`DATABASE_MAX_CONNECTIONS`, default 5).
pub fn max_connections() -> anyhow::Result<u32> {
    match std::env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(v) => v
            .trim()
            .parse::<u32>()
            .map(|n| n.max(1))
            .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be an integer, got '{}'", v)),
        Err(_) => Ok(DEFAULT_MAX_CONNECTIONS),
    }
}

/// Keeps a batch within `[1, MAX_BATCH_SIZE]`.
pub fn clamp_batch_size(size: usize) -> usize {
    size.clamp(1, MAX_BATCH_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_clamped() {
        assert_eq!(clamp_batch_size(0), 1);
        assert_eq!(clamp_batch_size(500), 500);
        assert_eq!(clamp_batch_size(5000), 5000);
        assert_eq!(clamp_batch_size(5001), 5000);
        assert_eq!(clamp_batch_size(1_000_000), 5000);
    }

    #[test]
    fn largest_batch_fits_one_statement() {
        assert!(MAX_BATCH_SIZE <= crate::storage::MAX_BATCH_ROWS);
    }
}
