pub mod app;
pub mod domain;
pub mod infra;
pub mod ingest;
pub mod storage;

// Convenience re-exports (keeps call-sites clean)
pub use app::runner::{dry_run, run, RunOptions, RunReport};
pub use app::seed_service::SeedService;
pub use app::summary::{format_summary_table, PlatformSummary};
pub use domain::keywords::{generate_keywords, normalize_phrase, render, slugify, GenerationPlan};
pub use domain::model::{Language, Platform, TableRegistry};
pub use ingest::{load_platform_dataset, PlatformDataset};
