//! Keyword generation: localization, rendering, normalization and batching.

pub mod generator;
pub mod locale;
pub mod normalize;
pub mod render;

pub use generator::{
    generate_keywords, GenerationPlan, GenerationReport, PlatformRef, DEFAULT_BATCH_SIZE,
    MAX_BATCH_SIZE,
};
pub use normalize::{normalize_phrase, slugify};
pub use render::{render, substitute, Placeholders};
