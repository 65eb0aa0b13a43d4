//! Reference data ingestion: platform workbooks with built-in fallbacks.

pub mod dataset;
pub mod defaults;
pub mod sheets;
pub mod workbook;

use std::path::PathBuf;
use thiserror::Error;

pub use dataset::{load_platform_dataset, Origin, PlatformDataset};
pub use workbook::{workbook_path, Workbook};

/// The workbook as a whole could not be used.
#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("workbook {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

/// One sheet could not be used; the section falls back to defaults.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet '{0}' is missing")]
    Missing(String),
    #[error("sheet '{sheet}' could not be read: {source}")]
    Unreadable {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: &'static str },
    #[error("sheet '{0}' has no usable rows")]
    Empty(String),
}
