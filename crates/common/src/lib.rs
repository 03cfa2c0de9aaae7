//! Paperdeck Common Library
//!
//! Shared code for the paperdeck workspace including:
//! - Catalog and paper data model (wire contract for the static JSON files)
//! - Error types and handling
//! - Configuration management

pub mod config;
pub mod errors;
pub mod model;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{BrowseError, Result};
pub use model::{DateCatalog, DateEntry, MergedPaper, Paper, PaperDataset};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Relative path of the date index below the data root
pub const INDEX_PATH: &str = "index.json";

/// Build the relative path of one date's dataset below the data root
pub fn dataset_path(date: chrono::NaiveDate) -> String {
    format!("dates/{}.json", date.format("%Y-%m-%d"))
}
