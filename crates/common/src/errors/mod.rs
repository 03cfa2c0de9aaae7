//! Error types for paperdeck
//!
//! Provides the failure taxonomy for the browsing pipeline:
//! - Fatal startup failures (catalog load, configuration)
//! - Per-render failures (a single date's dataset is unavailable)
//! - Transport and decoding errors from the data source
//!
//! An empty catalog and an empty selection are deliberately NOT errors;
//! both are valid display states and are represented in the view layer.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using BrowseError
pub type Result<T> = std::result::Result<T, BrowseError>;

/// Application error types
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The date index could not be loaded at startup. Fatal to
    /// initialization; surfaced as a full-page message.
    #[error("Failed to load the date catalog: {message}")]
    CatalogLoad { message: String },

    /// One date's dataset could not be fetched during a render cycle.
    /// Aborts that cycle only; the failure is never memoized, so the
    /// next trigger retries the fetch.
    #[error("Dataset unavailable for {date}")]
    DatasetUnavailable { date: NaiveDate },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid date: {input}")]
    InvalidDate { input: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BrowseError {
    /// True when the whole session cannot proceed (startup failures),
    /// as opposed to failures scoped to a single render cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BrowseError::CatalogLoad { .. } | BrowseError::Configuration { .. }
        )
    }

    /// Convenience constructor for dataset failures
    pub fn dataset_unavailable(date: NaiveDate) -> Self {
        BrowseError::DatasetUnavailable { date }
    }
}
