//! Data source boundary
//!
//! The catalog and the per-date datasets live in a static tree:
//! `index.json` plus `dates/<date>.json`. The tree is immutable for the
//! session, but responses are requested with caching disabled so that a
//! freshly regenerated tree is picked up on reload.

use async_trait::async_trait;
use chrono::NaiveDate;
use paperdeck_common::{dataset_path, BrowseError, DateCatalog, PaperDataset, Result, INDEX_PATH};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read access to the static data tree.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the date index. Failures are fatal to initialization.
    async fn fetch_catalog(&self) -> Result<DateCatalog>;

    /// Fetch one date's dataset. Failure aborts the current render cycle
    /// only and maps to `DatasetUnavailable` for that date.
    async fn fetch_dataset(&self, date: NaiveDate) -> Result<PaperDataset>;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for Arc<S> {
    async fn fetch_catalog(&self) -> Result<DateCatalog> {
        (**self).fetch_catalog().await
    }

    async fn fetch_dataset(&self, date: NaiveDate) -> Result<PaperDataset> {
        (**self).fetch_dataset(date).await
    }
}

/// Fetches the data tree over HTTP with reqwest.
pub struct HttpDataSource {
    client: reqwest::Client,
    base: String,
}

impl HttpDataSource {
    /// Create a client rooted at `base` (e.g. `http://127.0.0.1:8077/data`).
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_catalog(&self) -> Result<DateCatalog> {
        let url = self.url(INDEX_PATH);
        debug!(%url, "fetching catalog");

        let catalog = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| BrowseError::CatalogLoad {
                message: format!("{url}: {e}"),
            })?
            .json::<DateCatalog>()
            .await
            .map_err(|e| BrowseError::CatalogLoad {
                message: format!("{url}: {e}"),
            })?;

        debug!(dates = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    async fn fetch_dataset(&self, date: NaiveDate) -> Result<PaperDataset> {
        let url = self.url(&dataset_path(date));
        debug!(%url, "fetching dataset");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                warn!(%date, error = %e, "dataset fetch failed");
                BrowseError::dataset_unavailable(date)
            })?;

        response.json::<PaperDataset>().await.map_err(|e| {
            warn!(%date, error = %e, "dataset decode failed");
            BrowseError::dataset_unavailable(date)
        })
    }
}

/// Reads the data tree from a local directory. Used by tests and by the
/// viewer when pointed at a path instead of a URL.
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for FsDataSource {
    async fn fetch_catalog(&self) -> Result<DateCatalog> {
        let path = self.root.join(INDEX_PATH);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| BrowseError::CatalogLoad {
                message: format!("{}: {e}", path.display()),
            })?;
        serde_json::from_slice(&bytes).map_err(|e| BrowseError::CatalogLoad {
            message: format!("{}: {e}", path.display()),
        })
    }

    async fn fetch_dataset(&self, date: NaiveDate) -> Result<PaperDataset> {
        let path = self.root.join(dataset_path(date));
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            warn!(%date, error = %e, "dataset read failed");
            BrowseError::dataset_unavailable(date)
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!(%date, error = %e, "dataset decode failed");
            BrowseError::dataset_unavailable(date)
        })
    }
}
