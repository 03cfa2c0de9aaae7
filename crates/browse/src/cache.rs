//! Per-date dataset cache
//!
//! Fetch-and-memoize over a `DataSource`. Policy: fetched once, never
//! evicted, failures not cached. The backing data is immutable for the
//! session, so a successful fetch stays valid until the page is closed;
//! a failed fetch must stay retryable because the failure may have been
//! transient.
//!
//! Fetches inside one resolution batch run sequentially, so the mutex is
//! only ever held across map operations, never across I/O.

use crate::source::DataSource;
use chrono::NaiveDate;
use paperdeck_common::{PaperDataset, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Append-only mapping from date to its parsed dataset.
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<NaiveDate, Arc<PaperDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `date`, fetching it on a miss.
    /// Nothing is stored when the fetch fails.
    pub async fn get_or_fetch<S: DataSource>(
        &self,
        source: &S,
        date: NaiveDate,
    ) -> Result<Arc<PaperDataset>> {
        if let Some(dataset) = self.get(date) {
            debug!(%date, "dataset cache hit");
            return Ok(dataset);
        }

        debug!(%date, "dataset cache miss");
        let dataset = Arc::new(source.fetch_dataset(date).await?);
        self.entries
            .lock()
            .expect("dataset cache poisoned")
            .insert(date, dataset.clone());
        Ok(dataset)
    }

    /// Cached dataset for `date`, if any. Never triggers I/O.
    pub fn get(&self, date: NaiveDate) -> Option<Arc<PaperDataset>> {
        self.entries
            .lock()
            .expect("dataset cache poisoned")
            .get(&date)
            .cloned()
    }

    /// Number of dates cached so far this session.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("dataset cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use paperdeck_common::{BrowseError, DateCatalog, Paper};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn paper(id: &str) -> Paper {
        Paper {
            id: id.into(),
            title: format!("Paper {id}"),
            title_zh: None,
            authors: String::new(),
            url: String::new(),
            subjects: String::new(),
            subject_split: String::new(),
        }
    }

    #[derive(Default)]
    struct CountingSource {
        datasets: HashMap<NaiveDate, Vec<Paper>>,
        failing: Mutex<HashSet<NaiveDate>>,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl DataSource for CountingSource {
        async fn fetch_catalog(&self) -> Result<DateCatalog> {
            Ok(DateCatalog::default())
        }

        async fn fetch_dataset(&self, date: NaiveDate) -> Result<PaperDataset> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap().contains(&date) {
                return Err(BrowseError::dataset_unavailable(date));
            }
            self.datasets
                .get(&date)
                .map(|papers| PaperDataset { date, papers: papers.clone() })
                .ok_or(BrowseError::dataset_unavailable(date))
        }
    }

    #[tokio::test]
    async fn test_hit_skips_refetch() {
        let day = date("2024-05-03");
        let mut source = CountingSource::default();
        source.datasets.insert(day, vec![paper("1"), paper("2")]);

        let cache = DatasetCache::new();
        let first = cache.get_or_fetch(&source, day).await.unwrap();
        let second = cache.get_or_fetch(&source, day).await.unwrap();

        assert_eq!(first.papers.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_memoized() {
        let day = date("2024-05-02");
        let mut source = CountingSource::default();
        source.datasets.insert(day, vec![paper("1")]);
        source.failing.lock().unwrap().insert(day);

        let cache = DatasetCache::new();
        let err = cache.get_or_fetch(&source, day).await.unwrap_err();
        assert!(matches!(err, BrowseError::DatasetUnavailable { .. }));
        assert!(cache.is_empty());

        // transient failure clears; the retry re-attempts the fetch
        source.failing.lock().unwrap().remove(&day);
        let dataset = cache.get_or_fetch(&source, day).await.unwrap();
        assert_eq!(dataset.papers.len(), 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
