//! Render coordination
//!
//! One render cycle is resolve → fetch/cache → merge → filter → publish.
//! Every applied command starts a new cycle and bumps a monotonically
//! increasing generation counter; a cycle may only publish output while
//! its generation is still the latest. An outdated in-flight fetch is not
//! aborted, its result is simply ignored on arrival, so a slow older
//! cycle can never overwrite a newer one.
//!
//! A fetch failure aborts the whole cycle: results already fetched for it
//! are discarded and the failure placeholder is published instead. Zero
//! resolved dates is not a failure; it commits an empty rendered view
//! with a cleared summary.

use crate::cache::DatasetCache;
use crate::filter::filter_papers;
use crate::resolver::resolve;
use crate::selection::{Command, SelectionState};
use crate::source::DataSource;
use crate::view::{RenderedView, SelectionSummary, ViewState};
use paperdeck_common::{DateCatalog, MergedPaper};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Owns the selection state, the dataset cache, and the published view
/// for one browsing session.
pub struct Coordinator<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    catalog: DateCatalog,
    cache: DatasetCache,
    state: Mutex<SelectionState>,
    generation: AtomicU64,
    view_tx: watch::Sender<ViewState>,
}

impl<S> Clone for Coordinator<S> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<S: DataSource> Coordinator<S> {
    /// Create a session over an already-loaded catalog. The default
    /// selection is single mode on the newest catalog date; no render
    /// cycle runs until the first trigger.
    pub fn new(source: S, catalog: DateCatalog) -> Self {
        let state = SelectionState::initial(&catalog);
        let (view_tx, _) = watch::channel(ViewState::Idle);
        Self {
            inner: Arc::new(Inner {
                source,
                catalog,
                cache: DatasetCache::new(),
                state: Mutex::new(state),
                generation: AtomicU64::new(0),
                view_tx,
            }),
        }
    }

    pub fn catalog(&self) -> &DateCatalog {
        &self.inner.catalog
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> SelectionState {
        self.inner.state.lock().expect("selection state poisoned").clone()
    }

    /// Snapshot of the currently published view.
    pub fn view(&self) -> ViewState {
        self.inner.view_tx.borrow().clone()
    }

    /// Observe view replacements as they are committed.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.view_tx.subscribe()
    }

    /// Apply a command and run the render cycle it triggers.
    pub async fn apply(&self, command: Command) {
        let generation = {
            let mut state = self.inner.state.lock().expect("selection state poisoned");
            state.apply(command, &self.inner.catalog);
            self.next_generation()
        };
        self.render(generation).await;
    }

    /// Run a render cycle against the current selection without mutating
    /// it. Used for the initial render after startup.
    pub async fn refresh(&self) {
        let generation = self.next_generation();
        self.render(generation).await;
    }

    fn next_generation(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn render(&self, generation: u64) {
        self.commit(generation, ViewState::Loading);

        let snapshot = self.selection();
        let selected = resolve(&snapshot, &self.inner.catalog);

        if selected.is_empty() {
            debug!(generation, "selection resolves to no dates");
            self.commit(
                generation,
                ViewState::Rendered(RenderedView {
                    papers: Vec::new(),
                    total: 0,
                    summary: None,
                    show_translated: snapshot.show_translated,
                }),
            );
            return;
        }

        // Sequential fetch across the batch; every dataset must load or
        // the cycle publishes nothing but the failure placeholder.
        let mut merged: Vec<MergedPaper> = Vec::new();
        for entry in &selected {
            match self.inner.cache.get_or_fetch(&self.inner.source, entry.date).await {
                Ok(dataset) => {
                    merged.extend(dataset.papers.iter().cloned().map(|paper| MergedPaper {
                        paper,
                        source_date: entry.date,
                    }));
                }
                Err(err) => {
                    warn!(generation, date = %entry.date, error = %err, "render cycle failed");
                    self.commit(generation, ViewState::Failed { message: err.to_string() });
                    return;
                }
            }
        }

        let filtered = filter_papers(merged, &snapshot.search_text);
        let summary = SelectionSummary {
            mode: snapshot.mode,
            active_date: snapshot.active_date,
            start_date: snapshot.start_date,
            end_date: snapshot.end_date,
            dates_covered: selected.len(),
        };

        info!(
            generation,
            mode = ?snapshot.mode,
            start = ?snapshot.start_date,
            end = ?snapshot.end_date,
            count = filtered.len(),
            "render_results"
        );

        self.commit(
            generation,
            ViewState::Rendered(RenderedView {
                total: filtered.len(),
                papers: filtered,
                summary: Some(summary),
                show_translated: snapshot.show_translated,
            }),
        );
    }

    /// Publish `view` unless a newer trigger has superseded this cycle.
    ///
    /// The generation check runs inside the sender's closure, so checking
    /// and publishing are one atomic step: a cycle that observes itself
    /// as latest cannot be overtaken between the check and the write.
    /// Any trigger bumps the counter before its render starts, so a
    /// stale cycle either sees the bump here and discards, or it really
    /// is the latest.
    fn commit(&self, generation: u64, view: ViewState) -> bool {
        let committed = self.inner.view_tx.send_if_modified(|current| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = view;
            true
        });
        if !committed {
            debug!(generation, "discarding stale render output");
        }
        committed
    }
}
