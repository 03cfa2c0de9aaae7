//! Paperdeck browsing core
//!
//! The selection-and-filter state machine behind the paper browser:
//! - Reconciled user selection and its command mutators (selection)
//! - Pure mapping from a selection to the catalog dates it needs (resolver)
//! - Fetch-and-memoize layer for per-date datasets (cache)
//! - Substring filter over merged paper collections (filter)
//! - Render orchestration with stale-cycle discard by generation token
//!   (coordinator)
//! - Data source boundary over HTTP or a local directory (source)

pub mod cache;
pub mod coordinator;
pub mod filter;
pub mod resolver;
pub mod selection;
pub mod source;
pub mod view;

pub use cache::DatasetCache;
pub use coordinator::Coordinator;
pub use filter::filter_papers;
pub use resolver::resolve;
pub use selection::{Command, SelectionMode, SelectionState};
pub use source::{DataSource, FsDataSource, HttpDataSource};
pub use view::{RenderedView, SelectionSummary, ViewState};
