//! Collaborator seams consumed by the reconciler.
//!
//! The core never performs I/O itself; it hands a committed view state to a
//! `PageSource` and later observes the returned page. Transport failures are
//! not recovered here: they surface through the host's page-level boundary.

use anyhow::Result;
use tonedex_types::{CategoryCount, PageResult, ViewState};

/// The data access layer: computes one page of results for a view state.
///
/// Implementations must return `total` computed under the same filter as the
/// returned models, and `categories` valid for the whole catalog. A requested
/// page beyond the last one is the implementation's to handle (empty page or
/// last valid page); whatever page index it echoes is rendered as current.
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, state: &ViewState, page_size: u32) -> Result<PageResult>;
}

/// Aggregate per-category counts, consumed only when no filter or tag search
/// is active, to render the default heading.
pub trait CountsSource: Send + Sync {
    fn aggregate_counts(&self) -> Result<Vec<CategoryCount>>;
}
