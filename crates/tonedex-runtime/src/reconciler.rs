//! The view state reconciler.
//!
//! Keeps the in-memory mirror of the URL-addressable view state consistent
//! with the pages the data layer delivers. Navigation intents commit a new
//! state and emit a [`NavigationRequest`]; the reconciler itself never
//! performs I/O. Every commit bumps a monotonic sequence number, and a page
//! result is adopted only when it carries the latest committed sequence, so
//! overlapping navigations settle on the last commit rather than the last
//! arrival.

use tonedex_types::{CategorySet, PageResult, SortBy, ViewState};

/// Reconciler lifecycle. `NavigationPending` doubles as the loading flag:
/// while pending, the listing renders a loading indicator instead of rows,
/// never stale content fetched for a previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing committed yet.
    Idle,
    /// A navigation has been committed and its page has not arrived.
    NavigationPending,
    /// The displayed page matches the latest committed state.
    Settled,
}

/// User-initiated change to the view state.
#[derive(Debug, Clone)]
pub enum NavigationIntent {
    /// Jump to a page by zero-based control index.
    Page(u32),
    /// Switch the category filter by slug.
    Filter(String),
    /// Switch the category filter by select-option id.
    FilterById(i64),
    /// Switch the sort order.
    Sort(SortBy),
}

/// A committed navigation, ready to hand to the router/effect boundary.
///
/// `query` is the full query string to commit; committing it is a full
/// navigation so the server recomputes totals for the new state.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub seq: u64,
    pub state: ViewState,
    pub query: String,
}

/// Outcome of observing a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The page matches the latest committed navigation and is now current.
    Adopted,
    /// The page was fetched for a superseded navigation and was ignored.
    Stale,
}

#[derive(Debug)]
pub struct Reconciler {
    committed: ViewState,
    seq: u64,
    phase: Phase,
    current: Option<PageResult>,
}

impl Reconciler {
    pub fn new(initial: ViewState) -> Self {
        Self {
            committed: initial,
            seq: 0,
            phase: Phase::Idle,
            current: None,
        }
    }

    /// Bootstrap from a raw URL query string.
    ///
    /// The filter slug is trusted verbatim at this point; no categories are
    /// known until the first page arrives, and the data layer degrades an
    /// unknown slug on its side anyway.
    pub fn from_query(query: &str) -> Self {
        Self::new(tonedex_engine::decode_raw(query))
    }

    /// The latest committed view state (the single source of truth for what
    /// should be displayed).
    pub fn committed(&self) -> &ViewState {
        &self.committed
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True from the instant a navigation is committed until a matching page
    /// arrives. Stale pages never clear it.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::NavigationPending
    }

    /// The page currently considered displayable, if any.
    pub fn current(&self) -> Option<&PageResult> {
        self.current.as_ref()
    }

    /// Categories from the last adopted page; empty (sentinel only) before
    /// the first page arrives.
    pub fn categories(&self) -> CategorySet {
        self.current
            .as_ref()
            .map(|result| result.categories.clone())
            .unwrap_or_else(CategorySet::empty)
    }

    /// Apply a user-initiated change and commit the resulting state.
    ///
    /// Filter and sort changes unconditionally reset the page to 1.
    pub fn navigate(&mut self, intent: NavigationIntent) -> NavigationRequest {
        let categories = self.categories();
        let next = match intent {
            NavigationIntent::Page(index) => self.committed.with_page(index.saturating_add(1)),
            NavigationIntent::Filter(slug) => {
                let category = tonedex_engine::resolve(&slug, &categories);
                self.committed.with_filter(category.slug)
            }
            NavigationIntent::FilterById(id) => {
                let category = tonedex_engine::resolve_by_id(id, &categories);
                self.committed.with_filter(category.slug)
            }
            NavigationIntent::Sort(sort_by) => self.committed.with_sort(sort_by),
        };
        self.commit(next)
    }

    /// Re-commit the current state, e.g. for the initial load.
    pub fn refresh(&mut self) -> NavigationRequest {
        self.commit(self.committed.clone())
    }

    fn commit(&mut self, next: ViewState) -> NavigationRequest {
        self.seq += 1;
        self.phase = Phase::NavigationPending;
        self.committed = next.clone();
        let query = tonedex_engine::encode(&next);
        log::debug!("committed navigation seq={} query={}", self.seq, query);
        NavigationRequest {
            seq: self.seq,
            state: next,
            query,
        }
    }

    /// Observe a fetched page tagged with the sequence it was issued for.
    ///
    /// Only the page matching the latest committed navigation is adopted;
    /// anything else arrived for a superseded request and is ignored.
    pub fn observe(&mut self, seq: u64, result: PageResult) -> Observation {
        if seq != self.seq {
            log::debug!(
                "discarding stale page result seq={} (latest committed seq={})",
                seq,
                self.seq
            );
            return Observation::Stale;
        }

        self.phase = Phase::Settled;
        self.current = Some(result);
        Observation::Adopted
    }
}
