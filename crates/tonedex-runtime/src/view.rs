//! Render-ready snapshot of the listing.
//!
//! The snapshot is assembled from the reconciler on every change of server
//! data or committed state. While a navigation is pending it carries no rows
//! and no controls, only the heading; stale rows from a previous state are
//! never exposed.

use serde::Serialize;
use tonedex_engine::{FilterOption, ListingTitle, PageItem, build_controls, page_count};
use tonedex_types::{Category, CategoryCount, ToneModel};

use crate::config::ListingConfig;
use crate::reconciler::Reconciler;

#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    /// True while a committed navigation awaits its page.
    pub loading: bool,
    pub title: ListingTitle,
    /// Rows to render. Empty while loading or when there are no results.
    pub models: Vec<ToneModel>,
    /// Settled with zero results; renders the explicit "No results" state.
    pub empty: bool,
    /// Pagination control row; empty when it should not be rendered at all.
    pub controls: Vec<PageItem>,
    pub page_count: u32,
    /// Entries for the category select control.
    pub filter_options: Vec<FilterOption>,
    /// Resolved descriptor for the committed filter.
    pub selected_filter: Category,
}

impl ListingView {
    pub fn assemble(
        reconciler: &Reconciler,
        config: &ListingConfig,
        counts: &[CategoryCount],
    ) -> Self {
        let categories = reconciler.categories();
        let state = reconciler.committed();
        let title = ListingTitle::for_state(state, &categories, counts);
        let filter_options = tonedex_engine::filter_options(&categories);
        let selected_filter = tonedex_engine::resolve(&state.filter, &categories);

        let result = match reconciler.current() {
            Some(result) if !reconciler.is_loading() => result,
            _ => {
                return Self {
                    loading: true,
                    title,
                    models: Vec::new(),
                    empty: false,
                    controls: Vec::new(),
                    page_count: 0,
                    filter_options,
                    selected_filter,
                };
            }
        };
        let pages = page_count(result.total, config.page_size);
        let controls = build_controls(pages, result.page, config.page_range, config.margin_pages);

        Self {
            loading: false,
            title,
            models: result.models.clone(),
            empty: result.models.is_empty(),
            controls,
            page_count: pages,
            filter_options,
            selected_filter,
        }
    }
}
