//! End-to-end listing flow against the in-memory catalog: URL in, settled
//! views out, navigation commands in between.

use std::sync::Arc;

use tonedex_engine::PageItem;
use tonedex_runtime::{
    ListingConfig, ListingEvent, ListingRuntime, ListingView, NavigationIntent, RuntimeConfig,
};
use tonedex_testing::InMemoryCatalog;
use tonedex_types::{CategorySet, SortBy};

fn start(initial_query: &str) -> ListingRuntime {
    let catalog = Arc::new(InMemoryCatalog::sample());
    ListingRuntime::start(RuntimeConfig {
        source: catalog.clone(),
        counts: catalog,
        listing: ListingConfig::default(),
        initial_query: initial_query.to_string(),
    })
    .unwrap()
}

fn next_commit(runtime: &ListingRuntime) -> String {
    for event in runtime.receiver().iter() {
        if let ListingEvent::NavigationCommitted { query, .. } = event {
            return query;
        }
    }
    panic!("runtime exited before a commit arrived");
}

fn next_settled(runtime: &ListingRuntime) -> Box<ListingView> {
    for event in runtime.receiver().iter() {
        if let ListingEvent::ViewUpdated { view } = event
            && !view.loading
        {
            return view;
        }
    }
    panic!("runtime exited before a settled view arrived");
}

fn selected_index(view: &ListingView) -> Option<u32> {
    view.controls.iter().find_map(|item| match item {
        PageItem::Page {
            index,
            selected: true,
        } => Some(*index),
        _ => None,
    })
}

#[test]
fn filtered_url_loads_the_first_amp_page() {
    let runtime = start("?filter=amp");

    let query = next_commit(&runtime);
    assert_eq!(query, "page=1&filter=amp&sortBy=newest");

    let view = next_settled(&runtime);
    assert_eq!(view.models.len(), 20);
    assert_eq!(view.page_count, 3);
    assert_eq!(view.title.to_string(), "Amps");
    assert_eq!(view.selected_filter.slug, "amp");
    assert_eq!(selected_index(&view), Some(0));
    runtime.shutdown();
}

#[test]
fn page_click_keeps_the_filter_and_moves_the_selection() {
    let runtime = start("?filter=amp");
    next_settled(&runtime);

    runtime.navigate(NavigationIntent::Page(1)).unwrap();
    let query = next_commit(&runtime);
    assert!(query.contains("page=2"));
    assert!(query.contains("filter=amp"));

    let view = next_settled(&runtime);
    assert_eq!(selected_index(&view), Some(1));
    assert_eq!(view.models.len(), 20);
    runtime.shutdown();
}

#[test]
fn filter_change_resets_to_the_first_page() {
    let runtime = start("?filter=amp&page=3");
    let view = next_settled(&runtime);
    assert_eq!(selected_index(&view), Some(2));

    runtime
        .navigate(NavigationIntent::Filter("pedal".to_string()))
        .unwrap();
    let query = next_commit(&runtime);
    assert!(query.starts_with("page=1&filter=pedal"));

    let view = next_settled(&runtime);
    assert_eq!(view.title.to_string(), "Pedals");
    assert_eq!(view.models.len(), 5);
    // One page of pedals: the control row is not rendered at all.
    assert_eq!(view.page_count, 1);
    assert!(view.controls.is_empty());
    runtime.shutdown();
}

#[test]
fn sort_change_resets_to_the_first_page() {
    let runtime = start("?filter=amp&page=2");
    next_settled(&runtime);

    runtime
        .navigate(NavigationIntent::Sort(SortBy::Popular))
        .unwrap();
    let query = next_commit(&runtime);
    assert!(query.starts_with("page=1&filter=amp&sortBy=popular"));

    let view = next_settled(&runtime);
    assert_eq!(view.models[0].download_count, 1000);
    assert_eq!(selected_index(&view), Some(0));
    runtime.shutdown();
}

#[test]
fn unknown_filter_degrades_to_the_aggregate_view() {
    let runtime = start("?filter=doesnotexist");

    let view = next_settled(&runtime);
    assert_eq!(view.selected_filter.slug, "all");
    assert_eq!(view.selected_filter.id, 0);
    assert_eq!(
        view.title.to_string(),
        "Explore over 50 models, including 45 amps, and 5 pedals."
    );
    runtime.shutdown();
}

#[test]
fn tag_search_renders_the_tag_heading_over_the_filter() {
    let runtime = start("?tags=vintage-fuzz&filter=amp");

    let view = next_settled(&runtime);
    assert_eq!(view.title.to_string(), "#vintage-fuzz");
    assert_eq!(view.models.len(), 9);
    runtime.shutdown();
}

#[test]
fn empty_catalog_shows_the_no_results_state() {
    let catalog = Arc::new(InMemoryCatalog::new(CategorySet::empty(), Vec::new()));
    let runtime = ListingRuntime::start(RuntimeConfig {
        source: catalog.clone(),
        counts: catalog,
        listing: ListingConfig::default(),
        initial_query: String::new(),
    })
    .unwrap();

    let view = next_settled(&runtime);
    assert!(view.empty);
    assert_eq!(view.page_count, 0);
    assert!(view.controls.is_empty());
    runtime.shutdown();
}
