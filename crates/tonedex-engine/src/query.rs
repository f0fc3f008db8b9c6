//! Bidirectional mapping between a [`ViewState`] and a URL query string.
//!
//! Committing an encoded query string is a full navigation by design: the
//! server must recompute `total` and the page items for the new combination,
//! so server and client can never disagree on the page count.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tonedex_types::{ALL_FILTER_SLUG, CategorySet, SortBy, ViewState};

/// Characters escaped in query-string values. RFC 3986 unreserved characters
/// pass through so slugs and tags stay readable in shared URLs.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Serialize a view state to a query string.
///
/// Only keys present in the state are written; absent optional keys are
/// omitted entirely rather than zeroed, so the output composes additively
/// with [`merge`].
pub fn encode(state: &ViewState) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("page", state.page.to_string()),
        ("filter", state.filter.clone()),
        ("sortBy", state.sort_by.as_str().to_string()),
    ];
    if let Some(direction) = &state.sort_direction {
        pairs.push(("sortDirection", direction.clone()));
    }
    if let Some(tags) = &state.tags {
        pairs.push(("tags", tags.clone()));
    }
    if let Some(username) = &state.username {
        pairs.push(("username", username.clone()));
    }

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Set keys on an existing query string, preserving every other pair.
///
/// Used by page navigation, which rewrites `page` without touching the
/// active filter, sort, tags or username.
pub fn merge(existing: &str, updates: &[(&str, &str)]) -> String {
    let mut pairs = raw_pairs(existing);
    for (key, value) in updates {
        match pairs.iter_mut().find(|(existing_key, _)| existing_key == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => pairs.push((key.to_string(), value.to_string())),
        }
    }

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a query string into a view state, tolerating missing or malformed
/// keys.
///
/// Fallbacks: non-numeric or non-positive `page` becomes 1, a `filter` slug
/// not present in `categories` degrades to the sentinel "all", an unknown
/// `sortBy` becomes newest. `tags`, `username` and `sortDirection` are taken
/// verbatim.
pub fn decode(query: &str, categories: &CategorySet) -> ViewState {
    let mut state = decode_raw(query);
    if !categories.contains_slug(&state.filter) {
        state.filter = ALL_FILTER_SLUG.to_string();
    }
    state
}

/// Decode without a category set: the filter slug is kept verbatim for the
/// data layer to resolve.
///
/// Used at bootstrap, before any page result has delivered the catalog's
/// categories.
pub fn decode_raw(query: &str) -> ViewState {
    let mut state = ViewState::default();
    for (key, value) in raw_pairs(query) {
        match key.as_str() {
            "page" => {
                state.page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1);
            }
            "filter" => state.filter = value,
            "sortBy" => state.sort_by = SortBy::from_param(&value),
            "sortDirection" => state.sort_direction = Some(value),
            // An empty tags value means no tag search is active.
            "tags" => state.tags = Some(value).filter(|v| !v.is_empty()),
            "username" => state.username = Some(value),
            _ => {}
        }
    }
    state
}

fn raw_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
