use serde::{Deserialize, Serialize};

/// Sort order for the model listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recently submitted first
    Newest,
    /// Most downloaded first
    Popular,
}

impl Default for SortBy {
    fn default() -> Self {
        Self::Newest
    }
}

impl SortBy {
    /// Canonical query-string value (`sortBy` key)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Popular => "popular",
        }
    }

    /// Parse a query-string value; anything unrecognized falls back to newest.
    pub fn from_param(value: &str) -> Self {
        match value {
            "popular" => Self::Popular,
            _ => Self::Newest,
        }
    }
}

/// The URL-addressable description of what is being browsed.
///
/// This is the single source of truth for "what should be displayed".
/// The persisted form lives in the URL query string; the reconciler keeps an
/// in-memory mirror that is eventually consistent with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// 1-based page number as exposed in the URL.
    pub page: u32,
    /// Category slug, or the sentinel "all".
    pub filter: String,
    pub sort_by: SortBy,
    /// Passed through unvalidated; the data layer interprets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
    /// Raw tag search string, used verbatim and case-sensitive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Scopes the listing to one contributor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            filter: ALL_FILTER_SLUG.to_string(),
            sort_by: SortBy::default(),
            sort_direction: None,
            tags: None,
            username: None,
        }
    }
}

/// Sentinel slug meaning "no category filter"
pub const ALL_FILTER_SLUG: &str = "all";

impl ViewState {
    /// Whether a category filter is in effect (slug present and not the sentinel).
    pub fn has_category_filter(&self) -> bool {
        self.filter != ALL_FILTER_SLUG
    }

    /// New state on the given 1-based page, everything else untouched.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// New state with a different category filter.
    ///
    /// Switching context always returns to the first page.
    pub fn with_filter(&self, slug: impl Into<String>) -> Self {
        Self {
            page: 1,
            filter: slug.into(),
            ..self.clone()
        }
    }

    /// New state with a different sort order, back on the first page.
    pub fn with_sort(&self, sort_by: SortBy) -> Self {
        Self {
            page: 1,
            sort_by,
            ..self.clone()
        }
    }
}
