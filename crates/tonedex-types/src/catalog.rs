use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::listing::{ALL_FILTER_SLUG, SortBy};

/// Id reserved for the synthetic "All" category
pub const ALL_CATEGORY_ID: i64 = 0;

/// A model category (amp, pedal, cabinet, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    /// Stable, human-readable identifier used in URLs.
    pub slug: String,
}

impl Category {
    /// The synthetic descriptor meaning "no category filter".
    pub fn all() -> Self {
        Self {
            id: ALL_CATEGORY_ID,
            title: "All".to_string(),
            slug: ALL_FILTER_SLUG.to_string(),
        }
    }
}

/// Ordered collection of categories with the synthetic All entry pinned first.
///
/// Domain categories are kept sorted by title. Slugs are unique and id 0 is
/// reserved for the All entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<Category>);

impl CategorySet {
    /// Build a set from domain categories, prepending the synthetic All entry.
    pub fn new(mut categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.id == ALL_CATEGORY_ID || category.slug == ALL_FILTER_SLUG {
                return Err(Error::ReservedCategoryId(category.slug.clone()));
            }
            if !seen.insert(category.slug.clone()) {
                return Err(Error::DuplicateSlug(category.slug.clone()));
            }
        }
        categories.sort_by(|a, b| a.title.cmp(&b.title));

        let mut entries = Vec::with_capacity(categories.len() + 1);
        entries.push(Category::all());
        entries.extend(categories);
        Ok(Self(entries))
    }

    /// An empty set still contains the synthetic All entry.
    pub fn empty() -> Self {
        Self(vec![Category::all()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a category by slug. Returns None for unknown slugs; callers
    /// that need the degrade-to-All behavior go through the filter resolver.
    pub fn by_slug(&self, slug: &str) -> Option<&Category> {
        self.0.iter().find(|c| c.slug == slug)
    }

    pub fn by_id(&self, id: i64) -> Option<&Category> {
        self.0.iter().find(|c| c.id == id)
    }

    /// Whether the slug resolves to a known category (the sentinel counts).
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.by_slug(slug).is_some()
    }
}

/// A user-submitted tone model (amp capture, pedal capture, IR, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneModel {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags attached at submission time, matched verbatim by tag search.
    #[serde(default)]
    pub tags: Vec<String>,
    pub category_id: i64,
    /// Contributor who submitted the model.
    pub username: String,
    pub download_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Aggregate model count for one category name (e.g. "amps", "pedals").
///
/// Consumed only when no filter or tag search is active, to render the
/// default aggregate heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

/// One server-computed page of listing data plus its total count and echoed
/// parameters.
///
/// Produced once per fetch, treated as immutable and replaced wholesale on
/// the next fetch; never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub models: Vec<ToneModel>,
    /// Total record count under the same filter as `models`.
    pub total: u64,
    /// Zero-based page index the data layer actually served. This is the
    /// rendered truth for "current page"; the engine never second-guesses it.
    pub page: u32,
    pub sort_by: SortBy,
    pub sort_direction: String,
    /// Categories valid for the whole catalog, not just the filtered subset.
    pub categories: CategorySet,
    /// Echo of the filter slug the page was computed under.
    pub filter: String,
}
