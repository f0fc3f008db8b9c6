//! Derivation of the listing heading from the current view state.
//!
//! Precedence: an active tag search wins over an active category filter,
//! which wins over the default aggregate-counts heading. Tag and filter can
//! coexist in the state (both are forwarded to the data layer); the
//! precedence here only decides what the heading says.

use std::fmt;

use serde::{Deserialize, Serialize};
use tonedex_types::{CategoryCount, CategorySet, ViewState};

/// Renderable heading for the listing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingTitle {
    /// Tag search heading, rendered as `#<tags>`.
    Tag(String),
    /// Pluralized category heading, e.g. "Amps".
    Category(String),
    /// Default heading built from the aggregate category counts.
    Aggregate(Vec<CategoryCount>),
}

impl ListingTitle {
    /// Pick the heading for a view state.
    ///
    /// An unresolvable (non-sentinel) filter slug falls through to the
    /// aggregate heading rather than rendering nothing.
    pub fn for_state(
        state: &ViewState,
        categories: &CategorySet,
        counts: &[CategoryCount],
    ) -> Self {
        if let Some(tags) = &state.tags {
            return Self::Tag(tags.clone());
        }

        if state.has_category_filter()
            && let Some(category) = categories.by_slug(&state.filter)
        {
            return Self::Category(format!("{}s", category.title));
        }

        Self::Aggregate(counts.to_vec())
    }
}

impl fmt::Display for ListingTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(tags) => write!(f, "#{}", tags),
            Self::Category(plural) => write!(f, "{}", plural),
            Self::Aggregate(counts) => {
                let total: u64 = counts.iter().map(|c| c.count).sum();
                let amps = count_for(counts, "amps");
                let pedals = count_for(counts, "pedals");
                write!(
                    f,
                    "Explore over {} models, including {} amps, and {} pedals.",
                    format_number(total),
                    format_number(amps),
                    format_number(pedals)
                )
            }
        }
    }
}

fn count_for(counts: &[CategoryCount], name: &str) -> u64 {
    counts
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.count)
        .unwrap_or(0)
}

/// Group a number with comma separators ("12345" -> "12,345").
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
