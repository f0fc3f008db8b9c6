//! Resolution of symbolic filter slugs against the available categories.
//!
//! Resolution never fails: anything that does not match a known category
//! degrades to the synthetic "All" descriptor. An unresolvable filter is not
//! an error the user ever sees.

use serde::{Deserialize, Serialize};
use tonedex_types::{Category, CategorySet};

/// Resolve a filter slug to its category descriptor, degrading to All.
pub fn resolve(slug: &str, categories: &CategorySet) -> Category {
    categories
        .by_slug(slug)
        .cloned()
        .unwrap_or_else(Category::all)
}

/// Resolve a select-option value (category id) back to its descriptor,
/// degrading to All. Used when a filter change arrives as the option id
/// rather than the slug.
pub fn resolve_by_id(id: i64, categories: &CategorySet) -> Category {
    categories.by_id(id).cloned().unwrap_or_else(Category::all)
}

/// One entry of the filter select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Category id as a string, the value the select control reports back.
    pub value: String,
    pub label: String,
}

/// Select options for every category, All first.
pub fn filter_options(categories: &CategorySet) -> Vec<FilterOption> {
    categories
        .iter()
        .map(|category| FilterOption {
            value: category.id.to_string(),
            label: category.title.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::new(vec![
            Category {
                id: 1,
                title: "Amp".to_string(),
                slug: "amp".to_string(),
            },
            Category {
                id: 2,
                title: "Pedal".to_string(),
                slug: "pedal".to_string(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn known_slug_resolves_to_its_category() {
        let category = resolve("pedal", &categories());
        assert_eq!(category.id, 2);
        assert_eq!(category.title, "Pedal");
    }

    #[test]
    fn unknown_slug_degrades_to_all() {
        let category = resolve("doesnotexist", &categories());
        assert_eq!(category.id, 0);
        assert_eq!(category.slug, "all");
        assert_eq!(category.title, "All");
    }

    #[test]
    fn unknown_id_degrades_to_all() {
        assert_eq!(resolve_by_id(99, &categories()).slug, "all");
        assert_eq!(resolve_by_id(1, &categories()).slug, "amp");
    }

    #[test]
    fn options_list_all_first() {
        let options = filter_options(&categories());
        assert_eq!(
            options,
            vec![
                FilterOption {
                    value: "0".to_string(),
                    label: "All".to_string()
                },
                FilterOption {
                    value: "1".to_string(),
                    label: "Amp".to_string()
                },
                FilterOption {
                    value: "2".to_string(),
                    label: "Pedal".to_string()
                },
            ]
        );
    }
}
