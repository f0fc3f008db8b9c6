//! Sample catalog data and an in-memory data access layer.
//!
//! `InMemoryCatalog` behaves like the real data layer is contracted to:
//! it computes `total` under the same filter as the returned rows, returns
//! the categories of the whole catalog, and serves the last valid page when
//! the requested page runs past the end.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use tonedex_engine::{page_count, resolve};
use tonedex_runtime::{CountsSource, PageSource};
use tonedex_types::{
    Category, CategoryCount, CategorySet, PageResult, SortBy, ToneModel, ViewState,
};

/// Fixed reference time so fixture ordering is deterministic.
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap()
}

/// The standard two-category fixture set (amps and pedals).
pub fn sample_categories() -> CategorySet {
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
    .expect("fixture categories are valid")
}

/// Build one tone model; `age_days` pushes `created_at` into the past so
/// lower values sort first under newest.
pub fn tone_model(
    title: &str,
    category_id: i64,
    username: &str,
    download_count: u32,
    age_days: i64,
    tags: &[&str],
) -> ToneModel {
    ToneModel {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category_id,
        username: username.to_string(),
        download_count,
        created_at: epoch() - Duration::days(age_days),
    }
}

/// In-memory catalog implementing both collaborator seams.
pub struct InMemoryCatalog {
    categories: CategorySet,
    models: Vec<ToneModel>,
}

impl InMemoryCatalog {
    pub fn new(categories: CategorySet, models: Vec<ToneModel>) -> Self {
        Self { categories, models }
    }

    /// 45 amps and 5 pedals: three pages of amps at the default page size.
    pub fn sample() -> Self {
        let mut models = Vec::new();
        for i in 0..45u32 {
            models.push(tone_model(
                &format!("Amp Capture {:02}", i),
                1,
                if i % 2 == 0 { "ada" } else { "brian" },
                1000u32.saturating_sub(i * 10),
                i as i64,
                if i % 5 == 0 { &["vintage-fuzz"] } else { &[] },
            ));
        }
        for i in 0..5u32 {
            models.push(tone_model(
                &format!("Pedal Capture {:02}", i),
                2,
                "ada",
                50 + i,
                (50 + i) as i64,
                &[],
            ));
        }
        Self::new(sample_categories(), models)
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }
}

impl PageSource for InMemoryCatalog {
    fn fetch_page(&self, state: &ViewState, page_size: u32) -> Result<PageResult> {
        let category = resolve(&state.filter, &self.categories);

        let mut filtered: Vec<ToneModel> = self
            .models
            .iter()
            .filter(|model| category.id == 0 || model.category_id == category.id)
            .filter(|model| {
                state
                    .tags
                    .as_ref()
                    .is_none_or(|tag| model.tags.iter().any(|t| t == tag))
            })
            .filter(|model| {
                state
                    .username
                    .as_ref()
                    .is_none_or(|username| &model.username == username)
            })
            .cloned()
            .collect();

        match state.sort_by {
            SortBy::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Popular => filtered.sort_by(|a, b| b.download_count.cmp(&a.download_count)),
        }

        let total = filtered.len() as u64;
        let pages = page_count(total, page_size);

        // Out-of-range requests get the last valid page, empty catalogs page 0.
        let requested = state.page.saturating_sub(1);
        let page = if pages == 0 {
            0
        } else {
            requested.min(pages - 1)
        };

        let models = filtered
            .into_iter()
            .skip((page * page_size) as usize)
            .take(page_size as usize)
            .collect();

        Ok(PageResult {
            models,
            total,
            page,
            sort_by: state.sort_by,
            sort_direction: state
                .sort_direction
                .clone()
                .unwrap_or_else(|| "desc".to_string()),
            categories: self.categories.clone(),
            filter: category.slug,
        })
    }
}

impl CountsSource for InMemoryCatalog {
    fn aggregate_counts(&self) -> Result<Vec<CategoryCount>> {
        let counts = self
            .categories
            .iter()
            .filter(|category| category.id != 0)
            .map(|category| CategoryCount {
                name: format!("{}s", category.title.to_lowercase()),
                count: self
                    .models
                    .iter()
                    .filter(|model| model.category_id == category.id)
                    .count() as u64,
            })
            .collect();
        Ok(counts)
    }
}
