//! Internal testing utilities for the tonedex listing engine.

pub mod fixtures;

pub use fixtures::{InMemoryCatalog, sample_categories, tone_model};
