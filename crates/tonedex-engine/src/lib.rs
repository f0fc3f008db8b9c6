// Engine module - pure listing logic (no I/O, no clocks)
// This layer sits between the schema types and the runtime reconciler

pub mod filter;
pub mod pagination;
pub mod query;
pub mod title;

pub use filter::{FilterOption, filter_options, resolve, resolve_by_id};
pub use pagination::{PageItem, build_controls, page_count};
pub use query::{decode, decode_raw, encode, merge};
pub use title::{ListingTitle, format_number};
