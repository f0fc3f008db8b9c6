pub mod catalog;
pub mod error;
pub mod listing;

pub use catalog::*;
pub use error::{Error, Result};
pub use listing::*;
