use std::fmt;

/// Result type for tonedex-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// Category slug appears more than once in a category set
    DuplicateSlug(String),

    /// Category uses the id or slug reserved for the synthetic "All" entry
    ReservedCategoryId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateSlug(slug) => write!(f, "Duplicate category slug: {}", slug),
            Error::ReservedCategoryId(slug) => {
                write!(f, "Category '{}' uses an id or slug reserved for All", slug)
            }
        }
    }
}

impl std::error::Error for Error {}
