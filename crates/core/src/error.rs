//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog domain layer.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures that come from the caller's input
/// (unknown brand line, missing mandatory filter). Store failures belong to the
/// infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The group name does not name one of the known brand lines.
    #[error("unsupported group name: {0}")]
    UnsupportedGroup(String),

    /// A filter the operation cannot run without was empty or absent.
    #[error("missing required filter: {0}")]
    MissingFilter(&'static str),

    /// A requested document was not found.
    #[error("not found")]
    NotFound,
}

impl CatalogError {
    pub fn unsupported_group(name: impl Into<String>) -> Self {
        Self::UnsupportedGroup(name.into())
    }

    pub fn missing_filter(name: &'static str) -> Self {
        Self::MissingFilter(name)
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
