//! `storefront-core`: catalog foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod group;

pub use error::{CatalogError, CatalogResult};
pub use group::Group;
