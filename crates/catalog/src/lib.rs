//! Catalog domain module.
//!
//! This crate contains the catalog query rules (hierarchy listings, facet
//! extraction, per-brand response shapes, availability), implemented purely as
//! deterministic functions over product documents (no IO, no HTTP, no storage).

pub mod availability;
pub mod facets;
pub mod filter;
pub mod hierarchy;
pub mod product;
pub mod reference;
mod unique;

pub use availability::{
    AvailableColors, AvailableSizes, ColorAvailability, ProductDetail, ProductListing,
};
pub use facets::{Facet, FacetFilters, FacetResponse, FacetShape, FacetValues};
pub use filter::{DocumentFilter, ProductSelector, SearchCriteria};
pub use hierarchy::{CategoryEntry, GenderProductTypes, GroupEntry, SubCategoryEntry};
pub use product::{NamedImage, Product, ProductId, ProductType, Variant, VariantSize};
pub use reference::ReferenceData;
