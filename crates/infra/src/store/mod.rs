//! Catalog Store boundary.
//!
//! A document collection per group, queried with equality filters. Results come
//! back in storage order; "first wins" deduplication upstream relies on that.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use storefront_catalog::{DocumentFilter, Product};
use storefront_core::Group;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Catalog store operation error.
///
/// These are **infrastructure errors** (connectivity, malformed documents) as
/// opposed to domain errors (unknown group, missing filter).
#[derive(Debug, Clone, Error)]
pub enum CatalogStoreError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("failed to decode document: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the per-group product collections.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// First matching document in storage order.
    async fn find_one(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Option<Product>, CatalogStoreError>;

    /// All matching documents in storage order.
    async fn find(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Vec<Product>, CatalogStoreError>;
}

#[async_trait::async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn find_one(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Option<Product>, CatalogStoreError> {
        (**self).find_one(group, filter).await
    }

    async fn find(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Vec<Product>, CatalogStoreError> {
        (**self).find(group, filter).await
    }
}
