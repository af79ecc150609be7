//! Infrastructure layer: catalog stores, configuration, and the query service.

pub mod config;
pub mod query_service;
pub mod store;


pub use config::{ConfigError, StoreConfig};
pub use query_service::{CatalogQueryService, QueryError};
pub use store::{CatalogStore, CatalogStoreError, InMemoryCatalogStore, PostgresCatalogStore};
