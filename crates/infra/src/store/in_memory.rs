use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value as JsonValue;

use storefront_catalog::{DocumentFilter, Product};
use storefront_core::Group;

use super::{CatalogStore, CatalogStoreError};

/// In-memory catalog store for tests/dev.
///
/// Insertion order is storage order. Every mutation is a single push or
/// extend, so a lock poisoned by a panicking holder is recovered rather than
/// reported.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    collections: RwLock<HashMap<Group, Vec<Product>>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<Group, Vec<Product>>> {
        self.collections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Group, Vec<Product>>> {
        self.collections.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, group: Group, product: Product) {
        self.write().entry(group).or_default().push(product);
    }

    pub fn extend(&self, group: Group, products: impl IntoIterator<Item = Product>) {
        self.write().entry(group).or_default().extend(products);
    }

    /// Load a seed of the form `{ "<GROUP NAME>": [document, ...], ... }`.
    ///
    /// Returns the number of documents loaded.
    pub fn load_json(&self, seed: JsonValue) -> Result<usize, CatalogStoreError> {
        let JsonValue::Object(groups) = seed else {
            return Err(CatalogStoreError::Decode(
                "seed must be an object keyed by group name".to_string(),
            ));
        };

        let mut loaded = 0;
        for (name, docs) in groups {
            let group: Group = name
                .parse()
                .map_err(|e| CatalogStoreError::Decode(format!("{e}")))?;
            let products: Vec<Product> = serde_json::from_value(docs)
                .map_err(|e| CatalogStoreError::Decode(format!("{group}: {e}")))?;
            loaded += products.len();
            self.extend(group, products);
        }

        Ok(loaded)
    }

    pub fn len(&self, group: Group) -> usize {
        self.read().get(&group).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.read().values().all(Vec::is_empty)
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find_one(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Option<Product>, CatalogStoreError> {
        Ok(self
            .read()
            .get(&group)
            .and_then(|docs| docs.iter().find(|p| filter.matches(p)))
            .cloned())
    }

    async fn find(
        &self,
        group: Group,
        filter: &DocumentFilter,
    ) -> Result<Vec<Product>, CatalogStoreError> {
        Ok(self
            .read()
            .get(&group)
            .map(|docs| docs.iter().filter(|p| filter.matches(p)).cloned().collect())
            .unwrap_or_default())
    }
}
