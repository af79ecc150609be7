use std::path::Path;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use storefront_infra::{
    CatalogQueryService, CatalogStore, CatalogStoreError, InMemoryCatalogStore,
    PostgresCatalogStore, StoreConfig,
};

/// Store handle shared by every request.
pub type SharedStore = Arc<dyn CatalogStore>;

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: String,
        source: std::io::Error,
    },

    #[error("seed file {path} is not valid JSON: {source}")]
    SeedParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to connect to Postgres: {0}")]
    Connect(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] CatalogStoreError),
}

/// Application services handed to every handler through an `Extension`.
pub struct AppServices {
    catalog: CatalogQueryService<SharedStore>,
    backend: &'static str,
}

impl AppServices {
    pub fn new(store: SharedStore, backend: &'static str) -> Self {
        Self {
            catalog: CatalogQueryService::new(store),
            backend,
        }
    }

    /// In-memory services over an already populated store (dev/test).
    pub fn in_memory(store: Arc<InMemoryCatalogStore>) -> Self {
        Self::new(store, "in_memory")
    }

    pub fn catalog(&self) -> &CatalogQueryService<SharedStore> {
        &self.catalog
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

pub async fn build_services(config: &StoreConfig) -> Result<AppServices, ServicesError> {
    match config {
        StoreConfig::InMemory { seed_file } => build_in_memory_services(seed_file.as_deref()).await,
        StoreConfig::Postgres { database_url } => build_persistent_services(database_url).await,
    }
}

async fn build_in_memory_services(seed_file: Option<&Path>) -> Result<AppServices, ServicesError> {
    let store = Arc::new(InMemoryCatalogStore::new());

    match seed_file {
        Some(path) => {
            let shown = path.display().to_string();
            let raw = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ServicesError::SeedRead {
                    path: shown.clone(),
                    source,
                })?;
            let seed = serde_json::from_str(&raw).map_err(|source| ServicesError::SeedParse {
                path: shown.clone(),
                source,
            })?;
            let loaded = store.load_json(seed)?;
            tracing::info!(path = %shown, documents = loaded, "seeded in-memory catalog");
        }
        None => {
            tracing::warn!("STOREFRONT_SEED_FILE not set; serving an empty in-memory catalog");
        }
    }

    Ok(AppServices::in_memory(store))
}

async fn build_persistent_services(database_url: &str) -> Result<AppServices, ServicesError> {
    let pool = PgPool::connect(database_url).await?;
    let store = Arc::new(PostgresCatalogStore::new(pool));
    store.ensure_schema().await?;

    tracing::info!("using Postgres catalog store");
    Ok(AppServices::new(store, "postgres"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unseeded_in_memory_services_are_empty() {
        let services = build_services(&StoreConfig::InMemory { seed_file: None })
            .await
            .unwrap();
        assert_eq!(services.backend(), "in_memory");
        assert!(services
            .catalog()
            .list_categories("HEAL")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn seed_file_populates_in_memory_catalog() {
        let path = std::env::temp_dir().join(format!(
            "storefront-seed-{}.json",
            std::process::id()
        ));
        tokio::fs::write(
            &path,
            r#"{ "TOGS": [ { "productId": "T-1", "category": { "name": "SCHOOL" }, "isDeleted": false } ] }"#,
        )
        .await
        .unwrap();

        let services = build_services(&StoreConfig::InMemory {
            seed_file: Some(path.clone()),
        })
        .await
        .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        let categories = services.catalog().list_categories("TOGS").await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].category.as_deref(), Some("SCHOOL"));
    }

    #[tokio::test]
    async fn missing_seed_file_is_reported() {
        let config = StoreConfig::InMemory {
            seed_file: Some("/definitely/not/here.json".into()),
        };
        assert!(matches!(
            build_services(&config).await,
            Err(ServicesError::SeedRead { .. })
        ));
    }
}
