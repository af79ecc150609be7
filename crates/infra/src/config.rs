//! Store configuration loaded from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `USE_PERSISTENT_STORES` | use the Postgres catalog store | `false` |
//! | `DATABASE_URL` | Postgres connection string | required when persistent |
//! | `STOREFRONT_SEED_FILE` | JSON seed for the in-memory store | none |

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")]
    MissingDatabaseUrl,
}

/// Which catalog store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory { seed_file: Option<PathBuf> },
    Postgres { database_url: String },
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let use_persistent = lookup("USE_PERSISTENT_STORES")
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        if use_persistent {
            let database_url = lookup("DATABASE_URL")
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingDatabaseUrl)?;
            return Ok(StoreConfig::Postgres { database_url });
        }

        Ok(StoreConfig::InMemory {
            seed_file: lookup("STOREFRONT_SEED_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn backend(&self) -> &'static str {
        match self {
            StoreConfig::InMemory { .. } => "in_memory",
            StoreConfig::Postgres { .. } => "postgres",
        }
    }
}
