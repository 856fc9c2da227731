//! Application state management.
//!
//! The state carries the configuration and the store backing the staffing
//! repositories: a PostgreSQL pool when `DATABASE_URL` is set, otherwise the
//! process-local in-memory store.

use database::postgres::{self, DatabaseConnection};
use domain_staffing::{InMemoryStore, seed_demo_data};
use migration::Migrator;
use tracing::{info, warn};

use crate::config::Config;

/// Where records live
#[derive(Clone)]
pub enum Store {
    Postgres(DatabaseConnection),
    Memory(InMemoryStore),
}

impl Store {
    pub fn kind(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

/// Shared application state.
///
/// Cloned into the ready router; both variants of [`Store`] are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub store: Store,
}

impl AppState {
    /// Connects the configured store, applying migrations or demo data as asked.
    pub async fn connect(config: Config) -> eyre::Result<Self> {
        let store = match config.database.clone() {
            Some(database) => {
                let db = postgres::connect_from_config_with_retry(database, None)
                    .await
                    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

                if config.run_migrations {
                    postgres::run_migrations::<Migrator>(&db, config.app.name)
                        .await
                        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
                }
                if config.seed_demo_data {
                    warn!("SEED_DEMO_DATA is ignored with PostgreSQL");
                }
                Store::Postgres(db)
            }
            None => {
                warn!("DATABASE_URL not set; records are kept in memory and lost on restart");
                let store = InMemoryStore::new();
                if config.seed_demo_data {
                    seed_demo_data(&store, &store, &store)
                        .await
                        .map_err(|e| eyre::eyre!("Seeding demo data failed: {}", e))?;
                }
                Store::Memory(store)
            }
        };

        info!(store = store.kind(), "Store ready");
        Ok(Self { config, store })
    }

    /// In-memory state, used by tests.
    #[cfg(test)]
    pub fn in_memory(store: InMemoryStore) -> Self {
        use core_config::{app_info, server::ServerConfig};

        Self {
            config: Config {
                app: app_info!(),
                database: None,
                server: ServerConfig::default(),
                environment: crate::config::Environment::Development,
                run_migrations: false,
                seed_demo_data: false,
            },
            store: Store::Memory(store),
        }
    }
}
