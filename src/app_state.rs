use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::error::AppResult;
use crate::seed;
use crate::storage::{MemoryStorage, PostgresStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}

impl AppState {
    /// Builds the storage backend the configuration names and seeds it
    /// with the demo fixture when it is empty.
    pub async fn new(config: Config) -> AppResult<Self> {
        let storage: Arc<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::seeded().await?),
            StorageBackend::Postgres => {
                let storage = PostgresStorage::connect(&config.database.url).await?;
                storage.initialize().await?;
                seed::seed_demo_data(&storage).await?;
                Arc::new(storage)
            }
        };

        Ok(Self { storage, config })
    }
}
