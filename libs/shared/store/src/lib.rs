pub mod backend;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, Snapshot, StoreBackend, StoreError};
pub use store::{RecordStore, SharedStore};

use shared_config::AppConfig;

/// Shared axum state: configuration plus the one record store handle.
pub struct AppState {
    pub config: AppConfig,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        Self { config, store }
    }
}
