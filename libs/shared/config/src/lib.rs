use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Path of the JSON store document. Empty means in-memory only.
    pub data_path: String,
    /// Seed the demo doctor catalog into an empty store at startup.
    pub seed_catalog: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            bind_addr: env::var("DOCSPOT_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            data_path: env::var("DOCSPOT_DATA_PATH")
                .unwrap_or_else(|_| {
                    warn!("DOCSPOT_DATA_PATH not set, records will not survive restarts");
                    String::new()
                }),
            seed_catalog: env::var("DOCSPOT_SEED_CATALOG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        if !config.is_persistent() {
            warn!("Running with an in-memory record store");
        }

        config
    }

    pub fn is_persistent(&self) -> bool {
        !self.data_path.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            data_path: String::new(),
            seed_catalog: false,
        }
    }
}
