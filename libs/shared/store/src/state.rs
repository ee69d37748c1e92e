use std::sync::Arc;

use shared_config::AppConfig;

use crate::memory::MemoryStore;

/// Shared axum state: configuration plus the process-wide store.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<MemoryStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        Self { config, store }
    }
}
