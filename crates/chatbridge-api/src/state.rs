use std::sync::Arc;

use chatbridge_llm::InferenceClient;
use chatbridge_persist::ExchangeStore;

use crate::bridge::ConnectionRegistry;
use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The registry lives here rather than in a global so its lifetime is the
/// server's lifetime.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub inference: Arc<dyn InferenceClient>,
    pub store: Arc<dyn ExchangeStore>,
    pub registry: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new(
        config: Config,
        inference: Arc<dyn InferenceClient>,
        store: Arc<dyn ExchangeStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            inference,
            store,
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }
}
