use std::sync::Arc;

use carriersim_core::config::{AppConfig, ConfigError, LoadOptions};
use carriersim_core::{PolicyLifecycle, PolicyStore, QuoteEngine, QuoteStore};
use tracing::info;

use crate::routes::AppState;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, ConfigError> {
    let config = AppConfig::load(options)?;
    Ok(bootstrap_with_config(config))
}

/// Wire the stores into the engine and lifecycle. The quote store is shared:
/// the engine populates it and the lifecycle reads it during binding.
pub fn bootstrap_with_config(config: AppConfig) -> Application {
    let quotes = Arc::new(QuoteStore::new());
    let policies = Arc::new(PolicyStore::new());

    let engine = Arc::new(QuoteEngine::new(quotes.clone()));
    let lifecycle = Arc::new(PolicyLifecycle::new(quotes, policies));

    info!(
        event_name = "system.bootstrap.stores_wired",
        "quote and policy stores initialized"
    );

    let api_key = config.auth.api_key.clone();
    Application { config, state: AppState { engine, lifecycle, api_key } }
}
