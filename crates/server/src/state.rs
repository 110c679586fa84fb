use std::sync::Arc;

use service::config::{ConfigRepository, ConfigService, DynConfigService};

/// Shared by every handler. Holds the one repository created at startup.
#[derive(Clone)]
pub struct ServerState {
    pub config_svc: Arc<DynConfigService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn ConfigRepository>) -> Self {
        Self { config_svc: Arc::new(ConfigService::new(repo)) }
    }
}
