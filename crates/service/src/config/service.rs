use std::sync::Arc;

use models::{ConfigRecord, Metadata};
use tracing::{info, instrument, warn};

use crate::config::repository::ConfigRepository;
use crate::config::search::SearchQuery;
use crate::errors::ServiceError;

/// Application service for config records.
/// Sits between the HTTP layer and whichever repository was injected at startup.
pub struct ConfigService<R: ConfigRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as shared by request handlers.
pub type DynConfigService = ConfigService<dyn ConfigRepository>;

impl<R: ConfigRepository + ?Sized> ConfigService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<ConfigRecord>, ServiceError> {
        let configs = self.repo.list().map_err(|e| {
            warn!(error = %e, "failed to list configs");
            e
        })?;
        info!(count = configs.len(), "listed configs");
        Ok(configs)
    }

    #[instrument(skip(self, config), fields(name = %config.name))]
    pub fn create(&self, config: ConfigRecord) -> Result<(), ServiceError> {
        models::config::validate_name(&config.name)?;
        self.repo.save(config)?;
        info!("config created");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn get(&self, name: &str) -> Result<ConfigRecord, ServiceError> {
        self.repo.get(name)
    }

    #[instrument(skip(self, metadata))]
    pub fn update(&self, name: &str, metadata: Metadata) -> Result<(), ServiceError> {
        self.repo.update(name, metadata)?;
        info!("config updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn delete(&self, name: &str) -> Result<(), ServiceError> {
        self.repo.delete(name)?;
        info!("config deleted");
        Ok(())
    }

    #[instrument(skip(self, query), fields(predicates = query.len()))]
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<ConfigRecord>, ServiceError> {
        let configs = self.repo.search(query).map_err(|e| {
            warn!(error = %e, "search failed");
            e
        })?;
        info!(count = configs.len(), "search finished");
        Ok(configs)
    }
}

impl<R: ConfigRepository + ?Sized> Clone for ConfigService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}
