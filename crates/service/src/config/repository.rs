use std::collections::hash_map::Entry;
use std::collections::HashMap;

use models::{ConfigRecord, Metadata};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::search::SearchQuery;
use crate::errors::ServiceError;

/// Storage port for config records.
///
/// Every call is atomic with respect to every other call on the same repository.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigRepository: Send + Sync {
    /// All stored records, in no particular order.
    fn list(&self) -> Result<Vec<ConfigRecord>, ServiceError>;
    /// Insert a new record. A record with the same name yields `AlreadyExists`.
    fn save(&self, config: ConfigRecord) -> Result<(), ServiceError>;
    fn get(&self, name: &str) -> Result<ConfigRecord, ServiceError>;
    /// Replace the metadata of an existing record, keeping its name.
    fn update(&self, name: &str, metadata: Metadata) -> Result<(), ServiceError>;
    fn delete(&self, name: &str) -> Result<(), ServiceError>;
    /// Records whose metadata satisfies every predicate of `query`.
    fn search(&self, query: &SearchQuery) -> Result<Vec<ConfigRecord>, ServiceError>;
}

/// In-memory repository guarded by a single exclusive lock.
#[derive(Debug, Default)]
pub struct InMemoryConfigRepository {
    configs: Mutex<HashMap<String, ConfigRecord>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the repository. Later records replace earlier ones of the same name.
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ConfigRecord>,
    {
        let configs = records.into_iter().map(|c| (c.name.clone(), c)).collect();
        Self { configs: Mutex::new(configs) }
    }

    pub fn len(&self) -> usize {
        self.configs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigRepository for InMemoryConfigRepository {
    fn list(&self) -> Result<Vec<ConfigRecord>, ServiceError> {
        let configs = self.configs.lock();
        Ok(configs.values().cloned().collect())
    }

    fn save(&self, config: ConfigRecord) -> Result<(), ServiceError> {
        let mut configs = self.configs.lock();
        match configs.entry(config.name.clone()) {
            Entry::Occupied(_) => Err(ServiceError::already_exists(&config.name)),
            Entry::Vacant(slot) => {
                debug!(name = %config.name, "config saved");
                slot.insert(config);
                Ok(())
            }
        }
    }

    fn get(&self, name: &str) -> Result<ConfigRecord, ServiceError> {
        let configs = self.configs.lock();
        configs.get(name).cloned().ok_or_else(|| ServiceError::not_found(name))
    }

    fn update(&self, name: &str, metadata: Metadata) -> Result<(), ServiceError> {
        let mut configs = self.configs.lock();
        let existing = configs.get_mut(name).ok_or_else(|| ServiceError::not_found(name))?;
        existing.metadata = metadata;
        debug!(%name, "config metadata replaced");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), ServiceError> {
        let mut configs = self.configs.lock();
        configs.remove(name).ok_or_else(|| ServiceError::not_found(name))?;
        debug!(%name, "config deleted");
        Ok(())
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<ConfigRecord>, ServiceError> {
        let configs = self.configs.lock();
        Ok(configs
            .values()
            .filter(|c| query.matches(&c.metadata))
            .cloned()
            .collect())
    }
}
