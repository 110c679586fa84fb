//! Config records: storage port, in-memory store, metadata search and the service on top.

pub mod repository;
pub mod search;
pub mod service;

pub use repository::{ConfigRepository, InMemoryConfigRepository};
pub use search::{Predicate, SearchQuery};
pub use service::{ConfigService, DynConfigService};
