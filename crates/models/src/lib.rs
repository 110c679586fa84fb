//! Domain types for named configuration records and their metadata.

pub mod config;
pub mod errors;
pub mod metadata;

pub use config::ConfigRecord;
pub use metadata::Metadata;
