//! Service layer for config records.
//! - `config::repository` owns the records and the lock that guards them.
//! - `config::search` evaluates metadata predicates.
//! - `config::service` is what request handlers call into.

pub mod errors;
pub mod config;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
