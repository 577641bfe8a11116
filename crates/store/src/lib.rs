//! Catalog store boundary.
//!
//! Defines the asynchronous CRUD contract the controller consumes, plus an
//! in-memory implementation with pluggable latency for dev and tests.

pub mod config;
pub mod in_memory;
pub mod latency;
pub mod seed;
pub mod r#trait;

pub use config::StoreConfig;
pub use in_memory::InMemoryCatalogStore;
pub use latency::Latency;
pub use r#trait::{CatalogStore, StoreError};
