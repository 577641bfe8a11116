//! `catalog-core`: shared building blocks for the product catalog.
//!
//! This crate contains **pure domain** primitives (no storage, no async).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::ProductId;
