//! `catalog-controller`
//!
//! **Responsibility:** mediate UI intents (refresh, open form, save, remove,
//! import) against a [`catalog_store::CatalogStore`].
//!
//! The controller holds the displayed product list, a loading flag and an
//! optional error message. The list is only ever replaced wholesale from the
//! store, never patched locally. Store failures end up in the error message;
//! intents themselves always complete.

pub mod confirm;
pub mod controller;
pub mod state;

pub use confirm::{AlwaysConfirm, Confirm, ConfirmWith, NeverConfirm, confirm_with};
pub use controller::{CatalogController, ImportOutcome, RemoveOutcome, SaveOutcome};
pub use state::CatalogView;
