//! Product catalog domain module.
//!
//! Record shapes, the open-ended `specs` attribute bag, the edit form and its
//! validation rules. Deterministic logic only (no IO, no async, no storage).

pub mod form;
pub mod product;
pub mod specs;
pub mod validation;

pub use form::ProductForm;
pub use product::{Financials, NewProduct, Product, ProductPatch};
pub use specs::{SpecValue, Specs, SpecsError, SpecsInput};
pub use validation::{FormField, ValidationErrors, validate};
