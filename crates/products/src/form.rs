//! In-progress product form state.

use crate::product::{NewProduct, Product, ProductPatch};
use crate::specs::{SpecsInput, specs_to_text};
use crate::validation::{FormField, ValidationErrors, validate};

/// Editable fields of a product, as entered by a user.
///
/// Covers every product field except the id and the financial fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub model_code: String,
    pub commercial_name: String,
    pub category: String,
    pub ncm_code: String,
    pub active: bool,
    pub description: String,
    pub specs: SpecsInput,
}

impl ProductForm {
    /// Empty form for a new product: blank text, active, no specs.
    pub fn blank() -> Self {
        Self {
            model_code: String::new(),
            commercial_name: String::new(),
            category: String::new(),
            ncm_code: String::new(),
            active: true,
            description: String::new(),
            specs: SpecsInput::default(),
        }
    }

    /// Form seeded from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            model_code: product.model_code().to_string(),
            commercial_name: product.commercial_name().to_string(),
            category: product.category().to_string(),
            ncm_code: product.ncm_code().to_string(),
            active: product.is_active(),
            description: product.description().to_string(),
            specs: SpecsInput::Parsed(product.specs().clone()),
        }
    }

    /// Replace specs with raw JSON text; parsed on validation.
    pub fn set_specs_text(&mut self, text: impl Into<String>) {
        self.specs = SpecsInput::Text(text.into());
    }

    /// Specs rendered for a text editor.
    pub fn specs_text(&self) -> String {
        match &self.specs {
            SpecsInput::Parsed(specs) => specs_to_text(specs),
            SpecsInput::Text(text) => text.clone(),
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        validate(self)
    }

    /// Validate and convert into create input.
    pub fn to_new_product(&self) -> Result<NewProduct, ValidationErrors> {
        validate(self).into_result()?;
        let specs = self.specs.resolve().map_err(|e| {
            let mut errors = ValidationErrors::new();
            errors.insert(FormField::Specs, e.to_string());
            errors
        })?;

        Ok(NewProduct {
            model_code: self.model_code.clone(),
            commercial_name: self.commercial_name.clone(),
            category: self.category.clone(),
            ncm_code: self.ncm_code.clone(),
            active: self.active,
            description: self.description.clone(),
            specs,
        })
    }

    /// Validate and convert into an update patch covering every editable field.
    pub fn to_patch(&self) -> Result<ProductPatch, ValidationErrors> {
        self.to_new_product().map(ProductPatch::from_fields)
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::blank()
    }
}
