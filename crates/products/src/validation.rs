//! Form validation.
//!
//! Every field is checked independently; all violations are reported at once.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::form::ProductForm;
use crate::product::{NewProduct, ProductPatch};

/// Validated form fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    ModelCode,
    CommercialName,
    Category,
    NcmCode,
    Description,
    Specs,
}

impl FormField {
    pub const REQUIRED: [FormField; 5] = [
        FormField::ModelCode,
        FormField::CommercialName,
        FormField::Category,
        FormField::NcmCode,
        FormField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::ModelCode => "model_code",
            FormField::CommercialName => "commercial_name",
            FormField::Category => "category",
            FormField::NcmCode => "ncm_code",
            FormField::Description => "description",
            FormField::Specs => "specs",
        }
    }

    /// Message for a blank required field; `None` for fields that may be empty.
    fn required_message(&self) -> Option<&'static str> {
        match self {
            FormField::ModelCode => Some("model code is required"),
            FormField::CommercialName => Some("commercial name is required"),
            FormField::Category => Some("category is required"),
            FormField::NcmCode => Some("NCM code is required"),
            FormField::Description => Some("description is required"),
            FormField::Specs => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Failing fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Only the empty string is blank; whitespace is content.
    fn require(&mut self, field: FormField, value: &str) {
        if !value.is_empty() {
            return;
        }
        if let Some(message) = field.required_message() {
            self.insert(field, message);
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a product form. Pure; never touches a store.
pub fn validate(form: &ProductForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.require(FormField::ModelCode, &form.model_code);
    errors.require(FormField::CommercialName, &form.commercial_name);
    errors.require(FormField::Category, &form.category);
    errors.require(FormField::NcmCode, &form.ncm_code);
    errors.require(FormField::Description, &form.description);

    if let Err(e) = form.specs.resolve() {
        errors.insert(FormField::Specs, e.to_string());
    }

    errors
}

/// Required-field check applied by stores before accepting a new record.
pub fn check_new(fields: &NewProduct) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.require(FormField::ModelCode, &fields.model_code);
    errors.require(FormField::CommercialName, &fields.commercial_name);
    errors.require(FormField::Category, &fields.category);
    errors.require(FormField::NcmCode, &fields.ncm_code);
    errors.require(FormField::Description, &fields.description);
    errors
}

/// Required-field check for a patch; only fields present in the patch count.
pub fn check_patch(patch: &ProductPatch) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let present = [
        (FormField::ModelCode, &patch.model_code),
        (FormField::CommercialName, &patch.commercial_name),
        (FormField::Category, &patch.category),
        (FormField::NcmCode, &patch.ncm_code),
        (FormField::Description, &patch.description),
    ];
    for (field, value) in present {
        if let Some(value) = value {
            errors.require(field, value);
        }
    }
    errors
}
