use serde::{Deserialize, Serialize};

use catalog_core::ProductId;

use crate::specs::Specs;

/// Pricing and tax figures attached to a product.
///
/// Not editable through the product form; the store defaults them on creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    /// List price in Japan (JPY).
    pub price_net_jpy: f64,
    /// Real/port cost (JPY).
    pub price_fob_jpy: f64,
    /// Exchange rate used for the final price.
    pub tax_market_rate: f64,
    /// Sales factor (markup).
    pub tax_sales_factor: f64,
    /// Final sale price (BRL).
    pub price_final_brl: f64,
}

impl Default for Financials {
    fn default() -> Self {
        Self {
            price_net_jpy: 0.0,
            price_fob_jpy: 0.0,
            tax_market_rate: 1.0,
            tax_sales_factor: 1.0,
            price_final_brl: 0.0,
        }
    }
}

fn default_active() -> bool {
    true
}

/// A catalog entry as held by the store.
///
/// Fields are read-only from the outside: a product is built by the store on
/// creation and changed only through [`Product::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    model_code: String,
    commercial_name: String,
    category: String,
    ncm_code: String,
    active: bool,
    description: String,
    #[serde(default)]
    specs: Specs,
    #[serde(flatten)]
    financials: Financials,
}

impl Product {
    /// Materialize a new record under a freshly assigned id.
    pub fn create(id: ProductId, fields: NewProduct, financials: Financials) -> Self {
        Self {
            id,
            model_code: fields.model_code,
            commercial_name: fields.commercial_name,
            category: fields.category,
            ncm_code: fields.ncm_code,
            active: fields.active,
            description: fields.description,
            specs: fields.specs,
            financials,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn model_code(&self) -> &str {
        &self.model_code
    }

    pub fn commercial_name(&self) -> &str {
        &self.commercial_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn ncm_code(&self) -> &str {
        &self.ncm_code
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn specs(&self) -> &Specs {
        &self.specs
    }

    pub fn financials(&self) -> &Financials {
        &self.financials
    }

    /// The editable part of this record.
    pub fn editable_fields(&self) -> NewProduct {
        NewProduct {
            model_code: self.model_code.clone(),
            commercial_name: self.commercial_name.clone(),
            category: self.category.clone(),
            ncm_code: self.ncm_code.clone(),
            active: self.active,
            description: self.description.clone(),
            specs: self.specs.clone(),
        }
    }

    /// Shallow-merge a patch: every present field replaces the current value
    /// wholesale (`specs` included). The id never changes.
    pub fn apply(&mut self, patch: ProductPatch) {
        let ProductPatch {
            model_code,
            commercial_name,
            category,
            ncm_code,
            active,
            description,
            specs,
            price_net_jpy,
            price_fob_jpy,
            tax_market_rate,
            tax_sales_factor,
            price_final_brl,
        } = patch;

        replace(&mut self.model_code, model_code);
        replace(&mut self.commercial_name, commercial_name);
        replace(&mut self.category, category);
        replace(&mut self.ncm_code, ncm_code);
        replace(&mut self.active, active);
        replace(&mut self.description, description);
        replace(&mut self.specs, specs);
        replace(&mut self.financials.price_net_jpy, price_net_jpy);
        replace(&mut self.financials.price_fob_jpy, price_fob_jpy);
        replace(&mut self.financials.tax_market_rate, tax_market_rate);
        replace(&mut self.financials.tax_sales_factor, tax_sales_factor);
        replace(&mut self.financials.price_final_brl, price_final_brl);
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Fields accepted by the store's create operation (no id, no financials).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub model_code: String,
    pub commercial_name: String,
    pub category: String,
    pub ncm_code: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub description: String,
    #[serde(default)]
    pub specs: Specs,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ncm_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specs: Option<Specs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_net_jpy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_fob_jpy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_market_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_sales_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_final_brl: Option<f64>,
}

impl ProductPatch {
    /// A patch that overwrites every editable field and leaves financials alone.
    pub fn from_fields(fields: NewProduct) -> Self {
        Self {
            model_code: Some(fields.model_code),
            commercial_name: Some(fields.commercial_name),
            category: Some(fields.category),
            ncm_code: Some(fields.ncm_code),
            active: Some(fields.active),
            description: Some(fields.description),
            specs: Some(fields.specs),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
