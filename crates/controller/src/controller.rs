use tokio::sync::Mutex;

use catalog_core::ProductId;
use catalog_products::{
    NewProduct, Product, ProductForm, ProductPatch, ValidationErrors, validate,
};
use catalog_store::CatalogStore;

use crate::confirm::Confirm;
use crate::state::{CatalogView, LoadingGuard, ViewCell};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

const LOAD_FAILED: &str = "failed to load products";
const CREATE_FAILED: &str = "failed to create product";
const UPDATE_FAILED: &str = "failed to update product";
const DELETE_FAILED: &str = "failed to delete product";
const IMPORT_FAILED: &str = "failed to import products";
const UPDATE_MISSING: &str = "product no longer exists";

/// Result of a save intent.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Product),
    Updated(Product),
    /// The form did not validate; the store was not called.
    Invalid(ValidationErrors),
    /// The edit target was gone by the time the update reached the store.
    Missing,
    /// The store call failed; see the controller's error message.
    Failed,
}

/// Result of a remove intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// Nothing matched the id; treated as success.
    Missing,
    /// Confirmation declined; the store was not called.
    Cancelled,
    Failed,
}

/// Result of a bulk import intent.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported(Vec<Product>),
    /// Per-row errors, keyed by the row's position in the input.
    Invalid(Vec<(usize, ValidationErrors)>),
    Failed,
}

/// Orchestrates UI intents against a catalog store.
///
/// ## Sequencing
///
/// Every store-touching intent runs under a per-controller intent gate, so
/// intents are serialized in arrival order and the refresh that follows a
/// mutation always observes that mutation. The view lives behind its own lock,
/// so readers never wait on store I/O.
///
/// There is no timeout or cancellation: a stalled store stalls the intent.
/// Wrap calls in `tokio::time::timeout` where bounded latency matters.
pub struct CatalogController<S> {
    store: S,
    view: ViewCell,
    intents: Mutex<()>,
}

impl<S> CatalogController<S>
where
    S: CatalogStore,
{
    /// Controller over `store` with an empty, idle view. Call
    /// [`CatalogController::refresh`] to load the initial list.
    pub fn new(store: S) -> Self {
        Self {
            store,
            view: ViewCell::default(),
            intents: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the current view.
    pub fn snapshot(&self) -> CatalogView {
        self.view.read(CatalogView::clone)
    }

    pub fn products(&self) -> Vec<Product> {
        self.view.read(|v| v.products.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.view.read(|v| v.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.view.read(|v| v.error.clone())
    }

    /// Dismiss the current error message.
    pub fn clear_error(&self) {
        self.view.write(|v| v.error = None);
    }

    pub fn open_create_form(&self) -> ProductForm {
        ProductForm::blank()
    }

    pub fn open_edit_form(&self, product: &Product) -> ProductForm {
        ProductForm::from_product(product)
    }

    /// Pure form validation; see [`catalog_products::validate`].
    pub fn validate(&self, form: &ProductForm) -> ValidationErrors {
        validate(form)
    }

    /// Reload the list from the store.
    pub async fn refresh(&self) {
        let _gate = self.intents.lock().await;
        let _loading = LoadingGuard::begin(&self.view);
        self.reload().await;
    }

    /// Validate, then create (no `existing`) or update (`existing`) and reload.
    ///
    /// Invalid input returns [`SaveOutcome::Invalid`] without touching the
    /// store or the view.
    pub async fn save(&self, form: &ProductForm, existing: Option<ProductId>) -> SaveOutcome {
        let fields = match form.to_new_product() {
            Ok(fields) => fields,
            Err(errors) => {
                tracing::debug!("Save rejected by validation: {}", errors);
                return SaveOutcome::Invalid(errors);
            }
        };

        let _gate = self.intents.lock().await;
        let _loading = LoadingGuard::begin(&self.view);

        match existing {
            None => self.create(fields).await,
            Some(id) => self.update(id, fields).await,
        }
    }

    /// Ask `confirm`, then delete `id` and reload.
    pub async fn remove<C>(&self, id: ProductId, confirm: &C) -> RemoveOutcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT).await {
            tracing::info!("Delete of product {} cancelled", id);
            return RemoveOutcome::Cancelled;
        }

        let _gate = self.intents.lock().await;
        let _loading = LoadingGuard::begin(&self.view);

        match self.store.delete(id).await {
            Ok(removed) => {
                if removed {
                    tracing::info!("Deleted product {}", id);
                } else {
                    tracing::warn!("Delete of product {} matched nothing", id);
                }
                self.reload().await;
                if removed {
                    RemoveOutcome::Removed
                } else {
                    RemoveOutcome::Missing
                }
            }
            Err(err) => {
                tracing::error!("Failed to delete product {}: {}", id, err);
                self.fail(DELETE_FAILED);
                RemoveOutcome::Failed
            }
        }
    }

    /// Validate every row, then create them all in one store call and reload.
    ///
    /// A single invalid row aborts the whole import before the store is called.
    pub async fn import(&self, forms: &[ProductForm]) -> ImportOutcome {
        let mut batch = Vec::with_capacity(forms.len());
        let mut invalid = Vec::new();
        for (row, form) in forms.iter().enumerate() {
            match form.to_new_product() {
                Ok(fields) => batch.push(fields),
                Err(errors) => invalid.push((row, errors)),
            }
        }
        if !invalid.is_empty() {
            tracing::debug!("Import rejected: {} invalid row(s)", invalid.len());
            return ImportOutcome::Invalid(invalid);
        }

        let _gate = self.intents.lock().await;
        let _loading = LoadingGuard::begin(&self.view);

        match self.store.create_bulk(batch).await {
            Ok(created) => {
                tracing::info!("Imported {} product(s)", created.len());
                self.reload().await;
                ImportOutcome::Imported(created)
            }
            Err(err) => {
                tracing::error!("Failed to import products: {}", err);
                self.fail(IMPORT_FAILED);
                ImportOutcome::Failed
            }
        }
    }

    async fn create(&self, fields: NewProduct) -> SaveOutcome {
        match self.store.create(fields).await {
            Ok(product) => {
                tracing::info!("Created product {} ({})", product.id(), product.model_code());
                self.reload().await;
                SaveOutcome::Created(product)
            }
            Err(err) => {
                tracing::error!("Failed to create product: {}", err);
                self.fail(CREATE_FAILED);
                SaveOutcome::Failed
            }
        }
    }

    async fn update(&self, id: ProductId, fields: NewProduct) -> SaveOutcome {
        let patch = ProductPatch::from_fields(fields);
        match self.store.update(id, patch).await {
            Ok(Some(product)) => {
                tracing::info!("Updated product {}", id);
                self.reload().await;
                SaveOutcome::Updated(product)
            }
            Ok(None) => {
                tracing::warn!("Update target {} no longer exists", id);
                self.fail(UPDATE_MISSING);
                self.reload().await;
                SaveOutcome::Missing
            }
            Err(err) => {
                tracing::error!("Failed to update product {}: {}", id, err);
                self.fail(UPDATE_FAILED);
                SaveOutcome::Failed
            }
        }
    }

    /// Replace the held list from the store. Caller holds the gate.
    async fn reload(&self) {
        match self.store.list().await {
            Ok(products) => {
                tracing::debug!("Loaded {} product(s)", products.len());
                self.view.write(|v| v.products = products);
            }
            Err(err) => {
                tracing::error!("Failed to load products: {}", err);
                self.fail(LOAD_FAILED);
            }
        }
    }

    fn fail(&self, message: &str) {
        self.view.write(|v| v.error = Some(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use catalog_products::FormField;
    use catalog_store::{InMemoryCatalogStore, Latency};

    use super::*;
    use crate::confirm::{AlwaysConfirm, NeverConfirm};

    fn seeded() -> CatalogController<InMemoryCatalogStore> {
        CatalogController::new(InMemoryCatalogStore::seeded(Latency::none()))
    }

    fn valid_form() -> ProductForm {
        let mut form = ProductForm::blank();
        form.model_code = "BEKY-W1201".to_string();
        form.commercial_name = "Compact Machine".to_string();
        form.category = "Flat Embroidery".to_string();
        form.ncm_code = "8447.90.90".to_string();
        form.description = "Single-head compact machine.".to_string();
        form.set_specs_text(r#"{"needles": 12, "heads": 1}"#);
        form
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let controller = seeded();
        assert_eq!(controller.snapshot(), CatalogView::default());
    }

    #[tokio::test]
    async fn refresh_loads_store_contents() {
        let controller = seeded();
        controller.refresh().await;

        let view = controller.snapshot();
        assert_eq!(view.products.len(), 3);
        assert!(!view.loading);
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn forms_are_seeded_from_products() {
        let controller = seeded();
        controller.refresh().await;
        let product = controller.products().remove(0);

        let edit = controller.open_edit_form(&product);
        assert_eq!(edit.model_code, product.model_code());
        assert_eq!(edit.to_new_product().unwrap(), product.editable_fields());

        let blank = controller.open_create_form();
        assert_eq!(blank, ProductForm::blank());
        assert_eq!(controller.validate(&blank).len(), 5);
    }

    #[tokio::test]
    async fn edit_and_save_updates_in_place() {
        let controller = seeded();
        controller.refresh().await;
        let product = controller.products().remove(1);

        let mut form = controller.open_edit_form(&product);
        form.commercial_name = "Renamed Cylinder".to_string();

        match controller.save(&form, Some(product.id())).await {
            SaveOutcome::Updated(updated) => {
                assert_eq!(updated.commercial_name(), "Renamed Cylinder");
                assert_eq!(updated.financials(), product.financials());
            }
            other => panic!("Expected Updated, got {other:?}"),
        }

        let products = controller.products();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].commercial_name(), "Renamed Cylinder");
        assert_eq!(products[1].id(), product.id());
    }

    #[tokio::test]
    async fn invalid_specs_text_blocks_save() {
        let controller = seeded();
        let mut form = valid_form();
        form.set_specs_text(r#"{"needles": [1, 2]}"#);

        match controller.save(&form, None).await {
            SaveOutcome::Invalid(errors) => {
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::Specs]);
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
        assert_eq!(controller.store().list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn declined_confirmation_keeps_product() {
        let controller = seeded();
        controller.refresh().await;
        let id = controller.products()[0].id();

        assert_eq!(controller.remove(id, &NeverConfirm).await, RemoveOutcome::Cancelled);
        assert_eq!(controller.store().list().await.unwrap().len(), 3);

        assert_eq!(controller.remove(id, &AlwaysConfirm).await, RemoveOutcome::Removed);
        assert_eq!(controller.products().len(), 2);
        assert_eq!(controller.remove(id, &AlwaysConfirm).await, RemoveOutcome::Missing);
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn import_reports_invalid_rows_by_position() {
        let controller = seeded();
        let mut bad = valid_form();
        bad.category = String::new();

        match controller.import(&[valid_form(), bad]).await {
            ImportOutcome::Invalid(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].0, 1);
                assert!(rows[0].1.contains(FormField::Category));
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
        assert_eq!(controller.store().list().await.unwrap().len(), 3);

        match controller.import(&[valid_form(), valid_form()]).await {
            ImportOutcome::Imported(created) => assert_eq!(created.len(), 2),
            other => panic!("Expected Imported, got {other:?}"),
        }
        assert_eq!(controller.products().len(), 5);
    }

    #[tokio::test]
    async fn clear_error_dismisses_message() {
        let controller = seeded();
        controller.refresh().await;
        let product = controller.products().remove(0);
        controller.store().delete(product.id()).await.unwrap();

        let form = controller.open_edit_form(&product);
        assert_eq!(controller.save(&form, Some(product.id())).await, SaveOutcome::Missing);
        assert_eq!(controller.error().as_deref(), Some("product no longer exists"));
        assert_eq!(controller.products().len(), 2);

        controller.clear_error();
        assert!(controller.error().is_none());
    }
}
