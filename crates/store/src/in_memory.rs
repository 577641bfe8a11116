use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_products::validation::{check_new, check_patch};
use catalog_products::{Financials, NewProduct, Product, ProductPatch};

use crate::latency::Latency;
use crate::r#trait::{CatalogStore, StoreError};

/// In-memory catalog store.
///
/// Products live in a `Vec` so `list` preserves insertion order. Every instance
/// is independent; construct one per test or per process.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    products: RwLock<Vec<Product>>,
    latency: Latency,
}

impl InMemoryCatalogStore {
    /// Empty store, no latency.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Latency) -> Self {
        Self {
            products: RwLock::new(Vec::new()),
            latency,
        }
    }

    /// Store pre-populated with the demo catalog.
    pub fn seeded(latency: Latency) -> Self {
        Self::with_products(crate::seed::demo_products(), latency)
    }

    /// Store pre-populated with the given records (ids kept as-is).
    pub fn with_products(products: Vec<Product>, latency: Latency) -> Self {
        Self {
            products: RwLock::new(products),
            latency,
        }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.latency.wait().await;
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products.clone())
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        check_new(&fields)
            .into_result()
            .map_err(StoreError::Rejected)?;
        self.latency.wait().await;

        let product = Product::create(ProductId::new(), fields, Financials::default());
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        products.push(product.clone());

        tracing::debug!(product_id = %product.id(), model_code = product.model_code(), "product created");
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        check_patch(&patch)
            .into_result()
            .map_err(StoreError::Rejected)?;
        self.latency.wait().await;

        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let Some(product) = products.iter_mut().find(|p| p.id() == id) else {
            tracing::debug!(product_id = %id, "update target not found");
            return Ok(None);
        };

        product.apply(patch);
        tracing::debug!(product_id = %id, "product updated");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        self.latency.wait().await;

        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let before = products.len();
        products.retain(|p| p.id() != id);
        let removed = products.len() < before;

        tracing::debug!(product_id = %id, removed, "product delete");
        Ok(removed)
    }

    /// All-or-nothing: if any record fails the required-field check, nothing
    /// is inserted.
    async fn create_bulk(&self, batch: Vec<NewProduct>) -> Result<Vec<Product>, StoreError> {
        for fields in &batch {
            check_new(fields).into_result().map_err(StoreError::Rejected)?;
        }
        self.latency.wait_bulk().await;

        let created: Vec<Product> = batch
            .into_iter()
            .map(|fields| Product::create(ProductId::new(), fields, Financials::default()))
            .collect();

        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        products.extend(created.iter().cloned());

        tracing::debug!(count = created.len(), "products bulk created");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use catalog_products::{FormField, SpecValue, Specs};

    use super::*;

    fn fields(model_code: &str) -> NewProduct {
        NewProduct {
            model_code: model_code.to_string(),
            commercial_name: "Test Machine".to_string(),
            category: "Flat Embroidery".to_string(),
            ncm_code: "8447.90.90".to_string(),
            active: true,
            description: "Test description.".to_string(),
            specs: Specs::new(),
        }
    }

    fn specs(pairs: &[(&str, i64)]) -> Specs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SpecValue::from(*v)))
            .collect()
    }

    #[tokio::test]
    async fn create_assigns_id_and_default_financials() {
        let store = InMemoryCatalogStore::new();
        let product = store.create(fields("BEKY-Y912")).await.unwrap();

        assert_eq!(product.model_code(), "BEKY-Y912");
        assert_eq!(product.financials(), &Financials::default());
        assert!(product.specs().is_empty());
        assert_eq!(store.list().await.unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryCatalogStore::new();
        for code in ["A-1", "B-2", "C-3"] {
            store.create(fields(code)).await.unwrap();
        }

        let codes: Vec<_> = store
            .list()
            .await
            .unwrap()
            .iter()
            .map(|p| p.model_code().to_string())
            .collect();
        assert_eq!(codes, vec!["A-1", "B-2", "C-3"]);
    }

    #[tokio::test]
    async fn list_is_a_snapshot() {
        let store = InMemoryCatalogStore::new();
        store.create(fields("A-1")).await.unwrap();

        let snapshot = store.list().await.unwrap();
        store.create(fields("B-2")).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_blank_required_fields() {
        let store = InMemoryCatalogStore::new();
        let mut bad = fields("A-1");
        bad.ncm_code = String::new();

        match store.create(bad).await.unwrap_err() {
            StoreError::Rejected(errors) => {
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::NcmCode]);
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_specs_wholesale() {
        let store = InMemoryCatalogStore::new();
        let mut with_specs = fields("A-1");
        with_specs.specs = specs(&[("a", 1), ("b", 2)]);
        let product = store.create(with_specs).await.unwrap();

        let updated = store
            .update(
                product.id(),
                ProductPatch {
                    specs: Some(specs(&[("c", 3)])),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.specs(), &specs(&[("c", 3)]));
        assert_eq!(updated.id(), product.id());
        assert_eq!(updated.model_code(), "A-1");
    }

    #[tokio::test]
    async fn update_preserves_financials_unless_supplied() {
        let store = InMemoryCatalogStore::seeded(Latency::none());
        let original = store.list().await.unwrap().remove(0);

        let updated = store
            .update(
                original.id(),
                ProductPatch {
                    description: Some("New memo".to_string()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.financials(), original.financials());
        assert_eq!(updated.description(), "New memo");
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_none_and_changes_nothing() {
        let store = InMemoryCatalogStore::seeded(Latency::none());
        let before = store.list().await.unwrap();

        let result = store
            .update(
                ProductId::new(),
                ProductPatch {
                    commercial_name: Some("Ghost".to_string()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_rejects_blanking_a_required_field() {
        let store = InMemoryCatalogStore::new();
        let product = store.create(fields("A-1")).await.unwrap();

        let err = store
            .update(
                product.id(),
                ProductPatch {
                    model_code: Some(String::new()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.list().await.unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn whitespace_only_fields_are_accepted() {
        let store = InMemoryCatalogStore::new();
        let product = store.create(fields(" ")).await.unwrap();
        assert_eq!(product.model_code(), " ");

        let updated = store
            .update(
                product.id(),
                ProductPatch {
                    description: Some("   ".to_string()),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description(), "   ");
        assert_eq!(store.list().await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn delete_twice_reports_true_then_false() {
        let store = InMemoryCatalogStore::seeded(Latency::none());
        let before = store.list().await.unwrap();
        let id = before[1].id();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());

        let after = store.list().await.unwrap();
        assert_eq!(after.len(), before.len() - 1);
        assert!(after.iter().all(|p| p.id() != id));
    }

    #[tokio::test]
    async fn bulk_create_is_all_or_nothing() {
        let store = InMemoryCatalogStore::new();
        let mut bad = fields("B-2");
        bad.description = String::new();

        let err = store
            .create_bulk(vec![fields("A-1"), bad, fields("C-3")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(store.list().await.unwrap().is_empty());

        let created = store
            .create_bulk(vec![fields("A-1"), fields("C-3")])
            .await
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id(), created[1].id());
        assert!(created.iter().all(|p| p.financials() == &Financials::default()));
        assert_eq!(store.list().await.unwrap(), created);
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let store = std::sync::Arc::new(InMemoryCatalogStore::new());
        let other = store.clone();
        other.create(fields("A-1")).await.unwrap();
        assert_eq!(CatalogStore::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn operations_wait_for_configured_latency() {
        let latency = Latency::fixed(Duration::from_millis(300)).with_bulk(Duration::from_millis(500));
        let store = InMemoryCatalogStore::with_latency(latency);

        let start = tokio::time::Instant::now();
        store.list().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));

        let start = tokio::time::Instant::now();
        store.create_bulk(vec![fields("A-1")]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn independent_instances_do_not_share_state() {
        let a = InMemoryCatalogStore::new();
        let b = InMemoryCatalogStore::new();
        a.create(fields("A-1")).await.unwrap();
        assert!(b.list().await.unwrap().is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: ids assigned across any sequence of creates are pairwise distinct.
            #[test]
            fn created_ids_are_unique(codes in proptest::collection::vec("[A-Z]{2,6}-[0-9]{1,4}", 1..50)) {
                let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                let ids: Vec<ProductId> = rt.block_on(async {
                    let store = InMemoryCatalogStore::new();
                    let mut ids = Vec::new();
                    for code in &codes {
                        ids.push(store.create(fields(code)).await.unwrap().id());
                    }
                    ids
                });

                let distinct: HashSet<_> = ids.iter().copied().collect();
                prop_assert_eq!(distinct.len(), codes.len());
            }
        }
    }
}
