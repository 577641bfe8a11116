use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product, ProductPatch, ValidationErrors};

/// Store operation error.
///
/// Backend-boundary failures only. A missing record is never an error here:
/// `update` answers `None` and `delete` answers `false`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing medium cannot be reached (or its state is unusable).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The record would violate the required-field invariant.
    #[error("record rejected: {0}")]
    Rejected(ValidationErrors),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Authoritative set of catalog products.
///
/// ## Contract
///
/// - `list` returns an owned snapshot in insertion order.
/// - `create` assigns a fresh unique id and default financials
///   (rate = factor = 1, prices = 0).
/// - `update` shallow-merges the patch over the stored record: a present field
///   replaces the stored value wholesale, `specs` included. The id and every
///   omitted field stay as they were. Unknown id → `Ok(None)`.
/// - `delete` removes by id and reports whether anything was removed.
///
/// Implementations must refuse records whose required fields are blank
/// (`StoreError::Rejected`) so every stored product satisfies the invariant.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError>;

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Create many products in one call.
    ///
    /// The default runs `create` sequentially and stops at the first failure,
    /// leaving earlier records in place. Backends that can do better should
    /// override it with an all-or-nothing insert.
    async fn create_bulk(&self, batch: Vec<NewProduct>) -> Result<Vec<Product>, StoreError> {
        let mut created = Vec::with_capacity(batch.len());
        for fields in batch {
            created.push(self.create(fields).await?);
        }
        Ok(created)
    }
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list().await
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, StoreError> {
        (**self).create(fields).await
    }

    async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }

    async fn create_bulk(&self, batch: Vec<NewProduct>) -> Result<Vec<Product>, StoreError> {
        (**self).create_bulk(batch).await
    }
}
