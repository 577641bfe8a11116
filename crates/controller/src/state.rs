//! Controller-held view state.

use std::sync::{PoisonError, RwLock};

use catalog_products::Product;

/// What a UI renders: the product list, the loading flag and the last error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Shared, lock-protected [`CatalogView`].
///
/// Locks are never held across an await. A poisoned lock is recovered rather
/// than propagated, since the view is replaced wholesale anyway.
#[derive(Debug, Default)]
pub(crate) struct ViewCell {
    inner: RwLock<CatalogView>,
}

impl ViewCell {
    pub(crate) fn read<R>(&self, f: impl FnOnce(&CatalogView) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut CatalogView) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Marks the view as loading (and clears the previous error) for its lifetime.
///
/// Dropping the guard clears the flag on every exit path.
pub(crate) struct LoadingGuard<'a> {
    view: &'a ViewCell,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn begin(view: &'a ViewCell) -> Self {
        view.write(|v| {
            v.loading = true;
            v.error = None;
        });
        Self { view }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.write(|v| v.loading = false);
    }
}
