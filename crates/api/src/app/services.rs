use std::sync::Arc;

use storefront_catalog::{CatalogError, CatalogQuery, CatalogStats, CatalogStore, Page, Product};

/// Catalog operations behind the HTTP handlers.
///
/// Every call takes a fresh snapshot from the store, so handlers never hold
/// catalog state between requests.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn CatalogStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn products_list(&self, query: &CatalogQuery) -> Result<Page<Product>, CatalogError> {
        Ok(self.store.snapshot()?.query(query))
    }

    /// `Ok(None)` means no such product; `Err` means the store itself failed.
    pub fn products_get(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.store.snapshot()?.get(id).cloned())
    }

    pub fn products_cheapest(&self, top_n: usize) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.snapshot()?.cheapest_available(top_n))
    }

    pub fn products_stats(&self) -> Result<CatalogStats, CatalogError> {
        Ok(self.store.snapshot()?.stats())
    }
}
