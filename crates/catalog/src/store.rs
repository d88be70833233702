//! Catalog storage: an immutable, shareable snapshot plus the store abstraction
//! that hands snapshots out.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use storefront_core::ProductId;

use crate::insights::{self, CatalogStats};
use crate::product::Product;
use crate::query::{self, CatalogQuery, Page};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog snapshot.
///
/// Cloning is cheap (shared slice). Product ids are unique within a snapshot.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for p in &products {
            if !seen.insert(&p.id) {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self {
            products: products.into(),
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn query(&self, query: &CatalogQuery) -> Page<Product> {
        query::query_catalog(&self.products, query)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        query::get_by_id(&self.products, id)
    }

    pub fn cheapest_available(&self, top_n: usize) -> Vec<Product> {
        insights::cheapest_available(&self.products, top_n)
    }

    pub fn stats(&self) -> CatalogStats {
        insights::catalog_stats(&self.products)
    }
}

/// Source of catalog snapshots.
///
/// Implementations must hand out snapshots that never change underneath a
/// caller; a store that reloads swaps in a new snapshot instead of mutating
/// the old one.
pub trait CatalogStore: Send + Sync {
    fn snapshot(&self) -> Result<Catalog, CatalogError>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn snapshot(&self) -> Result<Catalog, CatalogError> {
        (**self).snapshot()
    }
}

/// Catalog loaded once and held in memory for the process lifetime.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    catalog: Catalog,
}

impl InMemoryCatalogStore {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::new(products)?,
        })
    }

    /// Parse a JSON array of products.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Load a JSON array of products from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            products = store.catalog.len(),
            "catalog loaded"
        );
        Ok(store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn snapshot(&self) -> Result<Catalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}
