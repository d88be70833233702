//! Catalog-wide summaries that don't paginate.

use serde::{Deserialize, Serialize};

use storefront_core::Price;

use crate::product::Product;

pub const DEFAULT_TOP_N: usize = 3;

/// The `top_n` cheapest in-stock products, cheapest first.
///
/// Equal prices keep catalog order. Asking for more than are available
/// returns all of them.
pub fn cheapest_available(products: &[Product], top_n: usize) -> Vec<Product> {
    let mut available: Vec<&Product> = products.iter().filter(|p| p.is_available).collect();
    available.sort_by_key(|p| p.price);
    available.into_iter().take(top_n).cloned().collect()
}

/// Mean price of in-stock products, rounded to cents. Zero when nothing is in stock.
pub fn average_available_price(products: &[Product]) -> Price {
    Price::mean(products.iter().filter(|p| p.is_available).map(|p| p.price))
        .map(|mean| mean.round_dp(2))
        .unwrap_or(Price::ZERO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_count: usize,
    pub available_count: usize,
    pub average_price: Price,
}

pub fn catalog_stats(products: &[Product]) -> CatalogStats {
    CatalogStats {
        total_count: products.len(),
        available_count: products.iter().filter(|p| p.is_available).count(),
        average_price: average_available_price(products),
    }
}
