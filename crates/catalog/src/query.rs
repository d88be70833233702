//! Catalog query engine: search, availability filter, ordering and pagination.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, Price};

use crate::product::Product;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Price,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            other => Err(DomainError::validation(format!(
                "sort must be one of: name, price (got {other:?})"
            ))),
        }
    }
}

/// Direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ascending: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ascending,
            SortOrder::Desc => ascending.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::validation(format!(
                "order must be one of: asc, desc (got {other:?})"
            ))),
        }
    }
}

/// Parameters for one catalog read.
///
/// `page` and `limit` are kept as requested (possibly zero or negative); the
/// engine clamps them when it paginates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    /// `None` means "don't filter", not "unavailable only".
    pub available: Option<bool>,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl CatalogQuery {
    /// Requested page clamped to `>= 1`. No upper bound.
    pub fn effective_page(&self) -> u64 {
        match self.page {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        }
    }

    /// Requested page size clamped to `[1, MAX_LIMIT]`.
    pub fn effective_limit(&self) -> u64 {
        match self.limit {
            Some(l) => l.clamp(1, MAX_LIMIT as i64) as u64,
            None => DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata describing the full matching set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Amount(Price),
}

impl SortField {
    fn key(self, product: &Product) -> SortKey {
        match self {
            SortField::Name => SortKey::Text(product.name.to_lowercase()),
            SortField::Price => SortKey::Amount(product.price),
        }
    }
}

/// Run `query` against `products`.
///
/// Steps, in order: search filter, availability filter, stable sort, slice.
/// Ties keep their catalog order in both directions. Pages past the end yield
/// an empty `data` with the real totals.
pub fn query_catalog(products: &[Product], query: &CatalogQuery) -> Page<Product> {
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<(SortKey, &Product)> = products
        .iter()
        .filter(|p| needle.as_deref().is_none_or(|n| p.matches_search(n)))
        .filter(|p| query.available.is_none_or(|a| p.is_available == a))
        .map(|p| (query.sort.key(p), p))
        .collect();

    // slice::sort_by is stable.
    matched.sort_by(|(a, _), (b, _)| query.order.apply(a.cmp(b)));

    let page = query.effective_page();
    let limit = query.effective_limit();
    let total = matched.len() as u64;
    let total_pages = total.div_ceil(limit);

    let start = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
    let data = matched
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .map(|(_, p)| p.clone())
        .collect();

    Page {
        data,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }
}

/// Exact id lookup. `None` means no such product.
pub fn get_by_id<'a>(products: &'a [Product], id: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.id == id)
}
