use serde::Deserialize;

use storefront_catalog::{CatalogQuery, DEFAULT_TOP_N};

// -------------------------
// Request DTOs
// -------------------------

/// Raw query string of `GET /api/products`.
///
/// Every field is taken as text so that a bad value degrades to its default
/// instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub available: Option<String>,
}

impl ListProductsParams {
    pub fn into_query(self) -> CatalogQuery {
        CatalogQuery {
            search: non_empty(self.search),
            available: non_empty(self.available).map(|v| v == "true"),
            sort: non_empty(self.sort)
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            order: non_empty(self.order)
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            page: parse_int(self.page),
            limit: parse_int(self.limit),
        }
    }
}

/// Raw query string of `GET /api/products/cheapest`. `limit` is accepted as an
/// alias for `top`.
#[derive(Debug, Default, Deserialize)]
pub struct CheapestParams {
    pub top: Option<String>,
    pub limit: Option<String>,
}

impl CheapestParams {
    /// Requested count; missing, non-numeric or non-positive means the default.
    pub fn top_n(&self) -> usize {
        parse_int(self.top.clone().or_else(|| self.limit.clone()))
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_TOP_N)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Integer query value. Digit strings too long for `i64` saturate so that a
/// huge page still lands past the end and a huge limit still hits the cap.
fn parse_int(value: Option<String>) -> Option<i64> {
    let v = non_empty(value)?;
    if let Ok(n) = v.parse::<i64>() {
        return Some(n);
    }

    let (negative, digits) = match v.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, v.strip_prefix('+').unwrap_or(&v)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
