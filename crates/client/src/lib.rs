//! Typed async client for the storefront catalog API.
//!
//! Mirrors the HTTP surface one method per endpoint. Product lookups follow
//! the catalog's own convention: a missing product is `Ok(None)`, not an error.

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use storefront_catalog::{CatalogQuery, CatalogStats, Page, Product};

/// Error body returned by the API.
///
/// Product endpoints fill `error_detail`/`error_code`; the generic fallbacks
/// fill `message` instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_detail: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {}", .body.error)]
    Api { status: StatusCode, body: ApiErrorBody },

    #[error("API returned {status} with an unreadable body: {text}")]
    UnexpectedBody { status: StatusCode, text: String },
}

#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a hierarchical url".to_string()));
        }
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// `GET /api/products`
    pub async fn list_products(&self, query: &CatalogQuery) -> Result<Page<Product>, ClientError> {
        let res = self
            .http
            .get(self.endpoint(&["api", "products"]))
            .query(&query_pairs(query))
            .send()
            .await?;
        decode(res).await
    }

    /// `GET /api/products/:id`
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ClientError> {
        let res = self
            .http
            .get(self.endpoint(&["api", "products", id]))
            .send()
            .await?;
        match decode(res).await {
            Ok(product) => Ok(Some(product)),
            Err(ClientError::Api { status, body }) if is_missing_product(status, &body) => {
                tracing::debug!(product_id = id, "product not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `GET /api/products/cheapest?top=`
    pub async fn cheapest_products(&self, top: usize) -> Result<Vec<Product>, ClientError> {
        let res = self
            .http
            .get(self.endpoint(&["api", "products", "cheapest"]))
            .query(&[("top", top.to_string())])
            .send()
            .await?;
        decode(res).await
    }

    /// `GET /api/products/stats`
    pub async fn catalog_stats(&self) -> Result<CatalogStats, ClientError> {
        let res = self
            .http
            .get(self.endpoint(&["api", "products", "stats"]))
            .send()
            .await?;
        decode(res).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base url can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Query-string pairs for a listing; unset filters are left out.
pub fn query_pairs(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("sort", query.sort.as_str().to_string()),
        ("order", query.order.as_str().to_string()),
    ];
    if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
        pairs.push(("search", search.clone()));
    }
    if let Some(available) = query.available {
        pairs.push(("available", available.to_string()));
    }
    if let Some(page) = query.page {
        pairs.push(("page", page.to_string()));
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit", limit.to_string()));
    }
    pairs
}

/// Error code the API uses for an unknown product id. Any other 404 (a
/// wrong base url hitting the route fallback) stays an error.
const PRODUCT_NOT_FOUND_CODE: &str = "4041";

fn is_missing_product(status: StatusCode, body: &ApiErrorBody) -> bool {
    status == StatusCode::NOT_FOUND && body.error_code.as_deref() == Some(PRODUCT_NOT_FOUND_CODE)
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json().await?);
    }

    let text = res.text().await?;
    match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => Err(ClientError::Api { status, body }),
        Err(_) => Err(ClientError::UnexpectedBody { status, text }),
    }
}
