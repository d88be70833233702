use std::sync::Arc;

use reqwest::StatusCode;
use storefront_api::AppConfig;
use storefront_catalog::{
    Catalog, CatalogError, CatalogQuery, CatalogStore, InMemoryCatalogStore, SortField, SortOrder,
};
use storefront_client::StorefrontClient;

const CATALOG: &str = r#"[
    {"id":"a","name":"Widget","price":10,"isAvailable":true,"category":"tools","image":"/images/widget.png"},
    {"id":"b","name":"Gadget","price":5,"isAvailable":false,"category":"tools"},
    {"id":"c","name":"Desk Lamp","price":24.5,"isAvailable":true,"category":"Lighting"},
    {"id":"d","name":"Floor Lamp","price":79.99,"isAvailable":true,"category":"lighting"},
    {"id":"e","name":"Armchair","price":199,"isAvailable":false,"category":"Furniture"},
    {"id":"f","name":"Bookshelf","price":120,"isAvailable":true,"category":"Furniture"}
]"#;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn CatalogStore>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = storefront_api::build_app(store, &AppConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_sample_catalog() -> Self {
        let store = InMemoryCatalogStore::from_json_str(CATALOG).unwrap();
        Self::spawn(Arc::new(store)).await
    }

    fn client(&self) -> StorefrontClient {
        StorefrontClient::new(&self.base_url).unwrap()
    }

    async fn get_json(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let res = reqwest::get(format!("{}{}", self.base_url, path)).await.unwrap();
        let status = res.status();
        let body = res.json().await.unwrap_or(serde_json::Value::Null);
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Store whose backing source is gone.
struct BrokenStore;

impl CatalogStore for BrokenStore {
    fn snapshot(&self) -> Result<Catalog, CatalogError> {
        Err(CatalogError::Unavailable("source offline".to_string()))
    }
}

fn ids(products: &[storefront_catalog::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::with_sample_catalog().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_defaults_to_name_ascending_first_page() {
    let srv = TestServer::with_sample_catalog().await;

    let page = srv.client().list_products(&CatalogQuery::default()).await.unwrap();

    assert_eq!(ids(&page.data), vec!["e", "f", "c", "d", "b", "a"]);
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 10);
    assert_eq!(page.pagination.total, 6);
    assert_eq!(page.pagination.total_pages, 1);
}

#[tokio::test]
async fn list_combines_search_availability_sort_and_paging() {
    let srv = TestServer::with_sample_catalog().await;
    let client = srv.client();

    let query = CatalogQuery {
        search: Some("LAMP".into()),
        available: Some(true),
        sort: SortField::Price,
        order: SortOrder::Desc,
        page: Some(1),
        limit: Some(1),
    };
    let first = client.list_products(&query).await.unwrap();
    assert_eq!(ids(&first.data), vec!["d"]);
    assert_eq!(first.pagination.total, 2);
    assert_eq!(first.pagination.total_pages, 2);

    let second = client
        .list_products(&CatalogQuery {
            page: Some(2),
            ..query.clone()
        })
        .await
        .unwrap();
    assert_eq!(ids(&second.data), vec!["c"]);

    let beyond = client
        .list_products(&CatalogQuery {
            page: Some(3),
            ..query
        })
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.pagination.total, 2);
}

#[tokio::test]
async fn list_wire_format_and_lenient_parameters() {
    let srv = TestServer::with_sample_catalog().await;

    let (status, body) = srv
        .get_json("/api/products?sort=rating&order=sideways&page=abc&limit=500&available=true")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 100);
    assert_eq!(body["pagination"]["total"], 4);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["data"][0]["name"], "Bookshelf");
    assert_eq!(body["data"][0]["isAvailable"], true);

    let (_, body) = srv.get_json("/api/products?limit=0&sort=price").await;
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["pagination"]["totalPages"], 6);
    assert_eq!(body["data"][0]["id"], "b");

    let (_, body) = srv.get_json("/api/products?available=&search=").await;
    assert_eq!(body["pagination"]["total"], 6);

    let (status, body) = srv.get_json("/api/products?page=99999999999999999999").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 6);
}

#[tokio::test]
async fn get_product_by_id() {
    let srv = TestServer::with_sample_catalog().await;
    let client = srv.client();

    let product = client.get_product("a").await.unwrap().expect("product a");
    assert_eq!(product.name, "Widget");
    assert_eq!(product.image.as_deref(), Some("/images/widget.png"));

    assert!(client.get_product("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_base_url_is_not_mistaken_for_a_missing_product() {
    let srv = TestServer::with_sample_catalog().await;
    let client = StorefrontClient::new(&format!("{}/backend", srv.base_url)).unwrap();

    match client.get_product("a").await.unwrap_err() {
        storefront_client::ClientError::Api { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body.error, "Not found");
            assert_eq!(body.error_code, None);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_product_is_404_with_error_code() {
    let srv = TestServer::with_sample_catalog().await;

    let (status, body) = srv.get_json("/api/products/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "4041");
    assert_eq!(body["error"], "Resource not found");
    assert_eq!(body["error_detail"], "Product not found");
}

#[tokio::test]
async fn empty_product_id_is_400() {
    let srv = TestServer::with_sample_catalog().await;

    let (status, body) = srv.get_json("/api/products/").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "4001");

    let (status, body) = srv.get_json("/api/products/%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "4001");
}

#[tokio::test]
async fn cheapest_returns_flat_array_of_available_products() {
    let srv = TestServer::with_sample_catalog().await;

    let cheapest = srv.client().cheapest_products(3).await.unwrap();
    assert_eq!(ids(&cheapest), vec!["a", "c", "d"]);

    let (status, body) = srv.get_json("/api/products/cheapest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = srv.get_json("/api/products/cheapest?top=50").await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (_, body) = srv.get_json("/api/products/cheapest?limit=1").await;
    assert_eq!(body[0]["id"], "a");
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_query_strings_are_400_on_every_listing() {
    let srv = TestServer::with_sample_catalog().await;

    let (status, body) = srv.get_json("/api/products?page=1&page=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "4001");

    let (status, body) = srv.get_json("/api/products/cheapest?top=1&top=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "4001");
    assert_eq!(body["error"], "Invalid parameter");
}

#[tokio::test]
async fn stats_average_available_prices() {
    let srv = TestServer::with_sample_catalog().await;

    let stats = srv.client().catalog_stats().await.unwrap();
    assert_eq!(stats.total_count, 6);
    assert_eq!(stats.available_count, 4);
    // (10 + 24.5 + 79.99 + 120) / 4 = 58.6225
    assert_eq!(stats.average_price.to_string(), "58.62");
}

#[tokio::test]
async fn unknown_routes_use_the_generic_404_body() {
    let srv = TestServer::with_sample_catalog().await;

    let (status, body) = srv.get_json("/api/orders?x=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["path"], "/api/orders?x=1");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn store_failures_surface_as_500_with_operation_code() {
    let srv = TestServer::spawn(Arc::new(BrokenStore)).await;

    let (status, body) = srv.get_json("/api/products").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "2002");
    assert_eq!(body["error"], "Error listing products");
    assert!(body["error_detail"].as_str().unwrap().contains("source offline"));

    let (status, body) = srv.get_json("/api/products/a").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_code"], "2003");

    let err = srv.client().get_product("a").await.unwrap_err();
    match err {
        storefront_client::ClientError::Api { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body.error_code.as_deref(), Some("2003"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
