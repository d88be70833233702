//! Product catalog: records, the in-memory store and the query engine.
//!
//! Everything in here is deterministic and side-effect free apart from
//! loading the catalog source. HTTP concerns live in `storefront-api`.

pub mod insights;
pub mod product;
pub mod query;
pub mod store;

pub use insights::{
    average_available_price, catalog_stats, cheapest_available, CatalogStats, DEFAULT_TOP_N,
};
pub use product::Product;
pub use query::{
    get_by_id, query_catalog, CatalogQuery, Page, Pagination, SortField, SortOrder, DEFAULT_LIMIT,
    DEFAULT_PAGE, MAX_LIMIT,
};
pub use store::{Catalog, CatalogError, CatalogStore, InMemoryCatalogStore};
