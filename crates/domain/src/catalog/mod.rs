//! Catalog items and the read-only catalog service.

mod service;

pub use service::CatalogService;

use chrono::{DateTime, Utc};
use common::ProductId;

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: i32,
    pub unit_price: i32,
    pub created_at: DateTime<Utc>,
}
