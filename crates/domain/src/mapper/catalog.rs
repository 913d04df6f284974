use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};
use store::CatalogRecord;

use crate::catalog::CatalogItem;

/// Outbound catalog item representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCatalog {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: i32,
    pub unit_price: i32,
    pub created_at: DateTime<Utc>,
}

impl From<CatalogRecord> for CatalogItem {
    fn from(record: CatalogRecord) -> Self {
        let CatalogRecord {
            product_id,
            product_name,
            stock,
            unit_price,
            created_at,
        } = record;

        Self {
            product_id,
            product_name,
            stock,
            unit_price,
            created_at,
        }
    }
}

impl From<CatalogItem> for ResponseCatalog {
    fn from(item: CatalogItem) -> Self {
        let CatalogItem {
            product_id,
            product_name,
            stock,
            unit_price,
            created_at,
        } = item;

        Self {
            product_id,
            product_name,
            stock,
            unit_price,
            created_at,
        }
    }
}
