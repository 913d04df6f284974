use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use common::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::{
    CatalogRecord, OrderRecord, Result, StoreError, UserRecord,
    store::{CatalogStore, OrderStore, UserStore},
};

#[derive(Default)]
struct Collections {
    users: Vec<UserRecord>,
    orders: Vec<OrderRecord>,
    catalogs: Vec<CatalogRecord>,
}

/// In-memory store implementing every collection trait.
///
/// Collections are append-only vectors, so reads come back in insertion
/// order just like the PostgreSQL implementation's `ORDER BY seq`.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose catalog holds the default product list.
    pub fn seeded() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Creates a store with the given catalog items.
    pub fn with_catalog(items: Vec<CatalogRecord>) -> Self {
        Self {
            collections: Arc::new(RwLock::new(Collections {
                catalogs: items,
                ..Collections::default()
            })),
            unavailable: Arc::default(),
        }
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.collections.read().await.users.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.collections.read().await.orders.len()
    }

    /// Clears users and orders. The catalog is left alone.
    pub async fn clear(&self) {
        let mut collections = self.collections.write().await;
        collections.users.clear();
        collections.orders.clear();
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }
}

/// The product list the catalog starts with.
pub fn default_catalog() -> Vec<CatalogRecord> {
    let now = Utc::now();
    [
        ("CATALOG-001", "Berlin", 100, 1500),
        ("CATALOG-002", "Tokyo", 110, 1000),
        ("CATALOG-003", "Stockholm", 120, 2000),
    ]
    .into_iter()
    .map(|(id, name, stock, unit_price)| CatalogRecord {
        product_id: id.into(),
        product_name: name.to_string(),
        stock,
        unit_price,
        created_at: now,
    })
    .collect()
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, record: UserRecord) -> Result<UserRecord> {
        self.check_available()?;
        let mut collections = self.collections.write().await;

        if collections.users.iter().any(|u| u.user_id == record.user_id) {
            return Err(StoreError::DuplicateKey {
                collection: "users",
                key: record.user_id.into_inner(),
            });
        }

        collections.users.push(record.clone());
        Ok(record)
    }

    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .users
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.check_available()?;
        Ok(self.collections.read().await.users.clone())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord> {
        self.check_available()?;
        let mut collections = self.collections.write().await;

        if collections
            .orders
            .iter()
            .any(|o| o.order_id == record.order_id)
        {
            return Err(StoreError::DuplicateKey {
                collection: "orders",
                key: record.order_id.into_inner(),
            });
        }

        collections.orders.push(record.clone());
        Ok(record)
    }

    async fn find_order(&self, order_id: &OrderId) -> Result<Option<OrderRecord>> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .orders
            .iter()
            .find(|o| &o.order_id == order_id)
            .cloned())
    }

    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections
            .orders
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_catalog_items(&self) -> Result<Vec<CatalogRecord>> {
        self.check_available()?;
        Ok(self.collections.read().await.catalogs.clone())
    }
}
