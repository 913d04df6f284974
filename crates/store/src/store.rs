use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};

use crate::{CatalogRecord, OrderRecord, Result, UserRecord};

/// Persistence for user records.
///
/// All implementations must be thread-safe (Send + Sync) and own their
/// concurrency control; callers never lock around these methods.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user and returns the record as stored.
    ///
    /// Fails with `DuplicateKey` if the user ID is already present.
    async fn insert_user(&self, record: UserRecord) -> Result<UserRecord>;

    /// Looks up a user by ID. Returns None if no such user exists.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>>;

    /// Returns every user in insertion order.
    async fn list_users(&self) -> Result<Vec<UserRecord>>;
}

/// Persistence for order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order and returns the record as stored.
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord>;

    /// Looks up an order by ID. Returns None if no such order exists.
    async fn find_order(&self, order_id: &OrderId) -> Result<Option<OrderRecord>>;

    /// Returns the orders whose owner is `user_id`, in insertion order.
    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>>;
}

/// Read-only access to the product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns every catalog item in insertion order.
    async fn list_catalog_items(&self) -> Result<Vec<CatalogRecord>>;
}

// Shared handles, so services can hold `Arc<dyn UserStore>` and friends.

#[async_trait]
impl<T: UserStore + ?Sized> UserStore for Arc<T> {
    async fn insert_user(&self, record: UserRecord) -> Result<UserRecord> {
        (**self).insert_user(record).await
    }

    async fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>> {
        (**self).find_user(user_id).await
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        (**self).list_users().await
    }
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn insert_order(&self, record: OrderRecord) -> Result<OrderRecord> {
        (**self).insert_order(record).await
    }

    async fn find_order(&self, order_id: &OrderId) -> Result<Option<OrderRecord>> {
        (**self).find_order(order_id).await
    }

    async fn orders_for_user(&self, user_id: &UserId) -> Result<Vec<OrderRecord>> {
        (**self).orders_for_user(user_id).await
    }
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn list_catalog_items(&self) -> Result<Vec<CatalogRecord>> {
        (**self).list_catalog_items().await
    }
}
