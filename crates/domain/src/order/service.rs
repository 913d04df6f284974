//! Order service: placing orders and reading them back.

use std::sync::Arc;

use chrono::Utc;
use common::{OrderId, ProductId, UserId};
use store::{OrderRecord, OrderStore};

use crate::error::DomainError;
use crate::observe::{Operation, ServiceObserver, TracingObserver, observed};
use crate::timeouts::{ServiceTimeouts, bounded};

use super::{Order, OrderDraft};

/// Service for managing orders.
///
/// Owns order ID generation and the `total_price` derivation. Persistence
/// failures surface unchanged; this service never retries.
pub struct OrderService<S: OrderStore> {
    store: S,
    timeouts: ServiceTimeouts,
    observer: Arc<dyn ServiceObserver>,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service with default timeouts and a tracing observer.
    pub fn new(store: S) -> Self {
        Self::with_observer(store, ServiceTimeouts::default(), Arc::new(TracingObserver))
    }

    pub fn with_observer(
        store: S,
        timeouts: ServiceTimeouts,
        observer: Arc<dyn ServiceObserver>,
    ) -> Self {
        Self {
            store,
            timeouts,
            observer,
        }
    }

    /// Places a new order.
    ///
    /// Fails with `Validation` for a negative quantity or unit price and with
    /// `Storage` if the order could not be persisted.
    #[tracing::instrument(skip(self), fields(user_id = %draft.user_id))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<Order, DomainError> {
        observed(self.observer.as_ref(), Operation::CreateOrder, async {
            let order = Order::place(draft, Utc::now())?;
            let stored = bounded(
                self.timeouts.storage,
                self.store.insert_order(OrderRecord::from(order)),
            )
            .await?;
            Ok::<_, DomainError>(Order::from(stored))
        })
        .await
    }

    /// Places an order from individual fields.
    pub async fn place_order(
        &self,
        user_id: impl Into<UserId>,
        product_id: impl Into<ProductId>,
        qty: i32,
        unit_price: i32,
    ) -> Result<Order, DomainError> {
        self.create_order(OrderDraft::new(user_id, product_id, qty, unit_price))
            .await
    }

    /// Returns the orders owned by `user_id` in insertion order.
    ///
    /// An unknown user simply has no orders; that is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_orders_by_user_id(&self, user_id: &UserId) -> Result<Vec<Order>, DomainError> {
        observed(self.observer.as_ref(), Operation::GetOrdersByUserId, async {
            let records =
                bounded(self.timeouts.storage, self.store.orders_for_user(user_id)).await?;
            Ok::<_, DomainError>(records.into_iter().map(Order::from).collect())
        })
        .await
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order_by_id(&self, order_id: &OrderId) -> Result<Order, DomainError> {
        observed(self.observer.as_ref(), Operation::GetOrderById, async {
            let record = bounded(self.timeouts.storage, self.store.find_order(order_id)).await?;
            record
                .map(Order::from)
                .ok_or_else(|| DomainError::not_found("Order", order_id))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ValidationError;
    use crate::observe::{ObservedEvent, RecordingObserver};
    use store::{InMemoryStore, StoreError};

    fn create_service() -> (OrderService<InMemoryStore>, InMemoryStore) {
        let store = InMemoryStore::new();
        (OrderService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_order() {
        let (service, store) = create_service();

        let order = service
            .place_order("u1", "CATALOG-1", 10, 3000)
            .await
            .unwrap();

        assert_eq!(order.total_price, 30_000);
        assert_eq!(order.user_id.as_str(), "u1");
        assert_eq!(order.product_id.as_str(), "CATALOG-1");
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_order_returns_persisted_values() {
        let (service, _) = create_service();

        let created = service.place_order("u1", "CATALOG-2", 3, 5).await.unwrap();
        let loaded = service.get_order_by_id(&created.order_id).await.unwrap();

        assert_eq!(created, loaded);
    }

    #[tokio::test]
    async fn test_zero_quantity_is_allowed() {
        let (service, _) = create_service();
        let order = service.place_order("u1", "P", 0, 3000).await.unwrap();
        assert_eq!(order.total_price, 0);
    }

    #[tokio::test]
    async fn test_invalid_order_is_not_persisted() {
        let (service, store) = create_service();

        let err = service.place_order("u1", "P", -5, 100).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::NegativeQuantity { qty: -5 })
        ));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_unchanged() {
        let (service, store) = create_service();
        store.set_unavailable(true);

        let err = service.place_order("u1", "P", 1, 1).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Storage(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_orders_by_user_are_isolated() {
        let (service, _) = create_service();
        service.place_order("u1", "A", 1, 10).await.unwrap();
        service.place_order("u2", "B", 1, 10).await.unwrap();
        service.place_order("u1", "C", 1, 10).await.unwrap();

        let orders = service
            .get_orders_by_user_id(&UserId::new("u1"))
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.user_id.as_str() == "u1"));
        assert_eq!(orders[0].product_id.as_str(), "A");
        assert_eq!(orders[1].product_id.as_str(), "C");
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_orders() {
        let (service, _) = create_service();
        let orders = service
            .get_orders_by_user_id(&UserId::new("unknown-user"))
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_order_is_not_found() {
        let (service, _) = create_service();
        let err = service
            .get_order_by_id(&OrderId::new("missing"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Order not found: missing");
    }

    #[tokio::test]
    async fn test_order_ids_are_unique_across_batch() {
        let (service, _) = create_service();
        let mut ids = HashSet::new();
        for _ in 0..200 {
            let order = service.place_order("u1", "P", 1, 1).await.unwrap();
            ids.insert(order.order_id);
        }
        assert_eq!(ids.len(), 200);
    }

    #[tokio::test]
    async fn test_operations_are_observed() {
        let observer = RecordingObserver::new();
        let service = OrderService::with_observer(
            InMemoryStore::new(),
            ServiceTimeouts::default(),
            Arc::new(observer.clone()),
        );

        service.place_order("u1", "P", -1, 1).await.unwrap_err();

        let events = observer.events();
        assert_eq!(events[0], ObservedEvent::Started(Operation::CreateOrder));
        assert!(matches!(
            &events[1],
            ObservedEvent::Finished { operation: Operation::CreateOrder, error: Some(msg) }
                if msg.contains("Invalid quantity")
        ));
    }
}
