use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use domain::{OrderService, OrderSummary};
use store::OrderStore;

use super::OrderClient;
use crate::error::RemoteCallError;

/// Calls an in-process [`OrderService`], for single-binary deployments.
pub struct LocalOrderClient<S: OrderStore> {
    orders: Arc<OrderService<S>>,
}

impl<S: OrderStore> LocalOrderClient<S> {
    pub fn new(orders: Arc<OrderService<S>>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl<S: OrderStore> OrderClient for LocalOrderClient<S> {
    async fn orders_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrderSummary>, RemoteCallError> {
        let orders = self
            .orders
            .get_orders_by_user_id(user_id)
            .await
            .map_err(|e| RemoteCallError::Upstream(e.to_string()))?;
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }
}
