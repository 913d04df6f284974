use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use domain::OrderSummary;

use super::OrderClient;
use crate::error::RemoteCallError;

#[derive(Debug, Default)]
struct InMemoryOrderClientState {
    orders: HashMap<UserId, Vec<OrderSummary>>,
    failure: Option<RemoteCallError>,
    delay: Option<Duration>,
    calls: usize,
}

/// Scripted order client for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderClient {
    state: Arc<RwLock<InMemoryOrderClientState>>,
}

impl InMemoryOrderClient {
    /// Creates a client that knows no orders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `summary` to the history returned for `user_id`.
    pub fn push_order(&self, user_id: impl Into<UserId>, summary: OrderSummary) {
        self.write()
            .orders
            .entry(user_id.into())
            .or_default()
            .push(summary);
    }

    /// Makes every subsequent call fail with `failure`, or succeed again on `None`.
    pub fn set_failure(&self, failure: Option<RemoteCallError>) {
        self.write().failure = failure;
    }

    /// Delays every subsequent call by `delay` before answering.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.write().delay = delay;
    }

    /// Returns the number of calls received.
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryOrderClientState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl OrderClient for InMemoryOrderClient {
    async fn orders_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrderSummary>, RemoteCallError> {
        let (delay, answer) = {
            let mut state = self.write();
            state.calls += 1;
            let answer = match &state.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(state.orders.get(user_id).cloned().unwrap_or_default()),
            };
            (state.delay, answer)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        answer
    }
}
