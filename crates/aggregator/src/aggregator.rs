//! User detail aggregation.

use std::sync::Arc;
use std::time::Duration;

use common::UserId;
use domain::{
    OrderSummary, PasswordHasher, ServiceObserver, TracingObserver, UserDetail, UserService,
    observe::{Operation, observed},
};
use store::UserStore;

use crate::client::OrderClient;
use crate::error::{AggregationError, RemoteCallError};
use crate::policy::AggregationPolicy;

/// Upper bound for one order subsystem call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Combines a user with the order history held by the order subsystem.
///
/// The order list is computed on every read and never stored with the user.
pub struct UserDetailAggregator<S, H, C>
where
    S: UserStore,
    H: PasswordHasher + ?Sized,
    C: OrderClient + ?Sized,
{
    users: Arc<UserService<S, H>>,
    orders: Arc<C>,
    policy: AggregationPolicy,
    call_timeout: Duration,
    observer: Arc<dyn ServiceObserver>,
}

impl<S, H, C> UserDetailAggregator<S, H, C>
where
    S: UserStore,
    H: PasswordHasher + ?Sized + 'static,
    C: OrderClient + ?Sized,
{
    /// Creates an aggregator with the default call timeout and a tracing observer.
    pub fn new(users: Arc<UserService<S, H>>, orders: Arc<C>, policy: AggregationPolicy) -> Self {
        Self {
            users,
            orders,
            policy,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ServiceObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Loads a user and attaches their order history.
    ///
    /// A missing user fails with `NotFound` before the order subsystem is
    /// called. What happens when the order call fails depends on the policy.
    #[tracing::instrument(skip(self), fields(policy = %self.policy))]
    pub async fn get_user_detail(&self, user_id: &UserId) -> Result<UserDetail, AggregationError> {
        observed(self.observer.as_ref(), Operation::GetUserDetail, async {
            let user = self.users.get_user_by_id(user_id).await?;

            match self.fetch_orders(user_id).await {
                Ok(orders) => Ok::<_, AggregationError>(UserDetail::complete(user, orders)),
                Err(err) => match self.policy {
                    AggregationPolicy::Strict => Err(AggregationError::PartialFailure(err)),
                    AggregationPolicy::Degrade => {
                        let reason = err.to_string();
                        self.observer.aggregation_degraded(user_id, &reason);
                        Ok(UserDetail::degraded(user, reason))
                    }
                },
            }
        })
        .await
    }

    async fn fetch_orders(&self, user_id: &UserId) -> Result<Vec<OrderSummary>, RemoteCallError> {
        let result =
            match tokio::time::timeout(self.call_timeout, self.orders.orders_for_user(user_id))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(RemoteCallError::Timeout(self.call_timeout)),
            };

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) if e.is_timeout() => "timeout",
            Err(_) => "failure",
        };
        metrics::counter!("order_client_requests_total", "outcome" => outcome).increment(1);

        result
    }
}
