//! The order subsystem boundary and its implementations.

pub mod http;
pub mod local;
pub mod memory;

pub use http::HttpOrderClient;
pub use local::LocalOrderClient;
pub use memory::InMemoryOrderClient;

use async_trait::async_trait;
use common::UserId;
use domain::OrderSummary;

use crate::error::RemoteCallError;

/// Fetches a user's order history from the order subsystem.
///
/// Implementations return orders in the order subsystem's insertion order.
/// An unknown user has no orders; that is `Ok(vec![])`, not an error.
#[async_trait]
pub trait OrderClient: Send + Sync {
    async fn orders_for_user(&self, user_id: &UserId)
    -> Result<Vec<OrderSummary>, RemoteCallError>;
}
