//! Aggregator error types.

use std::time::Duration;

use domain::DomainError;
use thiserror::Error;

/// A call across the order subsystem boundary failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteCallError {
    /// No answer within the call timeout.
    #[error("order service did not answer within {0:?}")]
    Timeout(Duration),

    /// The connection could not be established or was lost.
    #[error("order service unreachable: {0}")]
    Unreachable(String),

    /// The order service answered with a non-success status.
    #[error("order service returned status {0}")]
    Status(u16),

    /// The response body was not a list of orders.
    #[error("invalid order service response: {0}")]
    Decode(String),

    /// The order subsystem answered with an error of its own.
    #[error("order service failed: {0}")]
    Upstream(String),
}

impl RemoteCallError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// The HTTP order client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP order client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Errors returned by [`UserDetailAggregator`](crate::UserDetailAggregator).
#[derive(Debug, Error)]
pub enum AggregationError {
    /// Loading the user failed; `NotFound` arrives here unchanged.
    #[error(transparent)]
    User(#[from] DomainError),

    /// The user exists but the order history could not be fetched.
    #[error("order history unavailable: {0}")]
    PartialFailure(#[source] RemoteCallError),
}

/// Convenience type alias for aggregation results.
pub type Result<T> = std::result::Result<T, AggregationError>;
