//! Upper bounds for calls into blocking collaborators.

use std::future::Future;
use std::time::Duration;

use store::StoreError;

/// Timeouts applied by the domain services to their collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimeouts {
    /// Bound on every store call.
    pub storage: Duration,
    /// Bound on a single password hash.
    pub password_hash: Duration,
}

impl Default for ServiceTimeouts {
    fn default() -> Self {
        Self {
            storage: Duration::from_secs(5),
            password_hash: Duration::from_secs(5),
        }
    }
}

/// Runs a store call, failing with `StoreError::Timeout` once `limit` elapses.
///
/// The call future is dropped on timeout, which cancels it at its next await
/// point.
pub(crate) async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = store::Result<T>>,
) -> store::Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}
