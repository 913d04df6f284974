//! Observability hooks for domain operations.
//!
//! Services do not log ad hoc. Every operation is wrapped by [`observed`],
//! which reports start and finish to an injected [`ServiceObserver`]; the
//! user-detail aggregation additionally reports degraded reads.

use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use common::UserId;

/// Domain operations that report through the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateOrder,
    GetOrdersByUserId,
    GetOrderById,
    CreateUser,
    GetUserById,
    GetAllUsers,
    GetAllCatalogItems,
    GetUserDetail,
}

impl Operation {
    /// Stable snake_case name, used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateOrder => "create_order",
            Self::GetOrdersByUserId => "get_orders_by_user_id",
            Self::GetOrderById => "get_order_by_id",
            Self::CreateUser => "create_user",
            Self::GetUserById => "get_user_by_id",
            Self::GetAllUsers => "get_all_users",
            Self::GetAllCatalogItems => "get_all_catalog_items",
            Self::GetUserDetail => "get_user_detail",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operation ended.
#[derive(Clone, Copy)]
pub enum Outcome<'a> {
    Success,
    Failure(&'a dyn Display),
}

impl std::fmt::Debug for Outcome<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("Success"),
            Self::Failure(e) => f.debug_tuple("Failure").field(&format_args!("{e}")).finish(),
        }
    }
}

/// Receives lifecycle notifications from the domain services.
pub trait ServiceObserver: Send + Sync {
    /// Called before the operation touches any collaborator.
    fn operation_started(&self, operation: Operation);

    /// Called once the operation has produced its result.
    fn operation_finished(&self, operation: Operation, elapsed: Duration, outcome: Outcome<'_>);

    /// Called when a user detail is returned without its order history.
    fn aggregation_degraded(&self, user_id: &UserId, reason: &str);
}

/// Runs `operation`, reporting its start and end to `observer`.
pub async fn observed<T, E, F>(
    observer: &dyn ServiceObserver,
    operation: Operation,
    fut: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    observer.operation_started(operation);
    let start = Instant::now();
    let result = fut.await;
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(e) => Outcome::Failure(e),
    };
    observer.operation_finished(operation, start.elapsed(), outcome);
    result
}

/// Observer that emits tracing events and metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ServiceObserver for TracingObserver {
    fn operation_started(&self, operation: Operation) {
        tracing::debug!(operation = operation.as_str(), "operation started");
    }

    fn operation_finished(&self, operation: Operation, elapsed: Duration, outcome: Outcome<'_>) {
        let label = match outcome {
            Outcome::Success => {
                tracing::debug!(
                    operation = operation.as_str(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "operation finished"
                );
                "success"
            }
            Outcome::Failure(error) => {
                tracing::warn!(
                    operation = operation.as_str(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %error,
                    "operation failed"
                );
                "failure"
            }
        };

        metrics::counter!(
            "domain_operations_total",
            "operation" => operation.as_str(),
            "outcome" => label
        )
        .increment(1);
        metrics::histogram!(
            "domain_operation_duration_seconds",
            "operation" => operation.as_str()
        )
        .record(elapsed.as_secs_f64());
    }

    fn aggregation_degraded(&self, user_id: &UserId, reason: &str) {
        tracing::warn!(%user_id, reason, "user detail degraded: order history unavailable");
        metrics::counter!("user_detail_degraded_total").increment(1);
    }
}

/// An event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Started(Operation),
    Finished {
        operation: Operation,
        error: Option<String>,
    },
    Degraded {
        user_id: UserId,
        reason: String,
    },
}

/// Observer that keeps every notification in memory, for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the `(user_id, reason)` pairs of recorded degradations.
    pub fn degradations(&self) -> Vec<(UserId, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObservedEvent::Degraded { user_id, reason } => Some((user_id, reason)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ServiceObserver for RecordingObserver {
    fn operation_started(&self, operation: Operation) {
        self.push(ObservedEvent::Started(operation));
    }

    fn operation_finished(&self, operation: Operation, _elapsed: Duration, outcome: Outcome<'_>) {
        let error = match outcome {
            Outcome::Success => None,
            Outcome::Failure(e) => Some(e.to_string()),
        };
        self.push(ObservedEvent::Finished { operation, error });
    }

    fn aggregation_degraded(&self, user_id: &UserId, reason: &str) {
        self.push(ObservedEvent::Degraded {
            user_id: user_id.clone(),
            reason: reason.to_string(),
        });
    }
}
