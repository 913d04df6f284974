//! Cross-service aggregation of a user's order history.
//!
//! The user subsystem owns users; the order subsystem owns orders. A user
//! detail read fetches the user locally and then asks the order subsystem,
//! through the [`OrderClient`] boundary, for that user's orders.
//!
//! When the order call fails or times out, the [`AggregationPolicy`] decides
//! the result:
//! - `Strict`: the whole read fails with [`AggregationError::PartialFailure`]
//! - `Degrade`: the user is returned with an empty, flagged order list

pub mod aggregator;
pub mod client;
pub mod error;
pub mod policy;

pub use aggregator::{DEFAULT_CALL_TIMEOUT, UserDetailAggregator};
pub use client::{HttpOrderClient, InMemoryOrderClient, LocalOrderClient, OrderClient};
pub use error::{AggregationError, ClientBuildError, RemoteCallError};
pub use policy::{AggregationPolicy, ParsePolicyError};
pub use reqwest::Url;
