//! Domain layer for the storefront services.
//!
//! This crate provides:
//! - Order, user, and catalog domain services over the `store` traits
//! - The representation mapper between request, domain, record, and
//!   response shapes
//! - The password-hashing capability used at user creation
//! - The observability hooks every service operation reports through

pub mod catalog;
pub mod error;
pub mod mapper;
pub mod observe;
pub mod order;
pub mod timeouts;
pub mod user;

pub use catalog::{CatalogItem, CatalogService};
pub use error::{DomainError, MappingError, PasswordHashError, ValidationError};
pub use mapper::{RequestOrder, RequestUser, ResponseCatalog, ResponseOrder, ResponseUser};
pub use observe::{
    ObservedEvent, Operation, Outcome, RecordingObserver, ServiceObserver, TracingObserver,
};
pub use order::{Order, OrderDraft, OrderService, OrderSummary};
pub use timeouts::ServiceTimeouts;
pub use user::{
    BcryptPasswordHasher, PasswordHasher, User, UserDetail, UserDraft, UserService,
};
