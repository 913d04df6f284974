//! Domain error types.

use store::StoreError;
use thiserror::Error;

/// Input that is well-formed but out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Quantity below zero.
    #[error("Invalid quantity: {qty} (must not be negative)")]
    NegativeQuantity { qty: i32 },

    /// Unit price below zero.
    #[error("Invalid unit price: {unit_price} (must not be negative)")]
    NegativeUnitPrice { unit_price: i32 },

    /// A required text field is empty or whitespace.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
}

/// A required field of the target shape has no source value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Cannot map {shape}: required field `{field}` is missing")]
pub struct MappingError {
    pub shape: &'static str,
    pub field: &'static str,
}

impl MappingError {
    pub fn missing(shape: &'static str, field: &'static str) -> Self {
        Self { shape, field }
    }
}

/// The password-hashing capability failed or did not answer in time.
#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(String);

impl PasswordHashError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller input rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request shape could not be mapped to a domain value.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Hashing the password failed; nothing was persisted.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
