//! Users: domain values, password hashing, and the user service.

mod password;
mod service;

pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::UserService;

use common::UserId;
use secrecy::SecretString;

use crate::order::OrderSummary;

/// Input for creating a user.
///
/// The plaintext password lives only here; it is zeroized when the draft is
/// dropped after hashing.
#[derive(Debug)]
pub struct UserDraft {
    pub email: String,
    pub display_name: String,
    pub password: SecretString,
}

impl UserDraft {
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// A user as seen by callers. Carries no credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
}

/// A user enriched with their order history.
///
/// `orders` is computed per request and never stored. When the order history
/// could not be fetched and the read was allowed to degrade, `orders` is empty
/// and `degraded` holds the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    pub user: User,
    pub orders: Vec<OrderSummary>,
    pub degraded: Option<String>,
}

impl UserDetail {
    /// A detail whose order history was fetched successfully.
    pub fn complete(user: User, orders: Vec<OrderSummary>) -> Self {
        Self {
            user,
            orders,
            degraded: None,
        }
    }

    /// A detail returned without order history.
    pub fn degraded(user: User, reason: impl Into<String>) -> Self {
        Self {
            user,
            orders: Vec::new(),
            degraded: Some(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}
