//! User service: registration and lookup.

use std::sync::Arc;

use common::UserId;
use secrecy::{ExposeSecret, SecretString};
use store::UserStore;

use crate::error::{DomainError, PasswordHashError, ValidationError};
use crate::mapper;
use crate::observe::{Operation, ServiceObserver, TracingObserver, observed};
use crate::timeouts::{ServiceTimeouts, bounded};

use super::{PasswordHasher, User, UserDraft};

/// Service for managing users.
///
/// Generates user IDs and delegates password hashing to `H`. No read path of
/// this service returns the stored password hash.
pub struct UserService<S: UserStore, H: PasswordHasher + ?Sized> {
    store: S,
    hasher: Arc<H>,
    timeouts: ServiceTimeouts,
    observer: Arc<dyn ServiceObserver>,
}

impl<S, H> UserService<S, H>
where
    S: UserStore,
    H: PasswordHasher + ?Sized + 'static,
{
    /// Creates a new user service with default timeouts and a tracing observer.
    pub fn new(store: S, hasher: Arc<H>) -> Self {
        Self::with_observer(
            store,
            hasher,
            ServiceTimeouts::default(),
            Arc::new(TracingObserver),
        )
    }

    pub fn with_observer(
        store: S,
        hasher: Arc<H>,
        timeouts: ServiceTimeouts,
        observer: Arc<dyn ServiceObserver>,
    ) -> Self {
        Self {
            store,
            hasher,
            timeouts,
            observer,
        }
    }

    /// Registers a new user.
    ///
    /// The password is hashed before anything is written; if hashing fails
    /// no record is persisted.
    #[tracing::instrument(skip(self, draft))]
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, DomainError> {
        observed(self.observer.as_ref(), Operation::CreateUser, async {
            let UserDraft {
                email,
                display_name,
                password,
            } = draft;

            require_text("email", &email)?;
            require_text("displayName", &display_name)?;
            if password.expose_secret().is_empty() {
                return Err(ValidationError::Blank { field: "password" }.into());
            }

            let user = User {
                user_id: UserId::generate(),
                email,
                display_name,
            };
            let encrypted_password = self.hash_password(password).await?;

            let record = mapper::user::to_persisted(user, encrypted_password);
            let stored = bounded(self.timeouts.storage, self.store.insert_user(record)).await?;
            Ok::<_, DomainError>(User::from(stored))
        })
        .await
    }

    /// Loads a user by ID. A missing user is `NotFound`, never an empty value.
    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, user_id: &UserId) -> Result<User, DomainError> {
        observed(self.observer.as_ref(), Operation::GetUserById, async {
            let record = bounded(self.timeouts.storage, self.store.find_user(user_id)).await?;
            record
                .map(User::from)
                .ok_or_else(|| DomainError::not_found("User", user_id))
        })
        .await
    }

    /// Returns every user in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        observed(self.observer.as_ref(), Operation::GetAllUsers, async {
            let records = bounded(self.timeouts.storage, self.store.list_users()).await?;
            Ok::<_, DomainError>(records.into_iter().map(User::from).collect())
        })
        .await
    }

    /// Hashes on the blocking pool, bounded by the password-hash timeout.
    ///
    /// On timeout the hashing thread runs to completion and its result is
    /// dropped.
    async fn hash_password(&self, password: SecretString) -> Result<String, PasswordHashError> {
        let hasher = Arc::clone(&self.hasher);
        let limit = self.timeouts.password_hash;
        let task = tokio::task::spawn_blocking(move || hasher.hash(&password));

        match tokio::time::timeout(limit, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(PasswordHashError::new(format!(
                "hashing task failed: {join_err}"
            ))),
            Err(_) => Err(PasswordHashError::new(format!(
                "timed out after {limit:?}"
            ))),
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}
