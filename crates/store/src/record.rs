//! Persisted record shapes, one per collection.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};

/// A row of the `users` collection.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    /// One-way hash of the user's password.
    pub encrypted_password: String,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("encrypted_password", &"[REDACTED]")
            .finish()
    }
}

/// A row of the `orders` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub qty: i32,
    pub unit_price: i32,
    /// `qty * unit_price`, fixed when the order was created.
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// A row of the `catalogs` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock: i32,
    pub unit_price: i32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_debug_hides_password_hash() {
        let record = UserRecord {
            user_id: UserId::new("u1"),
            email: "a@b.com".to_string(),
            display_name: "A".to_string(),
            encrypted_password: "$2b$04$abcdefghijklmnopqrstuv".to_string(),
        };

        let debug = format!("{record:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("$2b$"));
    }
}
