use common::UserId;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use store::UserRecord;

use crate::error::MappingError;
use crate::user::{User, UserDetail, UserDraft};

use super::ResponseOrder;

/// Body of `POST /users`.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUser {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for RequestUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestUser")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl RequestUser {
    /// Maps the request to a user draft.
    pub fn into_domain(self) -> Result<UserDraft, MappingError> {
        let RequestUser {
            email,
            display_name,
            password,
        } = self;

        Ok(UserDraft {
            email: email.ok_or(MappingError::missing("RequestUser", "email"))?,
            display_name: display_name
                .ok_or(MappingError::missing("RequestUser", "displayName"))?,
            password: password
                .map(SecretString::from)
                .ok_or(MappingError::missing("RequestUser", "password"))?,
        })
    }
}

/// Outbound user representation. Declares no credential field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseUser {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<ResponseOrder>>,
    /// Set when `orders` is empty because the order history was unavailable.
    #[serde(default, skip_serializing_if = "is_false")]
    pub orders_degraded: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Builds the persisted record for `user`. The hash is the one field the
/// domain value does not carry, so it is passed explicitly.
pub fn to_persisted(user: User, encrypted_password: String) -> UserRecord {
    let User {
        user_id,
        email,
        display_name,
    } = user;

    UserRecord {
        user_id,
        email,
        display_name,
        encrypted_password,
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let UserRecord {
            user_id,
            email,
            display_name,
            encrypted_password: _,
        } = record;

        Self {
            user_id,
            email,
            display_name,
        }
    }
}

impl From<User> for ResponseUser {
    fn from(user: User) -> Self {
        let User {
            user_id,
            email,
            display_name,
        } = user;

        Self {
            user_id,
            email,
            display_name,
            orders: None,
            orders_degraded: false,
        }
    }
}

impl From<UserRecord> for ResponseUser {
    fn from(record: UserRecord) -> Self {
        User::from(record).into()
    }
}

impl From<UserDetail> for ResponseUser {
    fn from(detail: UserDetail) -> Self {
        let UserDetail {
            user,
            orders,
            degraded,
        } = detail;

        Self {
            orders: Some(orders.into_iter().map(ResponseOrder::from).collect()),
            orders_degraded: degraded.is_some(),
            ..Self::from(user)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::order::OrderSummary;

    fn record() -> UserRecord {
        UserRecord {
            user_id: UserId::new("u1"),
            email: "a@b.com".to_string(),
            display_name: "A".to_string(),
            encrypted_password: "$2b$04$hash".to_string(),
        }
    }

    #[test]
    fn request_maps_to_draft() {
        let request: RequestUser = serde_json::from_str(
            r#"{"email": "a@b.com", "displayName": "A", "password": "secret"}"#,
        )
        .unwrap();

        let draft = request.into_domain().unwrap();
        assert_eq!(draft.email, "a@b.com");
        assert_eq!(draft.display_name, "A");
        assert_eq!(draft.password.expose_secret(), "secret");
    }

    #[test]
    fn request_debug_does_not_show_password() {
        let request: RequestUser =
            serde_json::from_str(r#"{"email": "a@b.com", "password": "secret"}"#).unwrap();
        assert!(!format!("{request:?}").contains("secret"));
    }

    #[test]
    fn missing_required_field_is_a_mapping_error() {
        let request: RequestUser =
            serde_json::from_str(r#"{"email": "a@b.com", "password": "secret"}"#).unwrap();

        let err = request.into_domain().unwrap_err();
        assert_eq!(err, MappingError::missing("RequestUser", "displayName"));
    }

    #[test]
    fn similarly_named_fields_are_not_matched() {
        // `name` and `pwd` are not `displayName` and `password`.
        let request: RequestUser =
            serde_json::from_str(r#"{"email": "a@b.com", "name": "A", "pwd": "secret"}"#).unwrap();

        assert!(request.display_name.is_none());
        assert!(request.password.is_none());
    }

    #[test]
    fn record_to_user_drops_the_hash() {
        let user = User::from(record());
        assert_eq!(user.user_id.as_str(), "u1");
        assert!(!format!("{user:?}").contains("$2b$"));
    }

    #[test]
    fn response_never_carries_credentials() {
        let json = serde_json::to_value(ResponseUser::from(record())).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys.len(), 3);
        for key in ["userId", "email", "displayName"] {
            assert!(keys.iter().any(|k| k == key), "missing {key}");
        }
        assert!(!json.to_string().contains("$2b$"));
    }

    #[test]
    fn detail_response_carries_orders() {
        let detail = UserDetail::complete(
            User::from(record()),
            vec![OrderSummary {
                order_id: "o1".into(),
                product_id: "CATALOG-1".into(),
                qty: 2,
                unit_price: 5,
                total_price: 10,
                created_at: Utc::now(),
            }],
        );

        let json = serde_json::to_value(ResponseUser::from(detail)).unwrap();
        assert_eq!(json["orders"][0]["orderId"], "o1");
        assert_eq!(json["orders"][0]["totalPrice"], 10);
        assert!(json.get("ordersDegraded").is_none());
    }

    #[test]
    fn degraded_detail_is_flagged() {
        let detail = UserDetail::degraded(User::from(record()), "order service timed out");

        let json = serde_json::to_value(ResponseUser::from(detail)).unwrap();
        assert_eq!(json["orders"], serde_json::json!([]));
        assert_eq!(json["ordersDegraded"], true);
    }

    #[test]
    fn to_persisted_keeps_supplied_hash() {
        let record = to_persisted(User::from(record()), "new-hash".to_string());
        assert_eq!(record.encrypted_password, "new-hash");
        assert_eq!(record.email, "a@b.com");
    }
}
