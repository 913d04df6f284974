use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use store::OrderRecord;

use crate::error::MappingError;
use crate::order::{Order, OrderDraft, OrderSummary};

/// Body of `POST /{userId}/orders`. The owner comes from the path; a
/// `userId` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOrder {
    pub product_id: Option<ProductId>,
    pub qty: Option<i32>,
    pub unit_price: Option<i32>,
}

impl RequestOrder {
    /// Maps the request to an order draft owned by `user_id`.
    pub fn into_domain(self, user_id: UserId) -> Result<OrderDraft, MappingError> {
        let RequestOrder {
            product_id,
            qty,
            unit_price,
        } = self;

        Ok(OrderDraft {
            user_id,
            product_id: product_id.ok_or(MappingError::missing("RequestOrder", "productId"))?,
            qty: qty.ok_or(MappingError::missing("RequestOrder", "qty"))?,
            unit_price: unit_price.ok_or(MappingError::missing("RequestOrder", "unitPrice"))?,
        })
    }
}

/// Outbound order representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseOrder {
    pub product_id: ProductId,
    pub qty: i32,
    pub unit_price: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub order_id: OrderId,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        let Order {
            order_id,
            user_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        } = order;

        Self {
            order_id,
            user_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        let OrderRecord {
            order_id,
            user_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        } = record;

        Self {
            order_id,
            user_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        }
    }
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        let Order {
            order_id,
            user_id: _,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        } = order;

        Self {
            order_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        }
    }
}

impl From<OrderSummary> for ResponseOrder {
    fn from(summary: OrderSummary) -> Self {
        let OrderSummary {
            order_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        } = summary;

        Self {
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
            order_id,
        }
    }
}

impl From<Order> for ResponseOrder {
    fn from(order: Order) -> Self {
        OrderSummary::from(order).into()
    }
}

/// Order history entries fetched from a remote order service arrive in the
/// response shape.
impl From<ResponseOrder> for OrderSummary {
    fn from(response: ResponseOrder) -> Self {
        let ResponseOrder {
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
            order_id,
        } = response;

        Self {
            order_id,
            product_id,
            qty,
            unit_price,
            total_price,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::place(OrderDraft::new("u1", "CATALOG-001", 10, 3000), Utc::now()).unwrap()
    }

    #[test]
    fn request_maps_with_owner_from_path() {
        let request: RequestOrder = serde_json::from_str(
            r#"{"productId": "CATALOG-001", "qty": 10, "unitPrice": 3000}"#,
        )
        .unwrap();

        let draft = request.into_domain(UserId::new("u1")).unwrap();
        assert_eq!(draft, OrderDraft::new("u1", "CATALOG-001", 10, 3000));
    }

    #[test]
    fn user_id_in_body_is_ignored() {
        let request: RequestOrder = serde_json::from_str(
            r#"{"productId": "P", "qty": 1, "unitPrice": 1, "userId": "someone-else"}"#,
        )
        .unwrap();

        let draft = request.into_domain(UserId::new("u1")).unwrap();
        assert_eq!(draft.user_id.as_str(), "u1");
    }

    #[test]
    fn missing_quantity_is_a_mapping_error() {
        let request: RequestOrder =
            serde_json::from_str(r#"{"productId": "P", "unitPrice": 1}"#).unwrap();

        let err = request.into_domain(UserId::new("u1")).unwrap_err();
        assert_eq!(err.field, "qty");
    }

    #[test]
    fn record_conversion_preserves_every_field() {
        let order = order();
        let back = Order::from(OrderRecord::from(order.clone()));
        assert_eq!(back, order);
    }

    #[test]
    fn response_uses_camel_case_and_omits_owner() {
        let order = order();
        let json = serde_json::to_value(ResponseOrder::from(order.clone())).unwrap();

        assert_eq!(json["productId"], "CATALOG-001");
        assert_eq!(json["unitPrice"], 3000);
        assert_eq!(json["totalPrice"], 30_000);
        assert_eq!(json["orderId"], order.order_id.as_str());
        assert!(json.get("userId").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn remote_response_becomes_summary() {
        let order = order();
        let response = ResponseOrder::from(order.clone());
        let json = serde_json::to_string(&response).unwrap();

        let decoded: ResponseOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(OrderSummary::from(decoded), OrderSummary::from(order));
    }
}
