//! Orders: domain values and the order service.

mod service;

pub use service::OrderService;

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};

use crate::error::ValidationError;

/// Input for placing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub qty: i32,
    pub unit_price: i32,
}

impl OrderDraft {
    pub fn new(
        user_id: impl Into<UserId>,
        product_id: impl Into<ProductId>,
        qty: i32,
        unit_price: i32,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: product_id.into(),
            qty,
            unit_price,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub qty: i32,
    pub unit_price: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Validates a draft and turns it into an order placed at `now`.
    ///
    /// Assigns a fresh random ID and fixes `total_price = qty * unit_price`.
    /// Both factors fit in `i32`, so the `i64` product cannot overflow.
    pub fn place(draft: OrderDraft, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let OrderDraft {
            user_id,
            product_id,
            qty,
            unit_price,
        } = draft;

        if qty < 0 {
            return Err(ValidationError::NegativeQuantity { qty });
        }
        if unit_price < 0 {
            return Err(ValidationError::NegativeUnitPrice { unit_price });
        }
        if product_id.as_str().trim().is_empty() {
            return Err(ValidationError::Blank {
                field: "productId",
            });
        }

        Ok(Self {
            order_id: OrderId::generate(),
            user_id,
            product_id,
            qty,
            unit_price,
            total_price: i64::from(qty) * i64::from(unit_price),
            created_at: now,
        })
    }
}

/// An order as it appears in a user's order history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub qty: i32,
    pub unit_price: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_computes_total_price() {
        let order = Order::place(OrderDraft::new("u1", "CATALOG-1", 10, 3000), Utc::now()).unwrap();
        assert_eq!(order.total_price, 30_000);
        assert_eq!(order.qty, 10);
        assert_eq!(order.unit_price, 3000);
    }

    #[test]
    fn total_price_holds_for_non_negative_grid() {
        for qty in [0, 1, 2, 7, 1_000, i32::MAX] {
            for unit_price in [0, 1, 99, 3000, 65_535, i32::MAX] {
                let order =
                    Order::place(OrderDraft::new("u1", "P", qty, unit_price), Utc::now()).unwrap();
                assert_eq!(order.total_price, i64::from(qty) * i64::from(unit_price));
            }
        }
    }

    #[test]
    fn largest_order_does_not_overflow() {
        let order = Order::place(
            OrderDraft::new("u1", "P", i32::MAX, i32::MAX),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(order.total_price, 4_611_686_014_132_420_609);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = Order::place(OrderDraft::new("u1", "P", -1, 100), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::NegativeQuantity { qty: -1 });
    }

    #[test]
    fn negative_unit_price_is_rejected() {
        let err = Order::place(OrderDraft::new("u1", "P", 1, -100), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::NegativeUnitPrice { unit_price: -100 });
    }

    #[test]
    fn blank_product_id_is_rejected() {
        let err = Order::place(OrderDraft::new("u1", "  ", 1, 100), Utc::now()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Blank {
                field: "productId"
            }
        );
    }

    #[test]
    fn each_placed_order_gets_a_new_id() {
        let now = Utc::now();
        let a = Order::place(OrderDraft::new("u1", "P", 1, 1), now).unwrap();
        let b = Order::place(OrderDraft::new("u1", "P", 1, 1), now).unwrap();
        assert_ne!(a.order_id, b.order_id);
    }
}
