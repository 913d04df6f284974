//! Order service endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{OrderId, UserId};
use domain::{RequestOrder, ResponseOrder};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /order-service/{userId}/orders
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    payload: Result<Json<RequestOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseOrder>), ApiError> {
    let Json(request) = payload?;
    let draft = request.into_domain(UserId::new(user_id))?;
    let order = state.orders.create_order(draft).await?;

    Ok((StatusCode::CREATED, Json(ResponseOrder::from(order))))
}

/// GET /order-service/{userId}/orders
#[tracing::instrument(skip(state))]
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ResponseOrder>>, ApiError> {
    let orders = state
        .orders
        .get_orders_by_user_id(&UserId::new(user_id))
        .await?;
    Ok(Json(orders.into_iter().map(ResponseOrder::from).collect()))
}

/// GET /order-service/orders/{orderId}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<ResponseOrder>, ApiError> {
    let order = state
        .orders
        .get_order_by_id(&OrderId::new(order_id))
        .await?;
    Ok(Json(ResponseOrder::from(order)))
}
