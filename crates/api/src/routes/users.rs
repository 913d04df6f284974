//! User service endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::UserId;
use domain::{RequestUser, ResponseUser};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /user-service/welcome
pub async fn welcome(State(state): State<Arc<AppState>>) -> String {
    state.greeting.clone()
}

/// POST /user-service/users
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RequestUser>, JsonRejection>,
) -> Result<(StatusCode, Json<ResponseUser>), ApiError> {
    let Json(request) = payload?;
    let user = state.users.create_user(request.into_domain()?).await?;

    Ok((StatusCode::CREATED, Json(ResponseUser::from(user))))
}

/// GET /user-service/users
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ResponseUser>>, ApiError> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into_iter().map(ResponseUser::from).collect()))
}

/// GET /user-service/users/{userId}: the user with their order history.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ResponseUser>, ApiError> {
    let detail = state
        .user_details
        .get_user_detail(&UserId::new(user_id))
        .await?;
    Ok(Json(ResponseUser::from(detail)))
}
