//! Catalog service endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::ResponseCatalog;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /catalog-service/catalogs
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResponseCatalog>>, ApiError> {
    let items = state.catalog.get_all_catalog_items().await?;
    Ok(Json(items.into_iter().map(ResponseCatalog::from).collect()))
}
