//! Axum route handlers for the Product API. Open routes, no API key.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::product::{Product, ProductInput};
use crate::state::AppState;

/// GET /api/v1/products
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.products.list().await?))
}

/// GET /api/v1/products/:id
pub async fn handle_get(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, AppError> {
    let Path(id) = path?;
    Ok(Json(state.products.get(id).await?))
}

/// POST /api/v1/products
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(input) = payload?;
    let product = state.products.create(input.validate()?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/products/:id
///
/// Partial bodies are merged over the stored product.
pub async fn handle_update(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Path(id) = path?;
    let existing = state.products.get(id).await?;
    let Json(input) = payload?;

    let updated = state.products.update(&input.apply_to(existing)?).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/products/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
