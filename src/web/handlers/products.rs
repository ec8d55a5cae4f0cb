//! Product save/list API endpoints.

use crate::error::AppError;
use crate::state::AppState;
use crate::types::{ProductsResponse, SaveProductRequest, SaveProductResponse};
use axum::{extract::State, response::Json};

/// `POST /api/save-product`: validate, append, envelope. Missing required
/// fields answer 400 naming the first missing one; nothing is written.
pub async fn save_product(
    State(state): State<AppState>,
    Json(req): Json<SaveProductRequest>,
) -> Result<Json<SaveProductResponse>, AppError> {
    let new = req.validate()?;

    let record = state.store.append(new)?;
    tracing::info!("saved product '{}'", record.name);

    Ok(Json(SaveProductResponse {
        success: true,
        message: format!("Product '{}' saved successfully", record.name),
    }))
}

/// `GET /api/get-products`: every stored product, in insertion order.
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = state.store.list_all()?;

    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}
