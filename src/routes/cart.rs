// src/routes/cart.rs
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppError,
    message::{AddToCartRequest, CartResponse, UpdateQuantityRequest},
    services::{catalog, storefront},
    state::SharedState,
};

pub async fn add_to_cart_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let product = catalog::find(payload.product_id)
        .ok_or_else(|| AppError::unknown_product(payload.product_id))?;

    let session_id = state
        .sessions
        .resolve_session(payload.session_id.as_deref())
        .await;

    storefront::add_to_cart(&state, &session_id, product).await?;
    cart_response(&state, &session_id).await
}

pub async fn update_quantity_handler(
    State(state): State<SharedState>,
    Path(product_id): Path<u32>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = payload
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("session_id is required".to_string()))?;

    storefront::update_quantity(&state, &session_id, product_id, payload.quantity).await?;
    cart_response(&state, &session_id).await
}

async fn cart_response(state: &SharedState, session_id: &str) -> Result<Json<CartResponse>, AppError> {
    state
        .sessions
        .read(session_id, CartResponse::from_session)
        .await
        .map(Json)
        .ok_or_else(|| AppError::unknown_session(session_id))
}
