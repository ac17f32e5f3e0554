// src/routes/mod.rs
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod sessions;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post, put},
};
use cart::{add_to_cart_handler, update_quantity_handler};
use catalog::{get_product_handler, list_products_handler};
use chat::chat_handler;
use sessions::{
    create_session_handler, get_cart_handler, get_recommendations_handler, get_transcript_handler,
};
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/{id}", get(get_product_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/{id}/cart", get(get_cart_handler))
        .route("/sessions/{id}/chat", get(get_transcript_handler))
        .route("/sessions/{id}/recommendations", get(get_recommendations_handler))
        .route("/cart/items", post(add_to_cart_handler))
        .route("/cart/items/{product_id}", put(update_quantity_handler))
        .route("/chat", post(chat_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
}
