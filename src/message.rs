// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::cart::{Cart, CartLine};
use crate::services::chatbot::ChatEntry;
use crate::services::recommender::{self, ResolvedRecommendation};
use crate::services::session_manager::ShopSession;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    /// Absent when the message was blank and therefore ignored.
    pub reply: Option<String>,
    pub recommendations: Vec<RecommendationView>,
}

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub session_id: Option<String>,
    pub product_id: u32,
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub session_id: Option<String>,
    pub quantity: i64,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub transcript: Vec<ChatEntry>,
}

#[derive(Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub transcript: Vec<ChatEntry>,
}

#[derive(Serialize, Deserialize)]
pub struct CartLineView {
    pub product_id: u32,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            name: line.product.name.to_string(),
            price: line.product.price,
            quantity: line.quantity,
            subtotal: line.subtotal(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub line_count: usize,
    pub item_count: u64,
    pub total: f64,
    pub checkout_enabled: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total: cart.total(),
            checkout_enabled: cart.checkout_enabled(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct RecommendationView {
    pub product_id: u32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub reason: String,
}

impl From<ResolvedRecommendation> for RecommendationView {
    fn from(rec: ResolvedRecommendation) -> Self {
        Self {
            product_id: rec.product.id,
            name: rec.product.name.to_string(),
            price: rec.product.price,
            category: rec.product.category.to_string(),
            reason: rec.reason,
        }
    }
}

pub fn recommendation_views(session: &ShopSession) -> Vec<RecommendationView> {
    recommender::resolve(session.recommendations.items())
        .into_iter()
        .map(RecommendationView::from)
        .collect()
}

/// Cart and recommendations after a cart mutation.
#[derive(Serialize, Deserialize)]
pub struct CartResponse {
    pub session_id: String,
    pub cart: CartView,
    pub recommendations: Vec<RecommendationView>,
}

impl CartResponse {
    pub fn from_session(session: &ShopSession) -> Self {
        Self {
            session_id: session.id.clone(),
            cart: CartView::from(&session.cart),
            recommendations: recommendation_views(session),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub session_id: String,
    pub recommendations: Vec<RecommendationView>,
}
