// src/services/recommender.rs
//! Product recommendations derived from cart contents and chat interests.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cart::CartLine;
use super::catalog::{self, Product};
use super::completion::{CompletionMessage, CompletionService};

pub const MAX_RECOMMENDATIONS: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product_id: u32,
    pub reason: String,
}

impl Recommendation {
    pub fn new(product_id: u32, reason: impl Into<String>) -> Self {
        Self { product_id, reason: reason.into() }
    }
}

/// Used when the service answered but not with a JSON array.
pub fn parse_failure_fallback() -> Vec<Recommendation> {
    vec![
        Recommendation::new(2, "Pairs well with electronics you're interested in"),
        Recommendation::new(5, "Great for active lifestyles based on your preferences"),
        Recommendation::new(6, "Popular accessory that complements your selections"),
    ]
}

/// Used when the call itself failed.
pub fn network_failure_fallback() -> Vec<Recommendation> {
    vec![
        Recommendation::new(1, "Popular item frequently bought together with your selections"),
        Recommendation::new(3, "Based on your interest in active lifestyle products"),
        Recommendation::new(4, "Home essential that complements your order"),
    ]
}

/// What the shopper has shown interest in so far.
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationContext {
    cart: Vec<(&'static str, u32)>,
    interests: Vec<String>,
}

impl RecommendationContext {
    /// `None` when there is nothing to recommend from.
    pub fn new(lines: &[CartLine], chat_messages: &[String]) -> Option<Self> {
        if lines.is_empty() && chat_messages.is_empty() {
            return None;
        }
        Some(Self {
            cart: lines.iter().map(|l| (l.product.name, l.quantity)).collect(),
            interests: chat_messages.to_vec(),
        })
    }

    pub fn prompt(&self) -> String {
        let mut parts = Vec::with_capacity(3);

        if !self.cart.is_empty() {
            let items = self
                .cart
                .iter()
                .map(|(name, qty)| format!("{name} (qty: {qty})"))
                .collect::<Vec<_>>()
                .join(", ");
            parts.push(format!("User has these items in cart: {items}."));
        }
        if !self.interests.is_empty() {
            parts.push(format!(
                "User has expressed interest in: {}.",
                self.interests.join(", ")
            ));
        }
        parts.push(format!(
            "Please recommend {MAX_RECOMMENDATIONS} products that would complement these interests."
        ));

        parts.join(" ")
    }
}

pub fn system_instruction() -> String {
    let products = serde_json::to_string(catalog::products()).unwrap_or_else(|e| {
        warn!(error = %e, "failed to serialize catalog");
        "[]".to_string()
    });
    format!(
        "You are a product recommendation engine for an ecommerce store. \
         Analyze the user's cart and chat history to suggest relevant products. \
         Return ONLY a JSON array of objects with productId and reason properties. \
         Available products: {products}"
    )
}

/// Parse a completion as a JSON array, keeping the first three entries.
///
/// `None` only when the text is not a JSON array. Entries inside the array
/// that aren't `{productId, reason}` objects are skipped.
pub fn parse_recommendations(text: &str) -> Option<Vec<Recommendation>> {
    // A JSON object (or any non-array) counts as unparseable too.
    let mut entries: Vec<serde_json::Value> = serde_json::from_str(strip_code_fence(text)).ok()?;
    entries.truncate(MAX_RECOMMENDATIONS);
    Some(
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
    )
}

// Models like to wrap JSON in ```json fences.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Ask the completion service for recommendations. Never fails: both the
/// transport and the content shape degrade to a fixed fallback list.
pub async fn fetch_recommendations(
    service: &dyn CompletionService,
    context: &RecommendationContext,
) -> Vec<Recommendation> {
    let messages = [
        CompletionMessage::system(system_instruction()),
        CompletionMessage::user(context.prompt()),
    ];

    match service.complete(&messages).await {
        Ok(text) => match parse_recommendations(&text) {
            Some(recs) => {
                debug!(count = recs.len(), "recommendations parsed");
                recs
            }
            None => {
                warn!("completion was not a JSON array, using fallback recommendations");
                parse_failure_fallback()
            }
        },
        Err(e) => {
            warn!(error = %e, "recommendation request failed, using fallback recommendations");
            network_failure_fallback()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedRecommendation {
    pub product: Product,
    pub reason: String,
}

/// Pair recommendations with catalog products, dropping ids the catalog doesn't know.
pub fn resolve(recs: &[Recommendation]) -> Vec<ResolvedRecommendation> {
    recs.iter()
        .filter_map(|r| {
            catalog::find(r.product_id).map(|product| ResolvedRecommendation {
                product: *product,
                reason: r.reason.clone(),
            })
        })
        .collect()
}

/// Current recommendations plus the ticket of the newest request issued.
///
/// Results are only applied for the newest ticket, so a slow response can't
/// overwrite one that was requested later.
#[derive(Clone, Debug, Default)]
pub struct RecommendationSlot {
    latest_ticket: u64,
    items: Vec<Recommendation>,
}

impl RecommendationSlot {
    pub fn issue(&mut self) -> u64 {
        self.latest_ticket += 1;
        self.latest_ticket
    }

    /// Replace the list wholesale if `ticket` is still the newest. Returns whether it was applied.
    pub fn apply(&mut self, ticket: u64, items: Vec<Recommendation>) -> bool {
        if ticket != self.latest_ticket {
            return false;
        }
        self.items = items;
        true
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }
}
