// src/services/storefront.rs
//! Session-level operations. Every state change that can affect
//! recommendations is followed by an explicit `refresh_recommendations`.
//! Locks are never held across a completion call.

use tracing::{debug, info, instrument};

use super::catalog::Product;
use super::chatbot::{self, ChatRole};
use super::recommender::{self, RecommendationContext};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nothing in the cart or chat yet; prior recommendations kept.
    Skipped,
    Applied,
    /// A newer request was issued while this one was in flight.
    Stale,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Ignored,
    Replied(String),
}

#[instrument(skip(state, product), fields(product_id = product.id))]
pub async fn add_to_cart(
    state: &AppState,
    session_id: &str,
    product: &Product,
) -> Result<RefreshOutcome, AppError> {
    state
        .sessions
        .update(session_id, |s| s.cart.add(product))
        .await
        .ok_or_else(|| AppError::unknown_session(session_id))?;

    refresh_recommendations(state, session_id).await
}

/// Returns `None` for the refresh when the update was ignored.
#[instrument(skip(state))]
pub async fn update_quantity(
    state: &AppState,
    session_id: &str,
    product_id: u32,
    quantity: i64,
) -> Result<Option<RefreshOutcome>, AppError> {
    let changed = state
        .sessions
        .update(session_id, |s| s.cart.update_quantity(product_id, quantity))
        .await
        .ok_or_else(|| AppError::unknown_session(session_id))?;

    if !changed {
        debug!("quantity update ignored");
        return Ok(None);
    }
    refresh_recommendations(state, session_id).await.map(Some)
}

#[instrument(skip(state, message))]
pub async fn submit_chat(
    state: &AppState,
    session_id: &str,
    message: &str,
) -> Result<ChatOutcome, AppError> {
    if !chatbot::is_submittable(message) {
        if !state.sessions.contains(session_id).await {
            return Err(AppError::unknown_session(session_id));
        }
        return Ok(ChatOutcome::Ignored);
    }

    state
        .sessions
        .update(session_id, |s| s.transcript.push(ChatRole::User, message))
        .await
        .ok_or_else(|| AppError::unknown_session(session_id))?;

    let reply = chatbot::generate_reply(state.completion.as_ref(), message).await;

    // The message counts as an interest even when the reply was the apology.
    state
        .sessions
        .update(session_id, |s| {
            s.transcript.push(ChatRole::Assistant, reply.as_str());
            s.chat_messages.push(message.to_string());
        })
        .await
        .ok_or_else(|| AppError::unknown_session(session_id))?;

    refresh_recommendations(state, session_id).await?;
    Ok(ChatOutcome::Replied(reply))
}

#[instrument(skip(state))]
pub async fn refresh_recommendations(
    state: &AppState,
    session_id: &str,
) -> Result<RefreshOutcome, AppError> {
    let pending = state
        .sessions
        .update(session_id, |s| {
            RecommendationContext::new(s.cart.lines(), &s.chat_messages)
                .map(|ctx| (s.recommendations.issue(), ctx))
        })
        .await
        .ok_or_else(|| AppError::unknown_session(session_id))?;

    let Some((ticket, context)) = pending else {
        return Ok(RefreshOutcome::Skipped);
    };

    let recs = recommender::fetch_recommendations(state.completion.as_ref(), &context).await;

    let applied = state
        .sessions
        .update(session_id, |s| s.recommendations.apply(ticket, recs))
        .await
        .unwrap_or(false);

    if applied {
        Ok(RefreshOutcome::Applied)
    } else {
        info!(ticket, "discarding stale recommendations");
        Ok(RefreshOutcome::Stale)
    }
}
