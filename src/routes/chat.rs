use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, recommendation_views},
    services::storefront::{self, ChatOutcome},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = state
        .sessions
        .resolve_session(payload.session_id.as_deref())
        .await;

    let reply = match storefront::submit_chat(&state, &session_id, &payload.message).await? {
        ChatOutcome::Replied(reply) => Some(reply),
        ChatOutcome::Ignored => None,
    };

    let recommendations = state
        .sessions
        .read(&session_id, recommendation_views)
        .await
        .unwrap_or_default();

    Ok(Json(ChatResponse { session_id, reply, recommendations }))
}
