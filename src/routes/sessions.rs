// src/routes/sessions.rs
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{
        CartResponse, RecommendationsResponse, SessionResponse, TranscriptResponse,
        recommendation_views,
    },
    state::SharedState,
};

pub async fn create_session_handler(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session_id = state.sessions.create_session().await;
    let transcript = state
        .sessions
        .read(&session_id, |s| s.transcript.entries().to_vec())
        .await
        .ok_or_else(|| AppError::unknown_session(&session_id))?;

    Ok((StatusCode::CREATED, Json(SessionResponse { session_id, transcript })))
}

pub async fn get_cart_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    state
        .sessions
        .read(&id, CartResponse::from_session)
        .await
        .map(Json)
        .ok_or_else(|| AppError::unknown_session(&id))
}

pub async fn get_transcript_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    state
        .sessions
        .read(&id, |s| TranscriptResponse {
            session_id: s.id.clone(),
            transcript: s.transcript.entries().to_vec(),
        })
        .await
        .map(Json)
        .ok_or_else(|| AppError::unknown_session(&id))
}

pub async fn get_recommendations_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    state
        .sessions
        .read(&id, |s| RecommendationsResponse {
            session_id: s.id.clone(),
            recommendations: recommendation_views(s),
        })
        .await
        .map(Json)
        .ok_or_else(|| AppError::unknown_session(&id))
}
