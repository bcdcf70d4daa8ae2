use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::chat::prompts::SUGGESTED_QUESTIONS;
use crate::errors::AppError;
use crate::sessions::ChatView;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// POST /api/v1/sessions/:id/chat
///
/// Blocks until the answer (or the apology) is recorded. 400 on a blank
/// question, 409 while another question is in flight.
pub async fn handle_ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AskRequest>,
) -> Result<Json<ChatView>, AppError> {
    let session = state.sessions.get(id).await?;
    session.ask(state.completion.clone(), &req.question).await?;
    Ok(Json(session.chat_view().await))
}

/// GET /api/v1/chat/suggestions
pub async fn handle_suggestions() -> Json<[&'static str; 5]> {
    Json(SUGGESTED_QUESTIONS)
}
