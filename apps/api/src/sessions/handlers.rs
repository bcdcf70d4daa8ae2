use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::panel::PanelView;
use crate::insights::{InsightCategory, UnknownCategory};
use crate::navigation::NavigationState;
use crate::sessions::SessionView;
use crate::state::AppState;

/// POST /api/v1/sessions?tab=&company=
pub async fn handle_create_session(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await;
    session
        .navigate(
            NavigationState::from_query(query.as_deref().unwrap_or_default()),
            state.companies.as_ref(),
            state.completion.clone(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(session.view().await)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.view().await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/navigation?tab=&company=
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    RawQuery(query): RawQuery,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    session
        .navigate(
            NavigationState::from_query(query.as_deref().unwrap_or_default()),
            state.companies.as_ref(),
            state.completion.clone(),
        )
        .await?;
    Ok(Json(session.view().await))
}

/// GET /api/v1/sessions/:id/panels/:category
pub async fn handle_get_panel(
    State(state): State<AppState>,
    Path((id, category)): Path<(Uuid, String)>,
) -> Result<Json<PanelView>, AppError> {
    let category: InsightCategory = category
        .parse()
        .map_err(|e: UnknownCategory| AppError::NotFound(e.to_string()))?;
    let session = state.sessions.get(id).await?;
    Ok(Json(session.panel_view(category).await))
}
