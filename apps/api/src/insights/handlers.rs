use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::companies::find_by_ticker;
use crate::errors::AppError;
use crate::insights::panel::InsightOutcome;
use crate::insights::runner::run_insight;
use crate::insights::InsightCategory;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InsightResponse {
    pub company_id: String,
    pub category: InsightCategory,
    #[serde(flatten)]
    pub outcome: InsightOutcome,
}

/// GET /api/v1/companies/:ticker/insights/:category
///
/// One-shot insight outside any session. Completion problems still answer 200
/// with `status: degraded` and the category fallback.
pub async fn handle_company_insight(
    State(state): State<AppState>,
    Path((ticker, category)): Path<(String, String)>,
) -> Result<Json<InsightResponse>, AppError> {
    let category: InsightCategory = category
        .parse()
        .map_err(|e: crate::insights::UnknownCategory| AppError::NotFound(e.to_string()))?;
    let company = find_by_ticker(state.companies.as_ref(), &ticker)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {ticker} not found")))?;

    let outcome = run_insight(state.completion.as_ref(), category, &company).await;

    Ok(Json(InsightResponse {
        company_id: company.identity().unwrap_or(&ticker).to_string(),
        category,
        outcome,
    }))
}
