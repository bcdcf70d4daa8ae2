use axum::{
    extract::{Path, State},
    Json,
};

use crate::companies::find_by_ticker;
use crate::errors::AppError;
use crate::models::company::Company;
use crate::state::AppState;

/// GET /api/v1/companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = state.companies.list().await?;
    Ok(Json(companies.iter().map(|c| c.as_ref().clone()).collect()))
}

/// GET /api/v1/companies/:ticker
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Company>, AppError> {
    let company = find_by_ticker(state.companies.as_ref(), &ticker)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {ticker} not found")))?;
    Ok(Json(company.as_ref().clone()))
}
