//! # REST API for Planner Views
//!
//! Annual, quarterly and monthly planner grids. Omitted `year`, `quarter` or
//! `month` parameters default to the current period.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::mappers::planner_mapper::PlannerMapper;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PlannerQuery {
    pub year: Option<i32>,
    pub quarter: Option<u32>,
    pub month: Option<u32>,
}

/// Create a router for planner related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/year", get(get_annual_plan))
        .route("/quarter", get(get_quarter_plan))
        .route("/month", get(get_month_plan))
        .route("/current", get(get_current_period))
}

pub async fn get_annual_plan(
    State(state): State<AppState>,
    Query(query): Query<PlannerQuery>,
) -> impl IntoResponse {
    info!("GET /api/planner/year - query: {:?}", query);

    let year = query
        .year
        .unwrap_or_else(|| state.planner_service.current_period().year);
    match state.planner_service.annual_plan(year).await {
        Ok(months) => {
            (StatusCode::OK, Json(PlannerMapper::to_annual_response(year, months))).into_response()
        }
        Err(e) => {
            error!("Failed to build annual plan for {}: {}", year, e);
            e.into_response()
        }
    }
}

pub async fn get_quarter_plan(
    State(state): State<AppState>,
    Query(query): Query<PlannerQuery>,
) -> impl IntoResponse {
    info!("GET /api/planner/quarter - query: {:?}", query);

    let current = state.planner_service.current_period();
    let year = query.year.unwrap_or(current.year);
    let quarter = query.quarter.unwrap_or(current.quarter);
    match state.planner_service.quarter_plan(year, quarter).await {
        Ok(months) => (
            StatusCode::OK,
            Json(PlannerMapper::to_quarter_response(year, quarter, months)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build Q{} plan for {}: {}", quarter, year, e);
            e.into_response()
        }
    }
}

pub async fn get_month_plan(
    State(state): State<AppState>,
    Query(query): Query<PlannerQuery>,
) -> impl IntoResponse {
    info!("GET /api/planner/month - query: {:?}", query);

    let current = state.planner_service.current_period();
    let year = query.year.unwrap_or(current.year);
    let month = query.month.unwrap_or(current.month);
    match state.planner_service.month_plan(year, month).await {
        Ok(planned) => {
            (StatusCode::OK, Json(PlannerMapper::to_month_response(planned))).into_response()
        }
        Err(e) => {
            error!("Failed to build plan for {}-{}: {}", year, month, e);
            e.into_response()
        }
    }
}

pub async fn get_current_period(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/planner/current");

    let period = state.planner_service.current_period();
    (
        StatusCode::OK,
        Json(PlannerMapper::to_current_period_response(period)),
    )
        .into_response()
}
