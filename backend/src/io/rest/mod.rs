//! # REST API Interface Layer
//!
//! All routes are mounted under `/api`:
//!
//! | Path                       | Methods            |
//! |----------------------------|--------------------|
//! | `/events`                  | GET, POST          |
//! | `/events/:id`              | GET, PUT, DELETE   |
//! | `/events/:id/materials`    | GET                |
//! | `/materials`               | GET, POST          |
//! | `/materials/:id`           | GET, PUT, DELETE   |
//! | `/planner/year`            | GET                |
//! | `/planner/quarter`         | GET                |
//! | `/planner/month`           | GET                |
//! | `/planner/current`         | GET                |
//! | `/health`                  | GET                |
//!
//! Errors are returned as `{"error": "..."}` with 400 for invalid input,
//! 404 for unknown ids and 500 for everything else.

pub mod event_apis;
pub mod health_apis;
pub mod mappers;
pub mod marketing_material_apis;
pub mod planner_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;

use crate::domain::PlannerError;

impl PlannerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PlannerError::NotFound { .. } => StatusCode::NOT_FOUND,
            PlannerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
