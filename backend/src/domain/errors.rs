//! Domain error types shared by all planner services.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl PlannerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PlannerError::InvalidInput(message.into())
    }

    pub fn event_not_found(id: &str) -> Self {
        PlannerError::NotFound {
            kind: "Event",
            id: id.to_string(),
        }
    }

    pub fn material_not_found(id: &str) -> Self {
        PlannerError::NotFound {
            kind: "Marketing material",
            id: id.to_string(),
        }
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;
