//! # REST API for Events
//!
//! CRUD endpoints for planned events plus the per-event material listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::commands::events::EventListQuery;
use crate::domain::commands::materials::MarketingMaterialListQuery;
use crate::domain::PlannerError;
use crate::io::rest::mappers::event_mapper::EventMapper;
use crate::io::rest::mappers::marketing_material_mapper::MarketingMaterialMapper;
use crate::AppState;
use shared::{CreateEventRequest, EventListRequest, UpdateEventRequest};

/// Create a router for event related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).put(update_event).delete(delete_event))
        .route("/:id/materials", get(list_event_materials))
}

/// List events, optionally limited to a year's planner snapshot
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListRequest>,
) -> impl IntoResponse {
    info!("GET /api/events - query: {:?}", query);

    match state
        .event_service
        .list_events(EventListQuery { year: query.year })
        .await
    {
        Ok(events) => (StatusCode::OK, Json(EventMapper::to_list_response(events))).into_response(),
        Err(e) => {
            error!("Failed to list events: {}", e);
            e.into_response()
        }
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> impl IntoResponse {
    info!("POST /api/events - request: {:?}", request);

    let command = EventMapper::to_create_command(request);
    match state.event_service.create_event(command).await {
        Ok(event) => {
            (StatusCode::CREATED, Json(EventMapper::to_event_response(event, 0))).into_response()
        }
        Err(e) => {
            error!("Failed to create event: {}", e);
            e.into_response()
        }
    }
}

/// Get a single event with its prep label and material count
pub async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/events/{}", id);

    let result = async {
        let event = state.event_service.get_event(&id).await?;
        let material_count = state.event_service.material_count(&id).await?;
        Ok::<_, PlannerError>(EventMapper::to_event_response(event, material_count))
    }
    .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to get event {}: {}", id, e);
            e.into_response()
        }
    }
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEventRequest>,
) -> impl IntoResponse {
    info!("PUT /api/events/{} - request: {:?}", id, request);

    let command = EventMapper::to_update_command(id.clone(), request);
    let result = async {
        let event = state.event_service.update_event(command).await?;
        let material_count = state.event_service.material_count(&id).await?;
        Ok::<_, PlannerError>(EventMapper::to_event_response(event, material_count))
    }
    .await;

    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update event {}: {}", id, e);
            e.into_response()
        }
    }
}

/// Delete an event and all of its marketing materials
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/events/{}", id);

    match state.event_service.delete_event(&id).await {
        Ok(result) => {
            (StatusCode::OK, Json(EventMapper::to_delete_response(result))).into_response()
        }
        Err(e) => {
            error!("Failed to delete event {}: {}", id, e);
            e.into_response()
        }
    }
}

pub async fn list_event_materials(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/events/{}/materials", id);

    let query = MarketingMaterialListQuery {
        event_id: Some(id.clone()),
    };
    match state.marketing_material_service.list_materials(query).await {
        Ok(materials) => (
            StatusCode::OK,
            Json(MarketingMaterialMapper::to_list_response(materials)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list materials for event {}: {}", id, e);
            e.into_response()
        }
    }
}
