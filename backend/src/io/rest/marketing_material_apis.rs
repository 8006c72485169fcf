//! # REST API for Marketing Materials

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::domain::commands::materials::MarketingMaterialListQuery;
use crate::io::rest::mappers::marketing_material_mapper::MarketingMaterialMapper;
use crate::AppState;
use shared::{
    CreateMarketingMaterialRequest, MarketingMaterialListRequest, UpdateMarketingMaterialRequest,
};

/// Create a router for marketing material related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route(
            "/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
}

pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MarketingMaterialListRequest>,
) -> impl IntoResponse {
    info!("GET /api/materials - query: {:?}", query);

    let query = MarketingMaterialListQuery {
        event_id: query.event_id,
    };
    match state.marketing_material_service.list_materials(query).await {
        Ok(materials) => (
            StatusCode::OK,
            Json(MarketingMaterialMapper::to_list_response(materials)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list marketing materials: {}", e);
            e.into_response()
        }
    }
}

pub async fn create_material(
    State(state): State<AppState>,
    Json(request): Json<CreateMarketingMaterialRequest>,
) -> impl IntoResponse {
    info!("POST /api/materials - request: {:?}", request);

    let command = MarketingMaterialMapper::to_create_command(request);
    match state.marketing_material_service.create_material(command).await {
        Ok(material) => (
            StatusCode::CREATED,
            Json(MarketingMaterialMapper::to_dto(material)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create marketing material: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/materials/{}", id);

    match state.marketing_material_service.get_material(&id).await {
        Ok(material) => {
            (StatusCode::OK, Json(MarketingMaterialMapper::to_dto(material))).into_response()
        }
        Err(e) => {
            error!("Failed to get marketing material {}: {}", id, e);
            e.into_response()
        }
    }
}

pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMarketingMaterialRequest>,
) -> impl IntoResponse {
    info!("PUT /api/materials/{} - request: {:?}", id, request);

    let command = MarketingMaterialMapper::to_update_command(id.clone(), request);
    match state.marketing_material_service.update_material(command).await {
        Ok(material) => {
            (StatusCode::OK, Json(MarketingMaterialMapper::to_dto(material))).into_response()
        }
        Err(e) => {
            error!("Failed to update marketing material {}: {}", id, e);
            e.into_response()
        }
    }
}

pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/materials/{}", id);

    match state.marketing_material_service.delete_material(&id).await {
        Ok(material) => (
            StatusCode::OK,
            Json(MarketingMaterialMapper::to_delete_response(material)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete marketing material {}: {}", id, e);
            e.into_response()
        }
    }
}
