//! # Clinic Planner Backend
//!
//! HTTP backend for planning a clinic's outreach calendar: events with
//! optional spans, yearly recurrence and preparation lead time, the
//! marketing materials that go with them, and annual/quarterly/monthly
//! planner views built by the calendar resolution engine.
//!
//! ## Layers
//!
//! - **storage**: CSV repositories behind the `Connection` trait
//! - **domain**: the calendar engine and the services holding business rules
//! - **io**: axum routers, DTO mapping and error translation
//! - **config**: runtime configuration

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::PlannerConfig;
use crate::domain::{EventService, MarketingMaterialService, PlannerService};
use crate::io::rest::{event_apis, health_apis, marketing_material_apis, planner_apis};
use crate::storage::CsvConnection;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub event_service: EventService<CsvConnection>,
    pub marketing_material_service: MarketingMaterialService<CsvConnection>,
    pub planner_service: PlannerService<CsvConnection>,
}

impl AppState {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self {
            event_service: EventService::new(connection.clone()),
            marketing_material_service: MarketingMaterialService::new(connection.clone()),
            planner_service: PlannerService::new(connection),
        }
    }
}

/// Open the data directory and build the services
pub async fn initialize_backend(config: &PlannerConfig) -> Result<AppState> {
    let data_directory = config.data_directory()?;
    info!("Setting up CSV storage in {:?}", data_directory);
    let connection = Arc::new(CsvConnection::new(&data_directory)?);

    info!("Setting up domain services");
    Ok(AppState::new(connection))
}

/// Build the full application router, mounted under `/api`
pub fn create_router(app_state: AppState, config: &PlannerConfig) -> Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/events", event_apis::router())
        .nest("/materials", marketing_material_apis::router())
        .nest("/planner", planner_apis::router())
        .nest("/health", health_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
