//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::models::event::Event;
use crate::domain::models::marketing_material::MarketingMaterial;

/// Trait defining the interface for event storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (SQL databases, CSV files, hosted tables, etc.) without modification.
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Store a new event
    async fn store_event(&self, event: &Event) -> Result<()>;

    /// Retrieve a specific event by ID
    async fn get_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// List every stored event in insertion order
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// List the snapshot for a planner year:
    /// `start_year == year OR year == year OR is_recurring`
    async fn list_events_for_year(&self, year: i32) -> Result<Vec<Event>>;

    /// Replace an existing event. Fails if the event does not exist.
    async fn update_event(&self, event: &Event) -> Result<()>;

    /// Delete an event
    /// Returns true if the event was found and deleted, false otherwise
    async fn delete_event(&self, event_id: &str) -> Result<bool>;
}

/// Trait defining the interface for marketing material storage operations
#[async_trait]
pub trait MarketingMaterialStorage: Send + Sync {
    /// Store a new marketing material
    async fn store_material(&self, material: &MarketingMaterial) -> Result<()>;

    /// Retrieve a specific material by ID
    async fn get_material(&self, material_id: &str) -> Result<Option<MarketingMaterial>>;

    /// List materials, optionally only those linked to one event
    async fn list_materials(&self, event_id: Option<&str>) -> Result<Vec<MarketingMaterial>>;

    /// Replace an existing material. Fails if the material does not exist.
    async fn update_material(&self, material: &MarketingMaterial) -> Result<()>;

    /// Delete a single material
    /// Returns true if the material was found and deleted, false otherwise
    async fn delete_material(&self, material_id: &str) -> Result<bool>;

    /// Delete every material linked to an event
    /// Returns the number of materials actually deleted
    async fn delete_materials_for_event(&self, event_id: &str) -> Result<usize>;

    /// Number of materials per event ID. Events without materials are absent.
    async fn count_materials_by_event(&self) -> Result<HashMap<String, usize>>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (database, CSV, etc.)
/// and provides factory methods for creating repositories. This allows the domain
/// layer to work with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of EventStorage this connection creates
    type EventRepository: EventStorage + Clone;

    /// The type of MarketingMaterialStorage this connection creates
    type MarketingMaterialRepository: MarketingMaterialStorage + Clone;

    /// Create a new event repository for this connection
    fn create_event_repository(&self) -> Self::EventRepository;

    /// Create a new marketing material repository for this connection
    fn create_marketing_material_repository(&self) -> Self::MarketingMaterialRepository;
}
