//! Marketing material service domain logic.
//!
//! Materials always belong to an existing event; creating or re-pointing one
//! at an unknown event is rejected.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::materials::{
    CreateMarketingMaterialCommand, MarketingMaterialListQuery, UpdateMarketingMaterialCommand,
};
use crate::domain::errors::{PlannerError, PlannerResult};
use crate::domain::models::marketing_material::MarketingMaterial;
use crate::storage::{Connection, EventStorage, MarketingMaterialStorage};

const MAX_TITLE_LENGTH: usize = 200;

#[derive(Clone)]
pub struct MarketingMaterialService<C: Connection> {
    material_repository: C::MarketingMaterialRepository,
    event_repository: C::EventRepository,
}

impl<C: Connection> MarketingMaterialService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            material_repository: connection.create_marketing_material_repository(),
            event_repository: connection.create_event_repository(),
        }
    }

    pub async fn create_material(
        &self,
        command: CreateMarketingMaterialCommand,
    ) -> PlannerResult<MarketingMaterial> {
        info!(
            "Creating {} material for event {}",
            command.material_type, command.event_id
        );

        self.ensure_event_exists(&command.event_id).await?;

        let now = Utc::now();
        let material = MarketingMaterial {
            id: MarketingMaterial::generate_id(),
            event_id: command.event_id,
            title: validate_title(&command.title)?,
            material_type: command.material_type,
            status: command.status,
            link: trim_optional(command.link),
            notes: trim_optional(command.notes),
            due_date: command.due_date,
            created_at: now,
            updated_at: now,
        };

        self.material_repository.store_material(&material).await?;
        Ok(material)
    }

    pub async fn get_material(&self, material_id: &str) -> PlannerResult<MarketingMaterial> {
        self.material_repository
            .get_material(material_id)
            .await?
            .ok_or_else(|| PlannerError::material_not_found(material_id))
    }

    /// List materials, optionally for a single event, ordered by due date
    /// (undated last) and then title.
    pub async fn list_materials(
        &self,
        query: MarketingMaterialListQuery,
    ) -> PlannerResult<Vec<MarketingMaterial>> {
        if let Some(event_id) = query.event_id.as_deref() {
            self.ensure_event_exists(event_id).await?;
        }

        let mut materials = self
            .material_repository
            .list_materials(query.event_id.as_deref())
            .await?;

        materials.sort_by(|a, b| {
            a.due_date
                .is_none()
                .cmp(&b.due_date.is_none())
                .then(a.due_date.cmp(&b.due_date))
                .then_with(|| a.title.cmp(&b.title))
        });

        Ok(materials)
    }

    pub async fn update_material(
        &self,
        command: UpdateMarketingMaterialCommand,
    ) -> PlannerResult<MarketingMaterial> {
        info!("Updating marketing material {}", command.material_id);

        let mut material = self.get_material(&command.material_id).await?;

        if let Some(title) = command.title {
            material.title = validate_title(&title)?;
        }
        if let Some(material_type) = command.material_type {
            material.material_type = material_type;
        }
        if let Some(status) = command.status {
            material.status = status;
        }
        if let Some(link) = command.link {
            material.link = trim_optional(link);
        }
        if let Some(notes) = command.notes {
            material.notes = trim_optional(notes);
        }
        if let Some(due_date) = command.due_date {
            material.due_date = due_date;
        }
        material.updated_at = Utc::now();

        self.material_repository.update_material(&material).await?;
        Ok(material)
    }

    pub async fn delete_material(&self, material_id: &str) -> PlannerResult<MarketingMaterial> {
        info!("Deleting marketing material {}", material_id);

        let material = self.get_material(material_id).await?;
        if !self.material_repository.delete_material(material_id).await? {
            return Err(PlannerError::material_not_found(material_id));
        }

        Ok(material)
    }

    /// Material count per event id. Events without materials are absent.
    pub async fn material_counts(&self) -> PlannerResult<HashMap<String, usize>> {
        Ok(self.material_repository.count_materials_by_event().await?)
    }

    async fn ensure_event_exists(&self, event_id: &str) -> PlannerResult<()> {
        match self.event_repository.get_event(event_id).await? {
            Some(_) => Ok(()),
            None => Err(PlannerError::event_not_found(event_id)),
        }
    }
}

fn validate_title(title: &str) -> PlannerResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PlannerError::invalid("Material title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PlannerError::invalid(format!(
            "Material title cannot exceed {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(title.to_string())
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
