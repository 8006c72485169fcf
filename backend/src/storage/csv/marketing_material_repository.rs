//! # CSV Marketing Material Repository
//!
//! Stores marketing materials in `{data_directory}/marketing_materials.csv`.
//! Each row links to an event through `event_id`.
//!
//! ```csv
//! id,event_id,title,material_type,status,link,notes,due_date,created_at,updated_at
//! material::9a1b...,event::5f0c...,Lobby poster,poster,draft,,,2025-09-01,2025-01-20T10:00:00Z,2025-01-20T10:00:00Z
//! ```

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use shared::{MaterialStatus, MaterialType};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::domain::models::marketing_material::MarketingMaterial;
use crate::storage::traits::MarketingMaterialStorage;

const MATERIALS_HEADER: &str =
    "id,event_id,title,material_type,status,link,notes,due_date,created_at,updated_at";

/// CSV record structure for marketing materials
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MaterialRecord {
    id: String,
    event_id: String,
    title: String,
    material_type: String,
    status: String,
    link: Option<String>,
    notes: Option<String>,
    due_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<&MarketingMaterial> for MaterialRecord {
    fn from(material: &MarketingMaterial) -> Self {
        MaterialRecord {
            id: material.id.clone(),
            event_id: material.event_id.clone(),
            title: material.title.clone(),
            material_type: material.material_type.to_string(),
            status: material.status.to_string(),
            link: material.link.clone(),
            notes: material.notes.clone(),
            due_date: material.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
            created_at: material.created_at.to_rfc3339(),
            updated_at: material.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<MaterialRecord> for MarketingMaterial {
    type Error = anyhow::Error;

    fn try_from(record: MaterialRecord) -> Result<Self> {
        let material_type = MaterialType::from_string(&record.material_type)
            .map_err(|e| anyhow!("Failed to parse material type: {}", e))?;
        let status = MaterialStatus::from_string(&record.status)
            .map_err(|e| anyhow!("Failed to parse material status: {}", e))?;

        let due_date = match record.due_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid due_date '{}': {}", raw, e))?,
            ),
            _ => None,
        };

        Ok(MarketingMaterial {
            id: record.id,
            event_id: record.event_id,
            title: record.title,
            material_type,
            status,
            link: record.link,
            notes: record.notes,
            due_date,
            created_at: DateTime::parse_from_rfc3339(&record.created_at)?.with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&record.updated_at)?.with_timezone(&Utc),
        })
    }
}

/// CSV-based marketing material repository
#[derive(Clone)]
pub struct MarketingMaterialRepository {
    connection: CsvConnection,
}

impl MarketingMaterialRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_materials_file_exists(&self) -> Result<()> {
        self.connection
            .ensure_file_exists(&self.connection.materials_file_path(), MATERIALS_HEADER)
    }

    fn read_materials(&self) -> Result<Vec<MarketingMaterial>> {
        self.ensure_materials_file_exists()?;

        let file = File::open(self.connection.materials_file_path())?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut materials = Vec::new();
        for result in csv_reader.deserialize::<MaterialRecord>() {
            let parsed = result
                .map_err(anyhow::Error::from)
                .and_then(MarketingMaterial::try_from);

            match parsed {
                Ok(material) => materials.push(material),
                Err(e) => warn!("Failed to parse marketing material record: {}. Skipping.", e),
            }
        }

        Ok(materials)
    }

    fn write_materials(&self, materials: &[MarketingMaterial]) -> Result<()> {
        let file_path = self.connection.materials_file_path();
        let temp_file_path = file_path.with_extension("csv.tmp");

        {
            let temp_file = File::create(&temp_file_path)?;
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(temp_file));

            csv_writer.write_record(MATERIALS_HEADER.split(','))?;
            for material in materials {
                csv_writer.serialize(MaterialRecord::from(material))?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_file_path, &file_path)?;

        debug!("Wrote {} marketing materials to {:?}", materials.len(), file_path);
        Ok(())
    }

    fn append_material(&self, material: &MarketingMaterial) -> Result<()> {
        self.ensure_materials_file_exists()?;

        let file = OpenOptions::new()
            .append(true)
            .open(self.connection.materials_file_path())?;
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(file);
        csv_writer.serialize(MaterialRecord::from(material))?;
        csv_writer.flush()?;

        Ok(())
    }
}

#[async_trait]
impl MarketingMaterialStorage for MarketingMaterialRepository {
    async fn store_material(&self, material: &MarketingMaterial) -> Result<()> {
        let lock = self.connection.materials_lock();
        let _guard = lock.lock().await;

        if self.read_materials()?.iter().any(|existing| existing.id == material.id) {
            return Err(anyhow!("Marketing material {} already exists", material.id));
        }

        self.append_material(material)
    }

    async fn get_material(&self, material_id: &str) -> Result<Option<MarketingMaterial>> {
        Ok(self
            .read_materials()?
            .into_iter()
            .find(|material| material.id == material_id))
    }

    async fn list_materials(&self, event_id: Option<&str>) -> Result<Vec<MarketingMaterial>> {
        let materials = self.read_materials()?;

        Ok(match event_id {
            Some(event_id) => materials
                .into_iter()
                .filter(|material| material.event_id == event_id)
                .collect(),
            None => materials,
        })
    }

    async fn update_material(&self, material: &MarketingMaterial) -> Result<()> {
        let lock = self.connection.materials_lock();
        let _guard = lock.lock().await;

        let mut materials = self.read_materials()?;
        let existing = materials
            .iter_mut()
            .find(|existing| existing.id == material.id)
            .ok_or_else(|| anyhow!("Marketing material {} does not exist", material.id))?;
        *existing = material.clone();

        self.write_materials(&materials)
    }

    async fn delete_material(&self, material_id: &str) -> Result<bool> {
        let lock = self.connection.materials_lock();
        let _guard = lock.lock().await;

        let mut materials = self.read_materials()?;
        let before = materials.len();
        materials.retain(|material| material.id != material_id);

        if materials.len() == before {
            return Ok(false);
        }

        self.write_materials(&materials)?;
        Ok(true)
    }

    async fn delete_materials_for_event(&self, event_id: &str) -> Result<usize> {
        let lock = self.connection.materials_lock();
        let _guard = lock.lock().await;

        let mut materials = self.read_materials()?;
        let before = materials.len();
        materials.retain(|material| material.event_id != event_id);
        let deleted = before - materials.len();

        if deleted > 0 {
            self.write_materials(&materials)?;
        }

        Ok(deleted)
    }

    async fn count_materials_by_event(&self) -> Result<HashMap<String, usize>> {
        let mut counts = HashMap::new();
        for material in self.read_materials()? {
            *counts.entry(material.event_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
