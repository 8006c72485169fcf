use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::storage::traits::Connection;

pub(crate) const EVENTS_FILE: &str = "events.csv";
pub(crate) const MATERIALS_FILE: &str = "marketing_materials.csv";

const DEFAULT_DIRECTORY_NAME: &str = "Clinic Planner";

/// CsvConnection manages the data directory and the per-table write locks
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    events_lock: Arc<Mutex<()>>,
    materials_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            events_lock: Arc::new(Mutex::new(())),
            materials_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Platform data directory for the planner
    /// (e.g. `~/.local/share/Clinic Planner` on Linux)
    pub fn default_directory() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine a data directory"))?;
        Ok(data_dir.join(DEFAULT_DIRECTORY_NAME))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn events_file_path(&self) -> PathBuf {
        self.base_directory.join(EVENTS_FILE)
    }

    pub fn materials_file_path(&self) -> PathBuf {
        self.base_directory.join(MATERIALS_FILE)
    }

    /// Lock guarding writes to the events table
    pub(crate) fn events_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.events_lock)
    }

    /// Lock guarding writes to the marketing materials table
    pub(crate) fn materials_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.materials_lock)
    }

    /// Ensure a CSV file exists with the given header line
    pub(crate) fn ensure_file_exists(&self, file_path: &Path, header: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        if !file_path.exists() {
            fs::write(file_path, format!("{}\n", header))?;
            debug!("Created CSV file: {}", file_path.display());
        }

        Ok(())
    }
}

impl Connection for CsvConnection {
    type EventRepository = super::event_repository::EventRepository;
    type MarketingMaterialRepository =
        super::marketing_material_repository::MarketingMaterialRepository;

    fn create_event_repository(&self) -> Self::EventRepository {
        super::event_repository::EventRepository::new(self.clone())
    }

    fn create_marketing_material_repository(&self) -> Self::MarketingMaterialRepository {
        super::marketing_material_repository::MarketingMaterialRepository::new(self.clone())
    }
}
