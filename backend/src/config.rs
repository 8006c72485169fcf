//! Runtime configuration.
//!
//! Values come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! ```yaml
//! bind_address: 127.0.0.1:3000
//! data_dir: /var/lib/clinic-planner
//! cors_origin: http://localhost:8080
//! log_level: info
//! ```
//!
//! The file is read from `CLINIC_PLANNER_CONFIG`, or `./clinic_planner.yaml`
//! when that is unset. A missing default file is not an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::CsvConnection;

pub const CONFIG_PATH_ENV: &str = "CLINIC_PLANNER_CONFIG";
pub const BIND_ENV: &str = "CLINIC_PLANNER_BIND";
pub const DATA_DIR_ENV: &str = "CLINIC_PLANNER_DATA_DIR";
pub const CORS_ORIGIN_ENV: &str = "CLINIC_PLANNER_CORS_ORIGIN";

const DEFAULT_CONFIG_FILE: &str = "clinic_planner.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub bind_address: String,
    pub data_dir: Option<PathBuf>,
    pub cors_origin: String,
    /// Default filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            data_dir: None,
            cors_origin: "http://localhost:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bind_address) = lookup(BIND_ENV) {
            self.bind_address = bind_address;
        }
        if let Some(data_dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(data_dir));
        }
        if let Some(cors_origin) = lookup(CORS_ORIGIN_ENV) {
            self.cors_origin = cors_origin;
        }
    }

    /// Directory holding the CSV files
    pub fn data_directory(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => CsvConnection::default_directory(),
        }
    }
}
