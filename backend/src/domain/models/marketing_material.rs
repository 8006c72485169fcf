use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::{MaterialStatus, MaterialType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketingMaterial {
    pub id: String,
    pub event_id: String,
    pub title: String,
    pub material_type: MaterialType,
    pub status: MaterialStatus,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MarketingMaterial {
    pub fn generate_id() -> String {
        format!("material::{}", uuid::Uuid::new_v4())
    }
}
