use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutreachAngle {
    pub angle: String,
    pub notes: String,
}

/// A planned clinic outreach activity as the domain sees it.
///
/// `month`/`year` are the legacy start fields; `start_month`/`start_year`
/// win whenever they are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
    pub is_recurring: bool,
    pub prep_months_needed: Option<u32>,
    pub prep_start_date: Option<NaiveDate>,
    pub outreach_angles: Vec<OutreachAngle>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn generate_id() -> String {
        format!("event::{}", uuid::Uuid::new_v4())
    }

    /// Whether the event belongs in a snapshot fetched for `year`.
    ///
    /// Mirrors the store query `start_year == Y OR year == Y OR is_recurring`.
    pub fn matches_year_filter(&self, year: i32) -> bool {
        self.start_year == Some(year) || self.year == Some(year) || self.is_recurring
    }
}
