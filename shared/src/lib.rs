use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Absent fields stay `None` through `#[serde(default)]`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(value))`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Event ID in format: "event::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Display name shown on planner cards
    pub title: String,
    pub description: Option<String>,
    /// First month (1-12) the event occurs in
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    /// Legacy month field, only read when `start_month` is absent
    #[serde(default)]
    pub month: Option<u32>,
    /// Legacy year field, only read when `start_year` is absent
    #[serde(default)]
    pub year: Option<i32>,
    /// Last month of a multi-month event
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_recurring: bool,
    /// Whole months of lead time needed before the start month
    pub prep_months_needed: Option<u32>,
    /// Explicit date preparation should begin (takes precedence over months)
    pub prep_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub outreach_angles: Vec<OutreachAngle>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Free-form marketing angle attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachAngle {
    pub angle: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub end_month: Option<u32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub prep_months_needed: Option<u32>,
    #[serde(default)]
    pub prep_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub outreach_angles: Vec<OutreachAngle>,
}

/// Partial update of an event.
///
/// Clearable fields use a double option: omit the field to keep the stored
/// value, send `null` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_month: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub end_year: Option<Option<i32>>,
    #[serde(default)]
    pub is_recurring: Option<bool>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub prep_months_needed: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub prep_start_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub outreach_angles: Option<Vec<OutreachAngle>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventListRequest {
    /// Only events that start in this year or recur
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    pub event: Event,
    /// Short preparation label, empty when the event needs no prep
    pub prep_label: String,
    pub material_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub deleted_event_id: String,
    pub deleted_material_count: usize,
    pub success_message: String,
}

/// Kind of marketing deliverable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Flyer,
    SocialPost,
    Email,
    Poster,
    PressRelease,
    Other,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialType::Flyer => "flyer",
            MaterialType::SocialPost => "social_post",
            MaterialType::Email => "email",
            MaterialType::Poster => "poster",
            MaterialType::PressRelease => "press_release",
            MaterialType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl MaterialType {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "flyer" => Ok(MaterialType::Flyer),
            "social_post" => Ok(MaterialType::SocialPost),
            "email" => Ok(MaterialType::Email),
            "poster" => Ok(MaterialType::Poster),
            "press_release" => Ok(MaterialType::PressRelease),
            "other" => Ok(MaterialType::Other),
            _ => Err(format!("Invalid material type: {}", s)),
        }
    }
}

/// Review state of a marketing deliverable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    Draft,
    InReview,
    Approved,
    Published,
}

impl fmt::Display for MaterialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MaterialStatus::Draft => "draft",
            MaterialStatus::InReview => "in_review",
            MaterialStatus::Approved => "approved",
            MaterialStatus::Published => "published",
        };
        write!(f, "{}", s)
    }
}

impl MaterialStatus {
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "draft" => Ok(MaterialStatus::Draft),
            "in_review" => Ok(MaterialStatus::InReview),
            "approved" => Ok(MaterialStatus::Approved),
            "published" => Ok(MaterialStatus::Published),
            _ => Err(format!("Invalid material status: {}", s)),
        }
    }
}

impl Default for MaterialStatus {
    fn default() -> Self {
        MaterialStatus::Draft
    }
}

/// Material ID in format: "material::<uuid>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingMaterial {
    pub id: String,
    /// Event this deliverable belongs to
    pub event_id: String,
    pub title: String,
    pub material_type: MaterialType,
    pub status: MaterialStatus,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMarketingMaterialRequest {
    pub event_id: String,
    pub title: String,
    pub material_type: MaterialType,
    #[serde(default)]
    pub status: MaterialStatus,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMarketingMaterialRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub material_type: Option<MaterialType>,
    #[serde(default)]
    pub status: Option<MaterialStatus>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingMaterialListRequest {
    pub event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingMaterialListResponse {
    pub materials: Vec<MarketingMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMarketingMaterialResponse {
    pub deleted_material_id: String,
    pub success_message: String,
}

/// An event occurring in a planner month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedEvent {
    pub event: Event,
    pub material_count: usize,
    pub prep_label: String,
}

/// An event whose preparation window covers a planner month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepEvent {
    pub event: Event,
    pub prep_label: String,
    /// Month the preparation leads up to
    pub event_start_month: u32,
    pub event_start_year: i32,
}

/// One month cell of a planner view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub events: Vec<PlannedEvent>,
    pub prep_events: Vec<PrepEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualPlanResponse {
    pub year: i32,
    pub months: Vec<PlannerMonth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterPlanResponse {
    pub year: i32,
    pub quarter: u32,
    pub months: Vec<PlannerMonth>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPlanResponse {
    pub month: PlannerMonth,
}

/// Today's planning period, used by clients to pick default views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPeriodResponse {
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub month_name: String,
    /// Human-readable date, e.g. "October 17, 2026"
    pub formatted_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
