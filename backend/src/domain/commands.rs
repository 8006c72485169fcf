//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod events {
    use chrono::NaiveDate;

    use crate::domain::models::event::{Event, OutreachAngle};

    /// Input for creating a new event.
    #[derive(Debug, Clone, Default)]
    pub struct CreateEventCommand {
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
    }

    /// Partial update. `None` keeps the stored value; for the clearable
    /// fields `Some(None)` clears it.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEventCommand {
        pub event_id: String,
        pub title: Option<String>,
        pub description: Option<Option<String>>,
        pub start_month: Option<u32>,
        pub start_year: Option<i32>,
        pub end_month: Option<Option<u32>>,
        pub end_year: Option<Option<i32>>,
        pub is_recurring: Option<bool>,
        pub prep_months_needed: Option<Option<u32>>,
        pub prep_start_date: Option<Option<NaiveDate>>,
        pub outreach_angles: Option<Vec<OutreachAngle>>,
    }

    /// Query parameters for listing events.
    #[derive(Debug, Clone, Default)]
    pub struct EventListQuery {
        pub year: Option<i32>,
    }

    /// Result of deleting an event together with its materials.
    #[derive(Debug, Clone)]
    pub struct DeleteEventResult {
        pub event: Event,
        pub deleted_material_count: usize,
        pub success_message: String,
    }
}

pub mod materials {
    use chrono::NaiveDate;
    use shared::{MaterialStatus, MaterialType};

    /// Input for creating a new marketing material.
    #[derive(Debug, Clone)]
    pub struct CreateMarketingMaterialCommand {
        pub event_id: String,
        pub title: String,
        pub material_type: MaterialType,
        pub status: MaterialStatus,
        pub link: Option<String>,
        pub notes: Option<String>,
        pub due_date: Option<NaiveDate>,
    }

    /// Partial update of a marketing material.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateMarketingMaterialCommand {
        pub material_id: String,
        pub title: Option<String>,
        pub material_type: Option<MaterialType>,
        pub status: Option<MaterialStatus>,
        pub link: Option<Option<String>>,
        pub notes: Option<Option<String>>,
        pub due_date: Option<Option<NaiveDate>>,
    }

    /// Query parameters for listing materials.
    #[derive(Debug, Clone, Default)]
    pub struct MarketingMaterialListQuery {
        pub event_id: Option<String>,
    }
}

pub mod planner {
    use crate::domain::models::event::Event;

    /// An event happening in a planner month.
    #[derive(Debug, Clone)]
    pub struct PlannedEvent {
        pub event: Event,
        pub material_count: usize,
        pub prep_label: String,
    }

    /// An event whose preparation window covers a planner month.
    #[derive(Debug, Clone)]
    pub struct PrepEvent {
        pub event: Event,
        pub prep_label: String,
        pub event_start_month: u32,
        pub event_start_year: i32,
    }

    #[derive(Debug, Clone)]
    pub struct PlannerMonth {
        pub year: i32,
        pub month: u32,
        pub events: Vec<PlannedEvent>,
        pub prep_events: Vec<PrepEvent>,
    }

    /// Today's position in the planning calendar.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CurrentPeriod {
        pub year: i32,
        pub month: u32,
        pub quarter: u32,
        pub formatted_date: String,
    }
}
