//! # Planner Service
//!
//! Builds the annual, quarterly and monthly planner views. Each request
//! loads the year snapshot and the material counts once, then runs every
//! month of the view through the calendar engine.
//!
//! The snapshot holds every event whose span or prep window reaches into
//! the requested year, so a span starting the year before and a prep
//! window for next year's event both show up.

use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::calendar::{
    self, compare_by_start, format_prep_label, month_name, quarter_months, quarter_of,
    resolve_start, touches_year,
};
use crate::domain::commands::planner::{CurrentPeriod, PlannedEvent, PlannerMonth, PrepEvent};
use crate::domain::errors::{PlannerError, PlannerResult};
use crate::domain::models::event::Event;
use crate::storage::{Connection, EventStorage, MarketingMaterialStorage};

#[derive(Clone)]
pub struct PlannerService<C: Connection> {
    event_repository: C::EventRepository,
    material_repository: C::MarketingMaterialRepository,
}

impl<C: Connection> PlannerService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
            material_repository: connection.create_marketing_material_repository(),
        }
    }

    pub async fn annual_plan(&self, year: i32) -> PlannerResult<Vec<PlannerMonth>> {
        info!("Building annual plan for {}", year);
        self.plan_months(year, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
            .await
    }

    pub async fn quarter_plan(&self, year: i32, quarter: u32) -> PlannerResult<Vec<PlannerMonth>> {
        info!("Building Q{} plan for {}", quarter, year);
        let months = quarter_months(quarter).ok_or_else(|| {
            PlannerError::invalid(format!("Quarter must be between 1 and 4, got {}", quarter))
        })?;
        self.plan_months(year, &months).await
    }

    pub async fn month_plan(&self, year: i32, month: u32) -> PlannerResult<PlannerMonth> {
        info!("Building plan for {}-{:02}", year, month);
        if !(1..=12).contains(&month) {
            return Err(PlannerError::invalid(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        let mut months = self.plan_months(year, &[month]).await?;
        months
            .pop()
            .ok_or_else(|| PlannerError::Storage(anyhow::anyhow!("Planner produced no month")))
    }

    pub fn current_period(&self) -> CurrentPeriod {
        period_for_date(Local::now().date_naive())
    }

    async fn plan_months(&self, year: i32, months: &[u32]) -> PlannerResult<Vec<PlannerMonth>> {
        let mut events: Vec<Event> = self
            .event_repository
            .list_events()
            .await?
            .into_iter()
            .filter(|event| touches_year(event, year))
            .collect();
        events.sort_by(compare_by_start);
        let counts = self.material_repository.count_materials_by_event().await?;

        debug!("Planner snapshot for {} holds {} events", year, events.len());

        Ok(months
            .iter()
            .map(|&month| build_month(&events, &counts, year, month))
            .collect())
    }
}

/// Assemble one planner month from a snapshot.
pub fn build_month(
    events: &[Event],
    material_counts: &HashMap<String, usize>,
    year: i32,
    month: u32,
) -> PlannerMonth {
    let planned = calendar::events_for_month(events, year, month)
        .into_iter()
        .map(|event| PlannedEvent {
            material_count: material_counts.get(&event.id).copied().unwrap_or(0),
            prep_label: format_prep_label(event),
            event: event.clone(),
        })
        .collect();

    let prep_events = calendar::prep_events_for_month(events, year, month)
        .into_iter()
        .filter_map(|event| {
            let start = resolve_start(event)?;
            Some(PrepEvent {
                prep_label: format_prep_label(event),
                event_start_month: start.month,
                event_start_year: start.year,
                event: event.clone(),
            })
        })
        .collect();

    PlannerMonth {
        year,
        month,
        events: planned,
        prep_events,
    }
}

pub fn period_for_date(date: NaiveDate) -> CurrentPeriod {
    let month = date.month();
    CurrentPeriod {
        year: date.year(),
        month,
        quarter: quarter_of(month).unwrap_or(1),
        formatted_date: format!("{} {}, {}", month_name(month), date.day(), date.year()),
    }
}
