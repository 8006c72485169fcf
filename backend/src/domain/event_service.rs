//! Event service domain logic for the clinic planner.
//!
//! Owns event CRUD and the rules a stored event must satisfy:
//!
//! - Titles are 1-200 characters after trimming
//! - Every event has a resolvable start (canonical or legacy fields) with a
//!   month in 1-12
//! - End months are in 1-12 and need an end year only for non-recurring spans
//! - A non-recurring span written as "same year, earlier end month" is a
//!   wraparound and is stored with the following end year
//! - Start and end years are in 1-9999
//! - Preparation lead time is at most 24 months
//!
//! Deleting an event also deletes its marketing materials, after the event
//! itself is gone.

use chrono::Utc;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::calendar::{compare_by_start, resolve_start, YearMonth};
use crate::domain::commands::events::{
    CreateEventCommand, DeleteEventResult, EventListQuery, UpdateEventCommand,
};
use crate::domain::errors::{PlannerError, PlannerResult};
use crate::domain::models::event::Event;
use crate::storage::{Connection, EventStorage, MarketingMaterialStorage};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_PREP_MONTHS: u32 = 24;
const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

#[derive(Clone)]
pub struct EventService<C: Connection> {
    event_repository: C::EventRepository,
    material_repository: C::MarketingMaterialRepository,
}

impl<C: Connection> EventService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            event_repository: connection.create_event_repository(),
            material_repository: connection.create_marketing_material_repository(),
        }
    }

    pub async fn create_event(&self, command: CreateEventCommand) -> PlannerResult<Event> {
        info!("Creating event: {:?}", command.title);

        let now = Utc::now();
        let mut event = Event {
            id: Event::generate_id(),
            title: command.title,
            description: command.description,
            start_month: command.start_month.or(command.month),
            start_year: command.start_year.or(command.year),
            month: None,
            year: None,
            end_month: command.end_month,
            end_year: command.end_year,
            is_recurring: command.is_recurring,
            prep_months_needed: command.prep_months_needed,
            prep_start_date: command.prep_start_date,
            outreach_angles: command.outreach_angles,
            created_at: now,
            updated_at: now,
        };

        validate_and_normalize(&mut event)?;
        self.event_repository.store_event(&event).await?;

        info!("Created event {}", event.id);
        Ok(event)
    }

    pub async fn get_event(&self, event_id: &str) -> PlannerResult<Event> {
        self.event_repository
            .get_event(event_id)
            .await?
            .ok_or_else(|| PlannerError::event_not_found(event_id))
    }

    /// List events ordered by effective start, then title.
    ///
    /// With a year the list is the planner snapshot for that year.
    pub async fn list_events(&self, query: EventListQuery) -> PlannerResult<Vec<Event>> {
        let mut events = match query.year {
            Some(year) => self.event_repository.list_events_for_year(year).await?,
            None => self.event_repository.list_events().await?,
        };

        sort_events(&mut events);
        Ok(events)
    }

    pub async fn update_event(&self, command: UpdateEventCommand) -> PlannerResult<Event> {
        info!("Updating event {}", command.event_id);

        let mut event = self.get_event(&command.event_id).await?;

        if let Some(title) = command.title {
            event.title = title;
        }
        if let Some(description) = command.description {
            event.description = description;
        }
        if let Some(start_month) = command.start_month {
            event.start_month = Some(start_month);
        }
        if let Some(start_year) = command.start_year {
            event.start_year = Some(start_year);
        }
        if let Some(end_month) = command.end_month {
            event.end_month = end_month;
        }
        if let Some(end_year) = command.end_year {
            event.end_year = end_year;
        }
        if let Some(is_recurring) = command.is_recurring {
            event.is_recurring = is_recurring;
        }
        if let Some(prep_months_needed) = command.prep_months_needed {
            event.prep_months_needed = prep_months_needed;
        }
        if let Some(prep_start_date) = command.prep_start_date {
            event.prep_start_date = prep_start_date;
        }
        if let Some(outreach_angles) = command.outreach_angles {
            event.outreach_angles = outreach_angles;
        }

        validate_and_normalize(&mut event)?;
        event.updated_at = Utc::now();

        self.event_repository.update_event(&event).await?;
        Ok(event)
    }

    pub async fn delete_event(&self, event_id: &str) -> PlannerResult<DeleteEventResult> {
        info!("Deleting event {}", event_id);

        let event = self.get_event(event_id).await?;
        if !self.event_repository.delete_event(event_id).await? {
            warn!("Event {} disappeared before it could be deleted", event_id);
            return Err(PlannerError::event_not_found(event_id));
        }

        let deleted_material_count = self
            .material_repository
            .delete_materials_for_event(event_id)
            .await
            .map_err(|e| {
                error!(
                    "Deleted event {} but its marketing materials remain: {}",
                    event_id, e
                );
                e
            })?;

        Ok(DeleteEventResult {
            success_message: format!(
                "Deleted '{}' and {} marketing material(s)",
                event.title, deleted_material_count
            ),
            event,
            deleted_material_count,
        })
    }

    /// Number of marketing materials linked to an event
    pub async fn material_count(&self, event_id: &str) -> PlannerResult<usize> {
        Ok(self
            .material_repository
            .list_materials(Some(event_id))
            .await?
            .len())
    }
}

fn sort_events(events: &mut [Event]) {
    events.sort_by(compare_by_start);
}

fn check_year(label: &str, year: i32) -> PlannerResult<()> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(PlannerError::invalid(format!(
            "{} must be between {} and {}, got {}",
            label,
            YEAR_RANGE.start(),
            YEAR_RANGE.end(),
            year
        )))
    }
}

/// Check an event against the planner's rules and bring it into canonical
/// form: trimmed text, canonical start fields, absolute end year.
fn validate_and_normalize(event: &mut Event) -> PlannerResult<()> {
    let title = event.title.trim();
    if title.is_empty() {
        return Err(PlannerError::invalid("Event title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PlannerError::invalid(format!(
            "Event title cannot exceed {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    event.title = title.to_string();

    event.description = event
        .description
        .take()
        .map(|description| description.trim().to_string())
        .filter(|description| !description.is_empty());

    let start = resolve_start(event)
        .ok_or_else(|| PlannerError::invalid("Event needs a start month and start year"))?;
    if !(1..=12).contains(&start.month) {
        return Err(PlannerError::invalid(format!(
            "Start month must be between 1 and 12, got {}",
            start.month
        )));
    }
    check_year("Start year", start.year)?;
    event.start_month = Some(start.month);
    event.start_year = Some(start.year);
    if let Some(end_year) = event.end_year {
        check_year("End year", end_year)?;
    }

    match event.end_month {
        Some(end_month) if !(1..=12).contains(&end_month) => {
            return Err(PlannerError::invalid(format!(
                "End month must be between 1 and 12, got {}",
                end_month
            )));
        }
        Some(end_month) if !event.is_recurring => {
            let end_year = match event.end_year {
                Some(year) if year == start.year && end_month < start.month => year + 1,
                Some(year) => year,
                None if end_month < start.month => start.year + 1,
                None => start.year,
            };

            check_year("End year", end_year)?;
            if YearMonth::new(end_year, end_month) < start {
                return Err(PlannerError::invalid("Event cannot end before it starts"));
            }
            event.end_year = Some(end_year);
        }
        Some(_) => {}
        None if event.end_year.is_some() => {
            return Err(PlannerError::invalid("End year requires an end month"));
        }
        None => {}
    }

    if let Some(months) = event.prep_months_needed {
        if months > MAX_PREP_MONTHS {
            return Err(PlannerError::invalid(format!(
                "Preparation cannot exceed {} months",
                MAX_PREP_MONTHS
            )));
        }
    }

    for angle in event.outreach_angles.iter_mut() {
        angle.angle = angle.angle.trim().to_string();
        if angle.angle.is_empty() {
            return Err(PlannerError::invalid("Outreach angle cannot be empty"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::OutreachAngle;
    use crate::domain::models::marketing_material::MarketingMaterial;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::CsvConnection;
    use chrono::NaiveDate;
    use shared::{MaterialStatus, MaterialType};

    async fn setup() -> (EventService<CsvConnection>, TestEnvironment) {
        let env = TestEnvironment::new().await.expect("Failed to create test env");
        let service = EventService::new(Arc::new(env.connection.clone()));
        (service, env)
    }

    fn command(title: &str, start_year: i32, start_month: u32) -> CreateEventCommand {
        CreateEventCommand {
            title: title.to_string(),
            start_month: Some(start_month),
            start_year: Some(start_year),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let (service, _env) = setup().await;

        let created = service
            .create_event(CreateEventCommand {
                description: Some("  Walk-in vaccines  ".to_string()),
                prep_months_needed: Some(2),
                outreach_angles: vec![OutreachAngle {
                    angle: " Parents ".to_string(),
                    notes: "School newsletter".to_string(),
                }],
                ..command("  Flu clinic ", 2025, 10)
            })
            .await
            .expect("Failed to create event");

        assert!(created.id.starts_with("event::"));
        assert_eq!(created.title, "Flu clinic");
        assert_eq!(created.description.as_deref(), Some("Walk-in vaccines"));
        assert_eq!(created.outreach_angles[0].angle, "Parents");

        let fetched = service.get_event(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_event_from_legacy_fields() {
        let (service, _env) = setup().await;

        let created = service
            .create_event(CreateEventCommand {
                title: "Back to school".to_string(),
                month: Some(8),
                year: Some(2025),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(created.start_month, Some(8));
        assert_eq!(created.start_year, Some(2025));
    }

    #[tokio::test]
    async fn test_create_event_validation() {
        let (service, _env) = setup().await;

        let cases = vec![
            command("   ", 2025, 3),
            command(&"x".repeat(201), 2025, 3),
            command("Bad month", 2025, 13),
            CreateEventCommand {
                title: "No start".to_string(),
                ..Default::default()
            },
            CreateEventCommand {
                end_month: Some(0),
                ..command("Bad end", 2025, 3)
            },
            CreateEventCommand {
                end_year: Some(2026),
                ..command("End year only", 2025, 3)
            },
            CreateEventCommand {
                end_month: Some(2),
                end_year: Some(2024),
                ..command("Ends early", 2025, 3)
            },
            CreateEventCommand {
                prep_months_needed: Some(25),
                ..command("Long prep", 2025, 3)
            },
            CreateEventCommand {
                outreach_angles: vec![OutreachAngle {
                    angle: " ".to_string(),
                    notes: String::new(),
                }],
                ..command("Empty angle", 2025, 3)
            },
        ];

        for case in cases {
            let title = case.title.clone();
            let result = service.create_event(case).await;
            assert!(
                matches!(result, Err(PlannerError::InvalidInput(_))),
                "expected invalid input for {:?}",
                title
            );
        }

        assert!(service.list_events(EventListQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_year_wraparound_is_normalized() {
        let (service, _env) = setup().await;

        let explicit = service
            .create_event(CreateEventCommand {
                end_month: Some(2),
                end_year: Some(2025),
                ..command("Winter wellness", 2025, 11)
            })
            .await
            .unwrap();
        assert_eq!(explicit.end_year, Some(2026));

        let implicit = service
            .create_event(CreateEventCommand {
                end_month: Some(5),
                ..command("Spring series", 2025, 3)
            })
            .await
            .unwrap();
        assert_eq!(implicit.end_year, Some(2025));
    }

    #[tokio::test]
    async fn test_recurring_end_year_is_left_alone() {
        let (service, _env) = setup().await;

        let created = service
            .create_event(CreateEventCommand {
                is_recurring: true,
                end_month: Some(2),
                ..command("Annual winter drive", 2024, 11)
            })
            .await
            .unwrap();

        assert_eq!(created.end_month, Some(2));
        assert_eq!(created.end_year, None);
    }

    #[tokio::test]
    async fn test_list_events_sorted_and_filtered() {
        let (service, _env) = setup().await;

        service.create_event(command("Zumba", 2025, 5)).await.unwrap();
        service.create_event(command("Art walk", 2025, 5)).await.unwrap();
        service.create_event(command("New year", 2025, 1)).await.unwrap();
        service.create_event(command("Old news", 2024, 7)).await.unwrap();
        service
            .create_event(CreateEventCommand {
                is_recurring: true,
                ..command("Heart month", 2020, 2)
            })
            .await
            .unwrap();

        let all: Vec<String> = service
            .list_events(EventListQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(all, vec!["Heart month", "Old news", "New year", "Art walk", "Zumba"]);

        let year: Vec<String> = service
            .list_events(EventListQuery { year: Some(2025) })
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.title)
            .collect();
        assert_eq!(year, vec!["Heart month", "New year", "Art walk", "Zumba"]);
    }

    #[tokio::test]
    async fn test_update_event_partial_fields() {
        let (service, _env) = setup().await;

        let created = service
            .create_event(CreateEventCommand {
                description: Some("Original".to_string()),
                prep_start_date: NaiveDate::from_ymd_opt(2025, 7, 1),
                end_month: Some(10),
                ..command("Health fair", 2025, 9)
            })
            .await
            .unwrap();

        let updated = service
            .update_event(UpdateEventCommand {
                event_id: created.id.clone(),
                title: Some("County health fair".to_string()),
                description: Some(None),
                end_month: Some(None),
                end_year: Some(None),
                prep_months_needed: Some(Some(3)),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "County health fair");
        assert_eq!(updated.description, None);
        assert_eq!(updated.end_month, None);
        assert_eq!(updated.end_year, None);
        assert_eq!(updated.prep_months_needed, Some(3));
        assert_eq!(updated.prep_start_date, NaiveDate::from_ymd_opt(2025, 7, 1));
        assert_eq!(updated.created_at, created.created_at);

        let fetched = service.get_event(&created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_event_rejects_invalid_result() {
        let (service, _env) = setup().await;
        let created = service.create_event(command("Health fair", 2025, 9)).await.unwrap();

        let result = service
            .update_event(UpdateEventCommand {
                event_id: created.id.clone(),
                title: Some(String::new()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));

        let unchanged = service.get_event(&created.id).await.unwrap();
        assert_eq!(unchanged.title, "Health fair");
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let (service, _env) = setup().await;

        assert!(matches!(
            service.get_event("event::missing").await,
            Err(PlannerError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .update_event(UpdateEventCommand {
                    event_id: "event::missing".to_string(),
                    ..Default::default()
                })
                .await,
            Err(PlannerError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_event("event::missing").await,
            Err(PlannerError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_event_cascades_to_materials() {
        let (service, env) = setup().await;
        let materials = env.connection.create_marketing_material_repository();

        let doomed = service.create_event(command("Doomed", 2025, 4)).await.unwrap();
        let kept = service.create_event(command("Kept", 2025, 4)).await.unwrap();

        let links = [
            ("material::1", &doomed.id),
            ("material::2", &doomed.id),
            ("material::3", &kept.id),
        ];
        for (id, event_id) in links {
            materials
                .store_material(&MarketingMaterial {
                    id: id.to_string(),
                    event_id: event_id.clone(),
                    title: "Flyer".to_string(),
                    material_type: MaterialType::Flyer,
                    status: MaterialStatus::Draft,
                    link: None,
                    notes: None,
                    due_date: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .await
                .unwrap();
        }

        assert_eq!(service.material_count(&doomed.id).await.unwrap(), 2);

        let result = service.delete_event(&doomed.id).await.unwrap();
        assert_eq!(result.deleted_material_count, 2);
        assert_eq!(result.event.id, doomed.id);

        assert_eq!(service.material_count(&doomed.id).await.unwrap(), 0);
        assert_eq!(service.material_count(&kept.id).await.unwrap(), 1);
        assert!(service.get_event(&doomed.id).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_materials_alone() {
        let (service, env) = setup().await;
        let materials = env.connection.create_marketing_material_repository();

        materials
            .store_material(&MarketingMaterial {
                id: "material::stray".to_string(),
                event_id: "event::missing".to_string(),
                title: "Poster".to_string(),
                material_type: MaterialType::Poster,
                status: MaterialStatus::Draft,
                link: None,
                notes: None,
                due_date: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .unwrap();

        assert!(matches!(
            service.delete_event("event::missing").await,
            Err(PlannerError::NotFound { .. })
        ));
        assert_eq!(service.material_count("event::missing").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_years_outside_range_are_rejected() {
        let (service, _env) = setup().await;

        let wraparound_at_max = CreateEventCommand {
            end_month: Some(1),
            ..command("Far future", i32::MAX, 5)
        };
        assert!(matches!(
            service.create_event(wraparound_at_max).await,
            Err(PlannerError::InvalidInput(_))
        ));

        for year in [0, -44, 10_000] {
            assert!(matches!(
                service.create_event(command("Out of range", year, 3)).await,
                Err(PlannerError::InvalidInput(_))
            ));
        }

        let far_end = CreateEventCommand {
            end_month: Some(2),
            end_year: Some(i32::MAX),
            ..command("Long run", 2025, 11)
        };
        assert!(matches!(
            service.create_event(far_end).await,
            Err(PlannerError::InvalidInput(_))
        ));

        let wraparound_past_range = CreateEventCommand {
            end_month: Some(1),
            ..command("Year end", 9999, 5)
        };
        assert!(matches!(
            service.create_event(wraparound_past_range).await,
            Err(PlannerError::InvalidInput(_))
        ));

        let edge = service
            .create_event(CreateEventCommand {
                end_month: Some(12),
                ..command("Last year", 9999, 1)
            })
            .await
            .unwrap();
        assert_eq!(edge.end_year, Some(9999));
        let stored = service.list_events(EventListQuery::default()).await.unwrap();
        assert_eq!(stored.len(), 1);
    }
}
