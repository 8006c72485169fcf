use shared::{
    CreateEventRequest, DeleteEventResponse, Event, EventListResponse, EventResponse,
    OutreachAngle, UpdateEventRequest,
};

use crate::domain::calendar::format_prep_label;
use crate::domain::commands::events::{CreateEventCommand, DeleteEventResult, UpdateEventCommand};
use crate::domain::models::event::{Event as DomainEvent, OutreachAngle as DomainOutreachAngle};

pub struct EventMapper;

impl EventMapper {
    pub fn outreach_angle_to_dto(domain: DomainOutreachAngle) -> OutreachAngle {
        OutreachAngle {
            angle: domain.angle,
            notes: domain.notes,
        }
    }

    pub fn outreach_angle_to_domain(dto: OutreachAngle) -> DomainOutreachAngle {
        DomainOutreachAngle {
            angle: dto.angle,
            notes: dto.notes,
        }
    }

    /// Convert domain Event to shared Event DTO
    pub fn to_dto(domain: DomainEvent) -> Event {
        Event {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            start_month: domain.start_month,
            start_year: domain.start_year,
            month: domain.month,
            year: domain.year,
            end_month: domain.end_month,
            end_year: domain.end_year,
            is_recurring: domain.is_recurring,
            prep_months_needed: domain.prep_months_needed,
            prep_start_date: domain.prep_start_date,
            outreach_angles: domain
                .outreach_angles
                .into_iter()
                .map(Self::outreach_angle_to_dto)
                .collect(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(domain_events: Vec<DomainEvent>) -> EventListResponse {
        EventListResponse {
            events: domain_events.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Single event with its prep label and material count
    pub fn to_event_response(domain: DomainEvent, material_count: usize) -> EventResponse {
        EventResponse {
            prep_label: format_prep_label(&domain),
            event: Self::to_dto(domain),
            material_count,
        }
    }

    pub fn to_delete_response(result: DeleteEventResult) -> DeleteEventResponse {
        DeleteEventResponse {
            deleted_event_id: result.event.id,
            deleted_material_count: result.deleted_material_count,
            success_message: result.success_message,
        }
    }

    pub fn to_create_command(request: CreateEventRequest) -> CreateEventCommand {
        CreateEventCommand {
            title: request.title,
            description: request.description,
            start_month: request.start_month,
            start_year: request.start_year,
            month: request.month,
            year: request.year,
            end_month: request.end_month,
            end_year: request.end_year,
            is_recurring: request.is_recurring,
            prep_months_needed: request.prep_months_needed,
            prep_start_date: request.prep_start_date,
            outreach_angles: request
                .outreach_angles
                .into_iter()
                .map(Self::outreach_angle_to_domain)
                .collect(),
        }
    }

    pub fn to_update_command(event_id: String, request: UpdateEventRequest) -> UpdateEventCommand {
        UpdateEventCommand {
            event_id,
            title: request.title,
            description: request.description,
            start_month: request.start_month,
            start_year: request.start_year,
            end_month: request.end_month,
            end_year: request.end_year,
            is_recurring: request.is_recurring,
            prep_months_needed: request.prep_months_needed,
            prep_start_date: request.prep_start_date,
            outreach_angles: request.outreach_angles.map(|angles| {
                angles
                    .into_iter()
                    .map(Self::outreach_angle_to_domain)
                    .collect()
            }),
        }
    }
}
