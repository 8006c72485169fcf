use shared::{
    AnnualPlanResponse, CurrentPeriodResponse, MonthPlanResponse, PlannedEvent, PlannerMonth,
    PrepEvent, QuarterPlanResponse,
};

use crate::domain::calendar::month_name;
use crate::domain::commands::planner::{
    CurrentPeriod, PlannedEvent as DomainPlannedEvent, PlannerMonth as DomainPlannerMonth,
    PrepEvent as DomainPrepEvent,
};
use crate::io::rest::mappers::event_mapper::EventMapper;

pub struct PlannerMapper;

impl PlannerMapper {
    fn planned_event_to_dto(domain: DomainPlannedEvent) -> PlannedEvent {
        PlannedEvent {
            event: EventMapper::to_dto(domain.event),
            material_count: domain.material_count,
            prep_label: domain.prep_label,
        }
    }

    fn prep_event_to_dto(domain: DomainPrepEvent) -> PrepEvent {
        PrepEvent {
            event: EventMapper::to_dto(domain.event),
            prep_label: domain.prep_label,
            event_start_month: domain.event_start_month,
            event_start_year: domain.event_start_year,
        }
    }

    pub fn month_to_dto(domain: DomainPlannerMonth) -> PlannerMonth {
        PlannerMonth {
            year: domain.year,
            month: domain.month,
            month_name: month_name(domain.month).to_string(),
            events: domain
                .events
                .into_iter()
                .map(Self::planned_event_to_dto)
                .collect(),
            prep_events: domain
                .prep_events
                .into_iter()
                .map(Self::prep_event_to_dto)
                .collect(),
        }
    }

    pub fn to_annual_response(year: i32, months: Vec<DomainPlannerMonth>) -> AnnualPlanResponse {
        AnnualPlanResponse {
            year,
            months: months.into_iter().map(Self::month_to_dto).collect(),
        }
    }

    pub fn to_quarter_response(
        year: i32,
        quarter: u32,
        months: Vec<DomainPlannerMonth>,
    ) -> QuarterPlanResponse {
        QuarterPlanResponse {
            year,
            quarter,
            months: months.into_iter().map(Self::month_to_dto).collect(),
        }
    }

    pub fn to_month_response(month: DomainPlannerMonth) -> MonthPlanResponse {
        MonthPlanResponse {
            month: Self::month_to_dto(month),
        }
    }

    pub fn to_current_period_response(period: CurrentPeriod) -> CurrentPeriodResponse {
        CurrentPeriodResponse {
            year: period.year,
            month: period.month,
            quarter: period.quarter,
            month_name: month_name(period.month).to_string(),
            formatted_date: period.formatted_date,
        }
    }
}
