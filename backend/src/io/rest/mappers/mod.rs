//! DTO <-> domain conversions for the REST layer.

pub mod event_mapper;
pub mod marketing_material_mapper;
pub mod planner_mapper;
