//! # Domain Module
//!
//! Business logic for the clinic planner, independent of HTTP and of the
//! storage backend.
//!
//! ## Module Organization
//!
//! - **calendar**: The calendar resolution engine. Decides whether an event
//!   occurs in a month, whether it is in its preparation window, and how its
//!   preparation need is labelled
//! - **event_service**: Event CRUD, validation and normalization
//! - **marketing_material_service**: Materials attached to events
//! - **planner_service**: Annual, quarterly and monthly planner views
//! - **commands**: Internal command/query/result types used by the services
//! - **errors**: `PlannerError`, shared by every service
//!
//! ## Business Rules
//!
//! - Events start in a known month of a known year
//! - Recurring events repeat every year from their start year onwards and
//!   never have a preparation window
//! - A month in which an event occurs is never also one of its preparation
//!   months
//! - Deleting an event deletes its marketing materials

pub mod calendar;
pub mod commands;
pub mod errors;
pub mod event_service;
pub mod marketing_material_service;
pub mod models;
pub mod planner_service;

pub use errors::{PlannerError, PlannerResult};
pub use event_service::EventService;
pub use marketing_material_service::MarketingMaterialService;
pub use planner_service::PlannerService;
