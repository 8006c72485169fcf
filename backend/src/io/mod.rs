//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handles JSON
//! (de)serialization, DTO mapping and the translation of `PlannerError` into
//! HTTP status codes. No business rules live here.

pub mod rest;
