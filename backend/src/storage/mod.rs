//! # Storage Module
//!
//! Handles all data persistence operations for the clinic planner.
//!
//! This module abstracts away the specific storage implementation details and provides
//! a consistent interface for persisting and retrieving data. The implementation can
//! be swapped out (SQLite, PostgreSQL, hosted tables, flat files) without affecting
//! the domain logic or REST layers.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: one CSV file per table inside the data directory
//! - **Atomic Writes**: rewrites go through a temp file and a rename
//! - **Write Serialization**: one async lock per table
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not implementations
//! - **Testability**: Temp-directory backed connections for unit testing

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::{Connection, EventStorage, MarketingMaterialStorage};
