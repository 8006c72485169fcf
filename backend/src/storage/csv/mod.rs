//! # CSV Storage Module
//!
//! CSV-backed repositories. Every table is one file in the data directory:
//!
//! ```text
//! data/
//! ├── events.csv
//! └── marketing_materials.csv
//! ```

pub mod connection;
pub mod event_repository;
pub mod marketing_material_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use event_repository::EventRepository;
pub use marketing_material_repository::MarketingMaterialRepository;
