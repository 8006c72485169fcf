//! # CSV Event Repository
//!
//! File-based event storage. All events live in a single
//! `{data_directory}/events.csv` table.
//!
//! ## CSV Format
//!
//! ```csv
//! id,title,description,start_month,start_year,month,year,end_month,end_year,is_recurring,prep_months_needed,prep_start_date,outreach_angles,created_at,updated_at
//! event::5f0c...,Flu shot drive,,10,2025,,,,,false,2,,"[{""angle"":""Seniors"",""notes"":""""}]",2025-01-20T10:00:00Z,2025-01-20T10:00:00Z
//! ```
//!
//! Empty fields are `None`. Outreach angles are stored as a JSON array in a
//! single column. Legacy `month`/`year` columns are kept as-is so older
//! records resolve through the same fallback as everywhere else.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tracing::{debug, warn};

use super::connection::CsvConnection;
use crate::domain::models::event::{Event, OutreachAngle};
use crate::storage::traits::EventStorage;

const EVENTS_HEADER: &str = concat!(
    "id,title,description,start_month,start_year,month,year,end_month,end_year,",
    "is_recurring,prep_months_needed,prep_start_date,outreach_angles,created_at,updated_at"
);

/// CSV record structure for events
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventRecord {
    id: String,
    title: String,
    description: Option<String>,
    start_month: Option<u32>,
    start_year: Option<i32>,
    month: Option<u32>,
    year: Option<i32>,
    end_month: Option<u32>,
    end_year: Option<i32>,
    is_recurring: bool,
    prep_months_needed: Option<u32>,
    prep_start_date: Option<String>,
    outreach_angles: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<&Event> for EventRecord {
    type Error = anyhow::Error;

    fn try_from(event: &Event) -> Result<Self> {
        Ok(EventRecord {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_month: event.start_month,
            start_year: event.start_year,
            month: event.month,
            year: event.year,
            end_month: event.end_month,
            end_year: event.end_year,
            is_recurring: event.is_recurring,
            prep_months_needed: event.prep_months_needed,
            prep_start_date: event.prep_start_date.map(|date| date.format("%Y-%m-%d").to_string()),
            outreach_angles: serde_json::to_string(&event.outreach_angles)?,
            created_at: event.created_at.to_rfc3339(),
            updated_at: event.updated_at.to_rfc3339(),
        })
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = anyhow::Error;

    fn try_from(record: EventRecord) -> Result<Self> {
        let prep_start_date = match record.prep_start_date.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid prep_start_date '{}': {}", raw, e))?,
            ),
            _ => None,
        };

        let outreach_angles: Vec<OutreachAngle> = if record.outreach_angles.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&record.outreach_angles)
                .map_err(|e| anyhow!("Invalid outreach_angles JSON: {}", e))?
        };

        let created_at = DateTime::parse_from_rfc3339(&record.created_at)
            .map_err(|e| anyhow!("Invalid created_at '{}': {}", record.created_at, e))?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&record.updated_at)
            .map_err(|e| anyhow!("Invalid updated_at '{}': {}", record.updated_at, e))?
            .with_timezone(&Utc);

        Ok(Event {
            id: record.id,
            title: record.title,
            description: record.description,
            start_month: record.start_month,
            start_year: record.start_year,
            month: record.month,
            year: record.year,
            end_month: record.end_month,
            end_year: record.end_year,
            is_recurring: record.is_recurring,
            prep_months_needed: record.prep_months_needed,
            prep_start_date,
            outreach_angles,
            created_at,
            updated_at,
        })
    }
}

/// CSV-based event repository
#[derive(Clone)]
pub struct EventRepository {
    connection: CsvConnection,
}

impl EventRepository {
    /// Create a new CSV event repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_events_file_exists(&self) -> Result<()> {
        self.connection
            .ensure_file_exists(&self.connection.events_file_path(), EVENTS_HEADER)
    }

    /// Read all events, skipping rows that fail to parse
    fn read_events(&self) -> Result<Vec<Event>> {
        self.ensure_events_file_exists()?;

        let file = File::open(self.connection.events_file_path())?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut events = Vec::new();
        for result in csv_reader.deserialize::<EventRecord>() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to read event row: {}. Skipping.", e);
                    continue;
                }
            };

            match Event::try_from(record) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Failed to parse event record: {}. Skipping.", e),
            }
        }

        Ok(events)
    }

    /// Rewrite the whole table through a temp file
    fn write_events(&self, events: &[Event]) -> Result<()> {
        let events_file_path = self.connection.events_file_path();
        let temp_file_path = events_file_path.with_extension("csv.tmp");

        {
            let temp_file = File::create(&temp_file_path)?;
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(BufWriter::new(temp_file));

            csv_writer.write_record(EVENTS_HEADER.split(','))?;
            for event in events {
                csv_writer.serialize(EventRecord::try_from(event)?)?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_file_path, &events_file_path)?;

        debug!("Wrote {} events to {:?}", events.len(), events_file_path);
        Ok(())
    }

    /// Append one event (more efficient than rewriting the entire file)
    fn append_event(&self, event: &Event) -> Result<()> {
        self.ensure_events_file_exists()?;

        let file = OpenOptions::new()
            .append(true)
            .open(self.connection.events_file_path())?;
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(file);
        csv_writer.serialize(EventRecord::try_from(event)?)?;
        csv_writer.flush()?;

        Ok(())
    }
}

#[async_trait]
impl EventStorage for EventRepository {
    async fn store_event(&self, event: &Event) -> Result<()> {
        let lock = self.connection.events_lock();
        let _guard = lock.lock().await;

        if self.read_events()?.iter().any(|existing| existing.id == event.id) {
            return Err(anyhow!("Event {} already exists", event.id));
        }

        self.append_event(event)?;
        debug!("Stored event {}", event.id);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self
            .read_events()?
            .into_iter()
            .find(|event| event.id == event_id))
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.read_events()
    }

    async fn list_events_for_year(&self, year: i32) -> Result<Vec<Event>> {
        Ok(self
            .read_events()?
            .into_iter()
            .filter(|event| event.matches_year_filter(year))
            .collect())
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let lock = self.connection.events_lock();
        let _guard = lock.lock().await;

        let mut events = self.read_events()?;
        let existing = events
            .iter_mut()
            .find(|existing| existing.id == event.id)
            .ok_or_else(|| anyhow!("Event {} does not exist", event.id))?;
        *existing = event.clone();

        self.write_events(&events)
    }

    async fn delete_event(&self, event_id: &str) -> Result<bool> {
        let lock = self.connection.events_lock();
        let _guard = lock.lock().await;

        let mut events = self.read_events()?;
        let before = events.len();
        events.retain(|event| event.id != event_id);

        if events.len() == before {
            return Ok(false);
        }

        self.write_events(&events)?;
        Ok(true)
    }
}
