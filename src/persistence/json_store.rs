//! JSON data files in the data directory.
//!
//! Files are written to a temporary sibling and renamed into place, so a
//! crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{Engagement, Event, TicketSales};
use crate::error::GatewayError;

/// Event list file.
pub const EVENTS_FILE: &str = "events_data.json";
/// Engagement map file, keyed by event id.
pub const ENGAGEMENT_FILE: &str = "engagement_data.json";
/// Box-office totals, keyed by event id. Never written by the service.
pub const TICKETS_FILE: &str = "tickets_data.json";

/// Reads and writes the service's JSON files under one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads the event list. `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the file cannot be read
    /// or parsed.
    pub async fn load_events(&self) -> Result<Option<Vec<Event>>, GatewayError> {
        self.read_json(EVENTS_FILE).await
    }

    /// Rewrites the event list.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on I/O failure.
    pub async fn save_events(&self, events: &[Event]) -> Result<(), GatewayError> {
        self.write_json(EVENTS_FILE, events).await
    }

    /// Loads the engagement map. `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the file cannot be read
    /// or parsed.
    pub async fn load_engagement(&self) -> Result<Option<BTreeMap<u64, Engagement>>, GatewayError> {
        self.read_json(ENGAGEMENT_FILE).await
    }

    /// Rewrites the engagement map.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on I/O failure.
    pub async fn save_engagement(
        &self,
        engagement: &BTreeMap<u64, Engagement>,
    ) -> Result<(), GatewayError> {
        self.write_json(ENGAGEMENT_FILE, engagement).await
    }

    /// Loads box-office totals. `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] if the file cannot be read
    /// or parsed.
    pub async fn load_tickets(&self) -> Result<Option<BTreeMap<u64, TicketSales>>, GatewayError> {
        self.read_json(TICKETS_FILE).await
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, GatewayError> {
        let path = self.dir.join(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), GatewayError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!(".{name}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::debug!(file = %path.display(), "data file written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::event::now_local;
    use crate::domain::seed::{sample_engagement, sample_events};

    #[tokio::test]
    async fn missing_files_load_as_none() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(store.load_events().await, Ok(None)));
        assert!(matches!(store.load_engagement().await, Ok(None)));
        assert!(matches!(store.load_tickets().await, Ok(None)));
    }

    #[tokio::test]
    async fn events_and_engagement_survive_a_save() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = JsonFileStore::new(dir.path());
        let events = sample_events(now_local());
        let engagement = sample_engagement();
        assert!(store.save_events(&events).await.is_ok());
        assert!(store.save_engagement(&engagement).await.is_ok());

        let Ok(Some(loaded)) = store.load_events().await else {
            panic!("events should load");
        };
        assert_eq!(loaded, events);
        let Ok(Some(loaded)) = store.load_engagement().await else {
            panic!("engagement should load");
        };
        assert_eq!(loaded, engagement);
    }

    #[tokio::test]
    async fn engagement_keys_are_strings_on_disk() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = JsonFileStore::new(dir.path());
        assert!(store.save_engagement(&sample_engagement()).await.is_ok());
        let Ok(raw) = std::fs::read_to_string(dir.path().join(ENGAGEMENT_FILE)) else {
            panic!("file should exist");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            panic!("valid json");
        };
        assert_eq!(
            value.pointer("/2/live_attendance").and_then(serde_json::Value::as_u64),
            Some(450)
        );
    }

    #[tokio::test]
    async fn reads_legacy_file_layout() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let raw = r#"[{"id": 7, "title": "Meetup", "description": "", "date": "2024-05-01",
            "time": "19:00", "location": "Online", "capacity": 50, "ticketPrice": 0,
            "status": "live", "created_at": "2024-04-01T10:00:00.123456"}]"#;
        assert!(std::fs::write(dir.path().join(EVENTS_FILE), raw).is_ok());
        let tickets = r#"{"7": {"total_sold": 42}}"#;
        assert!(std::fs::write(dir.path().join(TICKETS_FILE), tickets).is_ok());

        let store = JsonFileStore::new(dir.path());
        let Ok(Some(events)) = store.load_events().await else {
            panic!("events should parse");
        };
        let Some(event) = events.first() else {
            panic!("one event");
        };
        assert_eq!(event.id, 7);
        assert_eq!(event.currency, "INR");
        assert_eq!(event.image, crate::domain::DEFAULT_EVENT_IMAGE);

        let Ok(Some(tickets)) = store.load_tickets().await else {
            panic!("tickets should parse");
        };
        assert_eq!(tickets.get(&7).and_then(|t| t.total_sold), Some(42));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        assert!(std::fs::write(dir.path().join(EVENTS_FILE), "{not json").is_ok());
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load_events().await,
            Err(GatewayError::PersistenceError(_))
        ));
    }
}
