//! Startup loading of the data files into a fresh [`EventRegistry`].

use std::collections::BTreeMap;

use crate::domain::event::now_local;
use crate::domain::seed::{sample_engagement, sample_events};
use crate::domain::EventRegistry;
use crate::error::GatewayError;
use crate::persistence::JsonFileStore;

/// Loads events, engagement and box-office totals from `store`.
///
/// | File              | Missing                 | Unreadable          |
/// |-------------------|-------------------------|---------------------|
/// | events            | sample events, saved    | sample events, kept in memory |
/// | engagement        | sample engagement       | empty               |
/// | tickets           | empty                   | empty               |
///
/// Unreadable files are logged and left untouched on disk.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] only if the freshly seeded
/// events cannot be written.
pub async fn load_registry(store: &JsonFileStore) -> Result<EventRegistry, GatewayError> {
    let events = match store.load_events().await {
        Ok(Some(events)) => events,
        Ok(None) => {
            let events = sample_events(now_local());
            store.save_events(&events).await?;
            tracing::info!(dir = %store.dir().display(), "seeded sample events");
            events
        }
        Err(e) => {
            tracing::warn!(error = %e, "events file unreadable, using sample events");
            sample_events(now_local())
        }
    };

    let engagement = match store.load_engagement().await {
        Ok(Some(engagement)) => engagement,
        Ok(None) => sample_engagement(),
        Err(e) => {
            tracing::warn!(error = %e, "engagement file unreadable, starting empty");
            BTreeMap::new()
        }
    };

    let tickets = match store.load_tickets().await {
        Ok(tickets) => tickets.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "tickets file unreadable, ignoring it");
            BTreeMap::new()
        }
    };

    tracing::info!(
        events = events.len(),
        engagement = engagement.len(),
        tickets = tickets.len(),
        "data loaded"
    );
    Ok(EventRegistry::new(events, engagement, tickets))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::persistence::json_store::{ENGAGEMENT_FILE, EVENTS_FILE, TICKETS_FILE};

    #[tokio::test]
    async fn empty_dir_is_seeded() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let store = JsonFileStore::new(dir.path());
        let Ok(registry) = load_registry(&store).await else {
            panic!("load should succeed");
        };
        assert_eq!(registry.list_events().await.len(), 2);
        assert_eq!(registry.engagement_count().await, 2);
        assert_eq!(registry.tickets_count(), 0);
        assert!(dir.path().join(EVENTS_FILE).exists());
        assert!(!dir.path().join(ENGAGEMENT_FILE).exists());
    }

    #[tokio::test]
    async fn corrupt_files_fall_back_without_overwriting() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        for name in [EVENTS_FILE, ENGAGEMENT_FILE, TICKETS_FILE] {
            assert!(std::fs::write(dir.path().join(name), "[oops").is_ok());
        }
        let store = JsonFileStore::new(dir.path());
        let Ok(registry) = load_registry(&store).await else {
            panic!("load should succeed");
        };
        assert_eq!(registry.list_events().await.len(), 2);
        assert_eq!(registry.engagement_count().await, 0);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(EVENTS_FILE)).ok().as_deref(),
            Some("[oops")
        );
    }

    #[tokio::test]
    async fn existing_files_are_used() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let raw = r#"[{"id": 9, "title": "Only Event"}]"#;
        assert!(std::fs::write(dir.path().join(EVENTS_FILE), raw).is_ok());
        assert!(std::fs::write(dir.path().join(ENGAGEMENT_FILE), "{}").is_ok());
        let store = JsonFileStore::new(dir.path());
        let Ok(registry) = load_registry(&store).await else {
            panic!("load should succeed");
        };
        assert!(registry.contains_event(9).await);
        assert_eq!(registry.list_events().await.len(), 1);
        assert_eq!(registry.engagement_count().await, 0);
    }
}
