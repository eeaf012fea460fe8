//! Login sessions keyed by an opaque session id.
//!
//! Sessions carry no expiry; they live until logout or restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque id handed to the client as a cookie.
    pub id: Uuid,
    /// Lowercased login email.
    pub user_email: String,
    /// Login time.
    pub created_at: DateTime<Utc>,
}

/// Active sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for `user_email` and returns it.
    pub async fn open(&self, user_email: &str) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            user_email: user_email.to_string(),
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Looks up an active session.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Ends a session. Returns `false` if it was not active.
    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Number of active sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if nobody is logged in.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_get_close() {
        let store = SessionStore::new();
        let session = store.open("admin@eventpro.com").await;
        assert_eq!(
            store.get(session.id).await.map(|s| s.user_email),
            Some("admin@eventpro.com".to_string())
        );
        assert!(store.close(session.id).await);
        assert!(!store.close(session.id).await);
        assert!(store.is_empty().await);
    }
}
