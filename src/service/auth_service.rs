//! Login against the fixed demo accounts.

use std::sync::Arc;

use crate::domain::{Session, SessionStore};
use crate::error::GatewayError;

/// Accepted `(email, password)` pairs. Emails compare case-insensitively.
const CREDENTIALS: [(&str, &str); 4] = [
    ("admin@eventpro.com", "admin123"),
    ("admin@gmail.com", "admin"),
    ("test@test.com", "test123"),
    ("demo@demo.com", "demo"),
];

/// Checks credentials and manages login sessions.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    sessions: Arc<SessionStore>,
}

impl AuthService {
    /// Creates a service with no active sessions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session when the credentials match a known account.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, GatewayError> {
        let email = email.to_lowercase();
        let known = CREDENTIALS
            .iter()
            .any(|(e, p)| *e == email && *p == password);
        if !known {
            tracing::info!(email = %email, "login rejected");
            return Err(GatewayError::Unauthorized);
        }
        let session = self.sessions.open(&email).await;
        tracing::info!(email = %email, session_id = %session.id, "login accepted");
        Ok(session)
    }

    /// Ends a session. Unknown ids are ignored.
    pub async fn logout(&self, session_id: uuid::Uuid) {
        if self.sessions.close(session_id).await {
            tracing::info!(%session_id, "logged out");
        }
    }

    /// Returns the session for an id, if it is active.
    pub async fn session(&self, session_id: uuid::Uuid) -> Option<Session> {
        self.sessions.get(session_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn email_is_case_insensitive() {
        let auth = AuthService::new();
        let Ok(session) = auth.login("Admin@EventPro.com", "admin123").await else {
            panic!("known account should log in");
        };
        assert_eq!(session.user_email, "admin@eventpro.com");
        assert!(auth.session(session.id).await.is_some());
        auth.logout(session.id).await;
        assert!(auth.session(session.id).await.is_none());
    }

    #[tokio::test]
    async fn password_is_case_sensitive() {
        let auth = AuthService::new();
        assert!(matches!(
            auth.login("demo@demo.com", "DEMO").await,
            Err(GatewayError::Unauthorized)
        ));
        assert!(matches!(
            auth.login("nobody@demo.com", "demo").await,
            Err(GatewayError::Unauthorized)
        ));
    }
}
