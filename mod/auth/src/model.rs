use serde::{Deserialize, Serialize};

/// A session issued by the external credential store.
///
/// The service only ever holds a read-only, per-request copy; sessions
/// are created and invalidated by the credential store alone, and are
/// never cached across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session id.
    pub id: String,

    /// User id that owns this session.
    pub user_id: String,

    /// RFC 3339 timestamp when the session expires.
    pub expires_at: String,
}

impl Session {
    /// Whether this session is past its expiration.
    ///
    /// An unparsable timestamp counts as expired — a session we can not
    /// prove valid is treated as absent.
    pub fn is_expired(&self) -> bool {
        match chrono::DateTime::parse_from_rfc3339(&self.expires_at) {
            Ok(t) => t.with_timezone(&chrono::Utc) <= chrono::Utc::now(),
            Err(_) => true,
        }
    }
}

/// A user as reported by the credential store. Read-only: the service
/// displays and authorizes against these fields but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Whether the email address has been verified.
    #[serde(default)]
    pub email_verified: bool,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The validated `(session, user)` pair attached to a request after the
/// auth gate succeeds. Handlers read it from request extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub session: Session,
    pub user: User,
}

impl Identity {
    /// The authenticated user's id.
    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: &str) -> Session {
        Session {
            id: "s1".into(),
            user_id: "u1".into(),
            expires_at: expires_at.into(),
        }
    }

    #[test]
    fn future_session_is_not_expired() {
        assert!(!session("2099-01-01T00:00:00Z").is_expired());
    }

    #[test]
    fn past_session_is_expired() {
        assert!(session("2000-01-01T00:00:00Z").is_expired());
    }

    #[test]
    fn garbage_timestamp_counts_as_expired() {
        assert!(session("not-a-timestamp").is_expired());
    }
}
