use std::sync::Arc;

use axum::http::HeaderMap;

use huddle_core::ServiceError;

use crate::model::Identity;
use crate::store::CredentialStore;

/// Resolves an inbound request's header set to a validated identity.
///
/// `Ok(None)` means "anonymous" — no token, an unknown token, or an
/// expired session. It is a normal value, never an error, and must not
/// be confused with authorization failure. The resolver asks the store
/// on every invocation; there is no cross-request cache.
pub struct SessionResolver {
    store: Arc<dyn CredentialStore>,
}

impl SessionResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// One outbound credential store call; no local mutation.
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, ServiceError> {
        let identity = match self.store.resolve(headers).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Ok(None),
            Err(e) => {
                // Infrastructure failure must not masquerade as "anonymous".
                return Err(ServiceError::Internal(format!("credential store: {}", e)));
            }
        };

        // A session handed downstream must name a real user and be unexpired.
        if identity.user.id.is_empty() {
            tracing::warn!("credential store returned a session without a user id");
            return Ok(None);
        }
        if identity.session.is_expired() {
            return Ok(None);
        }

        Ok(Some(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Session, User};
    use crate::store::StaticCredentialStore;

    fn identity(user_id: &str, expires_at: &str) -> Identity {
        Identity {
            session: Session {
                id: "s1".into(),
                user_id: user_id.into(),
                expires_at: expires_at.into(),
            },
            user: User {
                id: user_id.into(),
                name: "Test".into(),
                email: "test@example.com".into(),
                email_verified: false,
                image: None,
            },
        }
    }

    fn resolver() -> SessionResolver {
        let mut store = StaticCredentialStore::new();
        store.insert("live", identity("u1", "2099-01-01T00:00:00Z"));
        store.insert("stale", identity("u2", "2000-01-01T00:00:00Z"));
        store.insert("ghost", identity("", "2099-01-01T00:00:00Z"));
        SessionResolver::new(Arc::new(store))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn valid_session_resolves() {
        let resolved = resolver().resolve(&bearer("live")).await.unwrap();
        assert_eq!(resolved.unwrap().user_id(), "u1");
    }

    #[tokio::test]
    async fn missing_token_is_anonymous_not_error() {
        let resolved = resolver().resolve(&HeaderMap::new()).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn tampered_token_is_anonymous_not_error() {
        let resolved = resolver().resolve(&bearer("forged")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_anonymous() {
        let resolved = resolver().resolve(&bearer("stale")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn session_without_user_is_anonymous() {
        let resolved = resolver().resolve(&bearer("ghost")).await.unwrap();
        assert!(resolved.is_none());
    }
}
