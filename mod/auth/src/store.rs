//! Credential store boundary.
//!
//! The credential store is an external system of record for
//! authentication. This service consumes it through the
//! [`CredentialStore`] trait and never reimplements it: one outbound
//! call per request, no local session cache.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Identity, Session, User};

/// Credential store failure. "No session" is NOT an error — it is the
/// `Ok(None)` value; these variants cover infrastructure problems only.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("credential store returned status {0}")]
    Upstream(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Validates whatever session token the inbound headers carry against
/// the external credential store.
///
/// Returns `Ok(None)` when no token is present or the store reports the
/// session invalid; `Err` only for infrastructure failures, so an outage
/// can never be mistaken for "anonymous".
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, CredentialError>;
}

// ── HTTP client ─────────────────────────────────────────────────────

/// Wire form of the credential store's session payload (camelCase JSON,
/// `null` when there is no session).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    session: SessionWire,
    user: UserWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionWire {
    id: String,
    user_id: String,
    expires_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    id: String,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    image: Option<String>,
}

impl From<SessionPayload> for Identity {
    fn from(p: SessionPayload) -> Self {
        Identity {
            session: Session {
                id: p.session.id,
                user_id: p.session.user_id,
                expires_at: p.session.expires_at,
            },
            user: User {
                id: p.user.id,
                name: p.user.name,
                email: p.user.email,
                email_verified: p.user.email_verified,
                image: p.user.image,
            },
        }
    }
}

/// CredentialStore implementation that calls the identity provider over
/// HTTP (`GET {base_url}/get-session`), forwarding the inbound `cookie`
/// and `authorization` headers unmodified.
///
/// The client carries a construction-time timeout: the caller's request
/// task suspends on this call, and the timeout bounds that suspension.
pub struct HttpCredentialStore {
    client: reqwest::Client,
    session_url: String,
}

impl HttpCredentialStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CredentialError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CredentialError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            session_url: format!("{}/get-session", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl CredentialStore for HttpCredentialStore {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, CredentialError> {
        let mut req = self.client.get(&self.session_url);
        for name in ["cookie", "authorization"] {
            for value in headers.get_all(name) {
                if let Ok(v) = value.to_str() {
                    req = req.header(name, v);
                }
            }
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CredentialError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 || status.as_u16() == 404 {
            // The store rejected the credentials — a clean "no session".
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CredentialError::Upstream(status.as_u16()));
        }

        let payload: Option<SessionPayload> = resp
            .json()
            .await
            .map_err(|e| CredentialError::Decode(e.to_string()))?;

        Ok(payload.map(Identity::from))
    }
}

// ── Static store ────────────────────────────────────────────────────

/// In-process token→identity map, keyed on the `Authorization: Bearer`
/// token. For development and tests.
#[derive(Default)]
pub struct StaticCredentialStore {
    sessions: HashMap<String, Identity>,
}

impl StaticCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, identity: Identity) {
        self.sessions.insert(token.into(), identity);
    }
}

#[async_trait]
impl CredentialStore for StaticCredentialStore {
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, CredentialError> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };
        Ok(self.sessions.get(token).cloned())
    }
}

/// Extract the Bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
