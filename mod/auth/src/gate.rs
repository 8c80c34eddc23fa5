//! Auth gate middleware.
//!
//! Wraps every protected route: resolves the session, attaches the
//! identity to the request, or rejects with 401 before the handler is
//! entered. The gate proves identity only — resource-level permission
//! stays with each protected operation.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use huddle_core::ServiceError;

use crate::resolver::SessionResolver;

/// Shared gate state: the session resolver plus the path prefixes that
/// bypass authentication.
pub struct AuthGate {
    resolver: SessionResolver,
    public_prefixes: Vec<String>,
}

impl AuthGate {
    pub fn new(resolver: SessionResolver, public_prefixes: Vec<String>) -> Self {
        Self {
            resolver,
            public_prefixes,
        }
    }

    /// Check if a request path is public (no auth required).
    fn is_public_path(&self, path: &str) -> bool {
        self.public_prefixes
            .iter()
            .any(|p| path == p || path.starts_with(&format!("{}/", p)))
    }
}

/// Middleware enforcing the gate.
///
/// On success the validated [`Identity`](crate::model::Identity) is
/// stored in request extensions for handlers to read via
/// `Extension<Identity>`. Absence of a session becomes `Unauthorized`
/// here and nowhere else; the wrapped handler never runs. If the client
/// disconnects while the resolver is suspended, the request future is
/// dropped and no handler work happens on a partial identity.
pub async fn require_identity(
    State(gate): State<Arc<AuthGate>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if gate.is_public_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    match gate.resolver.resolve(request.headers()).await? {
        Some(identity) => {
            request.extensions_mut().insert(identity);
            Ok(next.run(request).await)
        }
        None => Err(ServiceError::Unauthorized(
            "authentication required".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::body::Body;
    use axum::extract::Extension;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::{require_identity, AuthGate};
    use crate::model::{Identity, Session, User};
    use crate::resolver::SessionResolver;
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

    /// Router with a call-counting protected route, a route reading the
    /// injected identity, and a public route.
    fn app(counter: Arc<AtomicUsize>) -> Router {
        let mut store = StaticCredentialStore::new();
        store.insert("live", identity("u1", "2099-01-01T00:00:00Z"));
        store.insert("stale", identity("u2", "2000-01-01T00:00:00Z"));

        let gate = Arc::new(AuthGate::new(
            SessionResolver::new(Arc::new(store)),
            vec!["/health".to_string()],
        ));

        Router::new()
            .route(
                "/events",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .route(
                "/whoami",
                get(|Extension(identity): Extension<Identity>| async move {
                    identity.user.id
                }),
            )
            .route("/health", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(gate, require_identity))
    }

    fn request(path: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn anonymous_request_never_reaches_the_handler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter.clone());

        let resp = app.oneshot(request("/events", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tampered_token_never_reaches_the_handler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter.clone());

        let resp = app.oneshot(request("/events", Some("forged"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_session_never_reaches_the_handler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter.clone());

        let resp = app.oneshot(request("/events", Some("stale"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_session_runs_the_handler_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter.clone());

        let resp = app.oneshot(request("/events", Some("live"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn identity_is_injected_for_handlers() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter);

        let resp = app.oneshot(request("/whoami", Some("live"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_path_skips_the_gate() {
        let counter = Arc::new(AtomicUsize::new(0));
        let app = app(counter);

        let resp = app.oneshot(request("/health", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
