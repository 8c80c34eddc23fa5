//! Auth module — per-request session resolution and the auth gate.
//!
//! # Components
//!
//! - **[`store::CredentialStore`]** — boundary to the external identity
//!   provider (HTTP client, or a static in-process map for dev/tests)
//! - **[`resolver::SessionResolver`]** — headers in, validated
//!   `(session, user)` identity or a clean "no session" out
//! - **[`gate`]** — axum middleware rejecting anonymous requests with
//!   401 before any protected handler runs
//! - **[`model::Identity`]** — what handlers receive via `Extension`
//!
//! # Usage
//!
//! ```ignore
//! use auth::AuthModule;
//!
//! let module = AuthModule::new(store, vec!["/health".into()]);
//! let router = module.routes();       // Mount under /auth
//! let gate = module.gate();           // Layer over all protected routes
//! ```

pub mod api;
pub mod gate;
pub mod model;
pub mod resolver;
pub mod store;

use std::sync::Arc;

use axum::Router;

use huddle_core::Module;

use crate::gate::AuthGate;
use crate::resolver::SessionResolver;
use crate::store::CredentialStore;

/// Auth module implementing the Module trait.
///
/// Owns the gate; the binary mounts the module routes under `/auth` and
/// layers the gate over the whole application.
pub struct AuthModule {
    gate: Arc<AuthGate>,
}

impl AuthModule {
    /// Create a new AuthModule around a credential store. `public_prefixes`
    /// lists the path prefixes the gate lets through unauthenticated.
    pub fn new(store: Arc<dyn CredentialStore>, public_prefixes: Vec<String>) -> Self {
        let gate = AuthGate::new(SessionResolver::new(store), public_prefixes);
        Self {
            gate: Arc::new(gate),
        }
    }

    /// The gate, for layering via `axum::middleware::from_fn_with_state`.
    pub fn gate(&self) -> Arc<AuthGate> {
        self.gate.clone()
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn routes(&self) -> Router {
        api::routes()
    }
}
