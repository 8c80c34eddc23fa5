//! Events module — CRUD for events behind the auth gate.
//!
//! # Resources
//!
//! - **Event** — name, description, date, optional location; owned by
//!   its creator, who alone may update or delete it
//! - **Participant** — users who joined an event
//!
//! Every operation receives the caller's validated identity explicitly;
//! "my events" listings filter by creator at the query boundary, and
//! ownership mismatches on mutation are `Forbidden` (distinct from the
//! gate's `Unauthorized`).

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use huddle_core::Module;
use huddle_sql::SqlStore;

use crate::service::EventsService;

/// Events module implementing the Module trait.
pub struct EventsModule {
    service: Arc<EventsService>,
}

impl EventsModule {
    /// Create a new EventsModule, initializing the schema.
    pub fn new(sql: Arc<dyn SqlStore>) -> Result<Self, huddle_core::ServiceError> {
        let service = EventsService::new(sql).map_err(huddle_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying EventsService.
    pub fn service(&self) -> &Arc<EventsService> {
        &self.service
    }
}

impl Module for EventsModule {
    fn name(&self) -> &str {
        "events"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
