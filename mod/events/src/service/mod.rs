pub mod event;
pub mod participant;
pub mod schema;

use std::sync::Arc;

use thiserror::Error;

use huddle_sql::{SqlStore, Value};

use crate::model::Event;

/// Events service error type.
#[derive(Debug, Error)]
pub enum EventsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<EventsError> for huddle_core::ServiceError {
    fn from(e: EventsError) -> Self {
        match e {
            EventsError::NotFound(m) => huddle_core::ServiceError::NotFound(m),
            EventsError::Forbidden(m) => huddle_core::ServiceError::Forbidden(m),
            EventsError::Validation(m) => huddle_core::ServiceError::Validation(m),
            EventsError::Conflict(m) => huddle_core::ServiceError::Conflict(m),
            EventsError::Storage(m) => huddle_core::ServiceError::Storage(m),
            EventsError::Internal(m) => huddle_core::ServiceError::Internal(m),
        }
    }
}

/// The Events service. Holds the SQL store handle — constructed in the
/// binary and passed in, never an ambient global.
pub struct EventsService {
    pub(crate) sql: Arc<dyn SqlStore>,
}

impl EventsService {
    /// Create a new EventsService, initializing the DB schema.
    pub fn new(sql: Arc<dyn SqlStore>) -> Result<Arc<Self>, EventsError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Arc::new(Self { sql }))
    }

    /// Load an event by id, decoding the JSON `data` column.
    pub(crate) fn fetch_event(&self, id: &str) -> Result<Event, EventsError> {
        let row = self
            .sql
            .query_one(
                "SELECT data FROM events WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?
            .ok_or_else(|| EventsError::NotFound(format!("event '{}' not found", id)))?;

        let data = row
            .get_str("data")
            .ok_or_else(|| EventsError::Internal("missing data column".into()))?;
        serde_json::from_str(data).map_err(|e| EventsError::Internal(e.to_string()))
    }
}
