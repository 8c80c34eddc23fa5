use auth::model::Identity;
use huddle_core::{new_id, now_rfc3339, ListParams, ListResult};
use huddle_sql::Value;

use crate::model::{Event, EventDetail, EventInput};
use crate::service::{EventsError, EventsService};

impl EventsService {
    /// Create a new event. The caller becomes the creator.
    pub fn create_event(
        &self,
        caller: &Identity,
        input: EventInput,
    ) -> Result<Event, EventsError> {
        validate(&input)?;

        let now = now_rfc3339();
        let event = Event {
            id: new_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            date: input.date.clone(),
            location: input.normalized_location(),
            creator_id: caller.user.id.clone(),
            created_at: now.clone(),
            updated_at: now,
        };

        self.insert_event(&event)?;
        tracing::debug!(event_id = %event.id, creator = %event.creator_id, "event created");
        Ok(event)
    }

    /// Get an event with its participants. Any authenticated caller may
    /// read; the gate has already rejected the anonymous population.
    pub fn get_event(&self, id: &str) -> Result<EventDetail, EventsError> {
        let event = self.fetch_event(id)?;
        let participants = self.list_participants(id)?;
        Ok(EventDetail {
            event,
            participants,
        })
    }

    /// List the caller's own events, ordered by date ascending.
    ///
    /// Filtering happens at the query boundary: rows owned by other
    /// users are never materialized.
    pub fn list_my_events(
        &self,
        caller_id: &str,
        params: &ListParams,
    ) -> Result<ListResult<Event>, EventsError> {
        let count_rows = self
            .sql
            .query(
                "SELECT COUNT(*) AS cnt FROM events WHERE creator_id = ?1",
                &[Value::Text(caller_id.to_string())],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.get_i64("cnt"))
            .unwrap_or(0) as usize;

        let rows = self
            .sql
            .query(
                "SELECT data FROM events WHERE creator_id = ?1 ORDER BY date ASC LIMIT ?2 OFFSET ?3",
                &[
                    Value::Text(caller_id.to_string()),
                    Value::Integer(params.limit as i64),
                    Value::Integer(params.offset as i64),
                ],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;

        let mut items = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| EventsError::Internal("missing data column".into()))?;
            let event: Event =
                serde_json::from_str(data).map_err(|e| EventsError::Internal(e.to_string()))?;
            items.push(event);
        }

        Ok(ListResult { items, total })
    }

    /// Update an event. Creator only; full-replace semantics — every
    /// field is stored exactly as supplied, so an omitted location
    /// becomes NULL rather than keeping the prior value.
    pub fn update_event(
        &self,
        caller_id: &str,
        id: &str,
        input: EventInput,
    ) -> Result<Event, EventsError> {
        let current = self.fetch_event(id)?;
        if current.creator_id != caller_id {
            return Err(EventsError::Forbidden(format!(
                "event '{}' belongs to another user",
                id
            )));
        }

        validate(&input)?;

        let updated = Event {
            id: current.id,
            name: input.name.clone(),
            description: input.description.clone(),
            date: input.date.clone(),
            location: input.normalized_location(),
            creator_id: current.creator_id,
            created_at: current.created_at,
            updated_at: now_rfc3339(),
        };

        let json = serde_json::to_string(&updated)
            .map_err(|e| EventsError::Internal(e.to_string()))?;
        let affected = self
            .sql
            .exec(
                "UPDATE events SET data = ?1, date = ?2, updated_at = ?3 WHERE id = ?4",
                &[
                    Value::Text(json),
                    Value::Text(updated.date.clone()),
                    Value::Text(updated.updated_at.clone()),
                    Value::Text(updated.id.clone()),
                ],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(EventsError::NotFound(format!("event '{}' not found", id)));
        }

        Ok(updated)
    }

    /// Delete an event and its participant list. Creator only.
    pub fn delete_event(&self, caller_id: &str, id: &str) -> Result<(), EventsError> {
        let current = self.fetch_event(id)?;
        if current.creator_id != caller_id {
            return Err(EventsError::Forbidden(format!(
                "event '{}' belongs to another user",
                id
            )));
        }

        self.sql
            .exec(
                "DELETE FROM event_participants WHERE event_id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;
        self.sql
            .exec(
                "DELETE FROM events WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;

        tracing::debug!(event_id = %id, "event deleted");
        Ok(())
    }

    fn insert_event(&self, event: &Event) -> Result<(), EventsError> {
        let json =
            serde_json::to_string(event).map_err(|e| EventsError::Internal(e.to_string()))?;
        self.sql
            .exec(
                "INSERT INTO events (id, data, creator_id, date, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(event.id.clone()),
                    Value::Text(json),
                    Value::Text(event.creator_id.clone()),
                    Value::Text(event.date.clone()),
                    Value::Text(event.created_at.clone()),
                    Value::Text(event.updated_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    EventsError::Conflict(msg)
                } else {
                    EventsError::Storage(msg)
                }
            })?;
        Ok(())
    }
}

/// Name, description and date are required non-empty.
fn validate(input: &EventInput) -> Result<(), EventsError> {
    if input.name.trim().is_empty() {
        return Err(EventsError::Validation("name is required".into()));
    }
    if input.description.trim().is_empty() {
        return Err(EventsError::Validation("description is required".into()));
    }
    if input.date.trim().is_empty() {
        return Err(EventsError::Validation("date is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use huddle_core::ListParams;

    use crate::model::EventInput;
    use crate::service::test_support::{identity, test_service};
    use crate::service::EventsError;

    fn input(name: &str, date: &str, location: Option<&str>) -> EventInput {
        EventInput {
            name: name.to_string(),
            description: "a description".to_string(),
            date: date.to_string(),
            location: location.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_create_and_get() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", Some("Park")))
            .unwrap();
        assert_eq!(event.creator_id, "u-alice");
        assert_eq!(event.location.as_deref(), Some("Park"));

        let detail = svc.get_event(&event.id).unwrap();
        assert_eq!(detail.event.name, "Picnic");
        assert!(detail.participants.is_empty());
    }

    #[test]
    fn test_create_empty_location_stored_as_null() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", Some("")))
            .unwrap();
        assert_eq!(event.location, None);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let err = svc
            .create_event(&alice, input("", "2026-09-01T12:00:00Z", None))
            .unwrap_err();
        assert!(matches!(err, EventsError::Validation(_)));
    }

    #[test]
    fn test_list_only_returns_callers_events() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");
        let bob = identity("u-bob", "Bob");

        svc.create_event(&alice, input("A2", "2026-09-02T12:00:00Z", None))
            .unwrap();
        svc.create_event(&alice, input("A1", "2026-09-01T12:00:00Z", None))
            .unwrap();
        svc.create_event(&bob, input("B1", "2026-09-03T12:00:00Z", None))
            .unwrap();

        let mine = svc.list_my_events("u-alice", &ListParams::default()).unwrap();
        assert_eq!(mine.total, 2);
        assert!(mine.items.iter().all(|e| e.creator_id == "u-alice"));
        // Ordered by date ascending.
        assert_eq!(mine.items[0].name, "A1");
        assert_eq!(mine.items[1].name, "A2");
    }

    #[test]
    fn test_update_by_creator_replaces_all_fields() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", Some("Park")))
            .unwrap();

        // Location omitted in the update: stored value must become NULL,
        // not stay at "Park".
        let updated = svc
            .update_event(
                "u-alice",
                &event.id,
                input("Picnic v2", "2026-09-02T12:00:00Z", None),
            )
            .unwrap();
        assert_eq!(updated.name, "Picnic v2");
        assert_eq!(updated.location, None);
        assert_eq!(updated.created_at, event.created_at);

        let fetched = svc.fetch_event(&event.id).unwrap();
        assert_eq!(fetched.location, None);
        assert_eq!(fetched.date, "2026-09-02T12:00:00Z");
    }

    #[test]
    fn test_update_by_non_creator_is_forbidden_and_writes_nothing() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", Some("Park")))
            .unwrap();

        let err = svc
            .update_event(
                "u-bob",
                &event.id,
                input("Hijacked", "2027-01-01T00:00:00Z", None),
            )
            .unwrap_err();
        assert!(matches!(err, EventsError::Forbidden(_)));

        // The event is unchanged.
        let fetched = svc.fetch_event(&event.id).unwrap();
        assert_eq!(fetched.name, "Picnic");
        assert_eq!(fetched.location.as_deref(), Some("Park"));
        assert_eq!(fetched.updated_at, event.updated_at);
    }

    #[test]
    fn test_update_missing_event_is_not_found() {
        let svc = test_service();
        let err = svc
            .update_event("u-alice", "nope", input("X", "2026-09-01T12:00:00Z", None))
            .unwrap_err();
        assert!(matches!(err, EventsError::NotFound(_)));
    }

    #[test]
    fn test_delete_by_non_creator_is_forbidden() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", None))
            .unwrap();

        let err = svc.delete_event("u-bob", &event.id).unwrap_err();
        assert!(matches!(err, EventsError::Forbidden(_)));
        assert!(svc.fetch_event(&event.id).is_ok());
    }

    #[test]
    fn test_delete_removes_event_and_participants() {
        let svc = test_service();
        let alice = identity("u-alice", "Alice");
        let bob = identity("u-bob", "Bob");

        let event = svc
            .create_event(&alice, input("Picnic", "2026-09-01T12:00:00Z", None))
            .unwrap();
        svc.join_event(&bob, &event.id).unwrap();

        svc.delete_event("u-alice", &event.id).unwrap();
        assert!(matches!(
            svc.fetch_event(&event.id),
            Err(EventsError::NotFound(_))
        ));
        assert!(matches!(
            svc.list_participants(&event.id),
            Err(EventsError::NotFound(_))
        ));
    }
}
