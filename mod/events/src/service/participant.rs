use auth::model::Identity;
use huddle_core::now_rfc3339;
use huddle_sql::Value;

use crate::model::Participant;
use crate::service::{EventsError, EventsService};

impl EventsService {
    /// Join an event as the calling user. Joining twice is a conflict.
    pub fn join_event(
        &self,
        caller: &Identity,
        event_id: &str,
    ) -> Result<Participant, EventsError> {
        self.fetch_event(event_id)?;

        let participant = Participant {
            user_id: caller.user.id.clone(),
            name: caller.user.name.clone(),
            email: caller.user.email.clone(),
            joined_at: now_rfc3339(),
        };
        let json = serde_json::to_string(&participant)
            .map_err(|e| EventsError::Internal(e.to_string()))?;

        self.sql
            .exec(
                "INSERT INTO event_participants (event_id, user_id, data, joined_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                &[
                    Value::Text(event_id.to_string()),
                    Value::Text(participant.user_id.clone()),
                    Value::Text(json),
                    Value::Text(participant.joined_at.clone()),
                ],
            )
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("UNIQUE constraint") {
                    EventsError::Conflict(format!(
                        "user '{}' already joined event '{}'",
                        participant.user_id, event_id
                    ))
                } else {
                    EventsError::Storage(msg)
                }
            })?;

        Ok(participant)
    }

    /// Remove a participant. Allowed for the participant themselves and
    /// for the event's creator; anyone else is forbidden.
    pub fn leave_event(
        &self,
        caller_id: &str,
        event_id: &str,
        user_id: &str,
    ) -> Result<(), EventsError> {
        let event = self.fetch_event(event_id)?;
        if caller_id != user_id && caller_id != event.creator_id {
            return Err(EventsError::Forbidden(
                "only the participant or the event creator may remove a participant".into(),
            ));
        }

        let affected = self
            .sql
            .exec(
                "DELETE FROM event_participants WHERE event_id = ?1 AND user_id = ?2",
                &[
                    Value::Text(event_id.to_string()),
                    Value::Text(user_id.to_string()),
                ],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(EventsError::NotFound(format!(
                "user '{}' is not a participant of event '{}'",
                user_id, event_id
            )));
        }

        Ok(())
    }

    /// List an event's participants, oldest join first.
    pub fn list_participants(&self, event_id: &str) -> Result<Vec<Participant>, EventsError> {
        self.fetch_event(event_id)?;

        let rows = self
            .sql
            .query(
                "SELECT data FROM event_participants WHERE event_id = ?1 ORDER BY joined_at ASC",
                &[Value::Text(event_id.to_string())],
            )
            .map_err(|e| EventsError::Storage(e.to_string()))?;

        let mut participants = Vec::new();
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| EventsError::Internal("missing data column".into()))?;
            let participant: Participant =
                serde_json::from_str(data).map_err(|e| EventsError::Internal(e.to_string()))?;
            participants.push(participant);
        }
        Ok(participants)
    }
}
