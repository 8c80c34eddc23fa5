use serde::{Deserialize, Serialize};

/// An event. Only the user whose id equals `creator_id` may mutate or
/// delete it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (UUIDv4, no dashes).
    pub id: String,

    /// Event name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// RFC 3339 timestamp of when the event takes place.
    pub date: String,

    /// Optional venue. `null` when the creator supplied none.
    pub location: Option<String>,

    /// Id of the creating user (owned by the credential store).
    pub creator_id: String,

    /// RFC 3339 creation timestamp.
    pub created_at: String,

    /// RFC 3339 last update timestamp.
    pub updated_at: String,
}

/// A user attending an event. Name and email are a snapshot taken from
/// the joining user's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: String,
    pub name: String,
    pub email: String,

    /// RFC 3339 timestamp of when the user joined.
    pub joined_at: String,
}

/// An event together with its participant list.
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub participants: Vec<Participant>,
}

/// Input for creating or updating an event. The same shape serves both:
/// updates are full replacements, so an omitted `location` clears the
/// stored value rather than keeping the prior one.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub name: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl EventInput {
    /// Empty-string locations collapse to none.
    pub fn normalized_location(&self) -> Option<String> {
        self.location
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_defaults_to_none() {
        let input: EventInput = serde_json::from_str(
            r#"{"name": "n", "description": "d", "date": "2026-09-01T18:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(input.location, None);
    }

    #[test]
    fn empty_location_normalizes_to_none() {
        let input: EventInput = serde_json::from_str(
            r#"{"name": "n", "description": "d", "date": "2026-09-01T18:00:00Z", "location": "  "}"#,
        )
        .unwrap();
        assert_eq!(input.normalized_location(), None);
    }

    #[test]
    fn event_detail_flattens_event_fields() {
        let detail = EventDetail {
            event: Event {
                id: "e1".into(),
                name: "Demo".into(),
                description: "d".into(),
                date: "2026-09-01T18:00:00Z".into(),
                location: None,
                creator_id: "u1".into(),
                created_at: "2026-08-01T00:00:00Z".into(),
                updated_at: "2026-08-01T00:00:00Z".into(),
            },
            participants: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "e1");
        assert!(json["location"].is_null());
        assert!(json["participants"].is_array());
    }
}
