use huddle_sql::SqlStore;

use crate::service::EventsError;

/// Create the events tables if they don't exist.
///
/// Records are stored as a JSON `data` column; `creator_id` and `date`
/// are duplicated into indexed columns for filtering and ordering at
/// the query boundary.
pub fn init_schema(sql: &dyn SqlStore) -> Result<(), EventsError> {
    sql.exec_batch(
        r#"
CREATE TABLE IF NOT EXISTS events (
    id          TEXT PRIMARY KEY,
    data        TEXT NOT NULL,
    creator_id  TEXT NOT NULL,
    date        TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_events_creator ON events(creator_id);
CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

CREATE TABLE IF NOT EXISTS event_participants (
    event_id    TEXT NOT NULL,
    user_id     TEXT NOT NULL,
    data        TEXT NOT NULL,
    joined_at   TEXT NOT NULL,
    PRIMARY KEY (event_id, user_id)
);
"#,
    )
    .map_err(|e| EventsError::Storage(e.to_string()))
}
