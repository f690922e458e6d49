/// Script primary keys are UUIDs assigned by the backing store at insert.
pub type ScriptId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
