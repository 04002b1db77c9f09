/// Gift primary keys are random (v4) UUIDs assigned by the entity.
pub type GiftId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
