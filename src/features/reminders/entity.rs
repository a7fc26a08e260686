//! Reminder domain object
//!
//! Entities are identified by a surrogate [`ReminderId`] assigned at
//! creation. Nothing keys on mutable fields, so editing text or timestamps
//! in a future version cannot orphan a scheduled wait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a reminder, stable for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(Uuid);

impl ReminderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A scheduled one-shot notification.
///
/// This is also the persisted record shape: one JSON object per line in the
/// save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderEntity {
    pub id: ReminderId,
    pub owner_id: u64,
    pub origin_message_id: u64,
    pub origin_channel_id: u64,
    pub created_at: DateTime<Utc>,
    pub fire_at: DateTime<Utc>,
    /// Reminder text; may be empty when the input was only a time phrase.
    pub text: String,
    /// Id of the confirmation message, set once after it is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_message_id: Option<u64>,
}

impl ReminderEntity {
    pub fn new(
        owner_id: u64,
        origin_message_id: u64,
        origin_channel_id: u64,
        created_at: DateTime<Utc>,
        fire_at: DateTime<Utc>,
        text: String,
    ) -> Self {
        Self {
            id: ReminderId::new(),
            owner_id,
            origin_message_id,
            origin_channel_id,
            created_at,
            fire_at,
            text,
            confirmation_message_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ids_are_unique() {
        let now = Utc::now();
        let a = ReminderEntity::new(1, 2, 3, now, now + Duration::hours(1), "a".to_string());
        let b = ReminderEntity::new(1, 2, 3, now, now + Duration::hours(1), "a".to_string());
        // Same field values, distinct identity.
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_round_trip() {
        let now = Utc::now();
        let mut entity =
            ReminderEntity::new(7, 8, 9, now, now + Duration::minutes(10), "call mom".to_string());
        entity.confirmation_message_id = Some(42);

        let line = serde_json::to_string(&entity).unwrap();
        let back: ReminderEntity = serde_json::from_str(&line).unwrap();
        assert_eq!(entity, back);
    }
}
