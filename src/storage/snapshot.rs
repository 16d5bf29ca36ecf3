//! Persisted layout of the reminder collection.
//!
//! Only the reminders themselves are stored; filter and search state are
//! transient and start fresh on every launch.

use serde::{Deserialize, Serialize};

use super::StorageError;
use crate::domain::Reminder;

/// The blob written under the storage key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl PersistedState {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, StorageError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::create_reminder;
    use crate::domain::{ReminderCategory, ReminderFormData, ReminderPriority};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_blob_layout() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let reminder = create_reminder(
            ReminderFormData::new("Dentist")
                .with_category(ReminderCategory::Health)
                .with_priority(ReminderPriority::High),
            "r1".to_string(),
            created,
        );

        let bytes = PersistedState::new(vec![reminder]).encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let stored = &json["reminders"][0];
        assert_eq!(stored["id"], "r1");
        assert_eq!(stored["category"], "health");
        assert_eq!(stored["priority"], "high");
        assert_eq!(stored["createdAt"], "2024-05-01T08:00:00Z");
    }

    #[test]
    fn test_decode_tolerates_null_due_date() {
        let raw = br#"{
            "reminders": [{
                "id": "1",
                "title": "Call John",
                "category": "work",
                "dueDate": null,
                "isCompleted": false,
                "priority": "medium",
                "createdAt": "2024-05-01T08:00:00.000Z",
                "updatedAt": "2024-05-01T08:00:00.000Z"
            }]
        }"#;

        let state = PersistedState::decode(raw).unwrap();
        assert_eq!(state.reminders.len(), 1);
        assert!(state.reminders[0].due_date.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            PersistedState::decode(b"not json"),
            Err(StorageError::Serialization(_))
        ));
    }
}
