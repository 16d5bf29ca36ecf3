//! Record construction and update stamping.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Reminder, ReminderFormData, ReminderPatch};

/// Produces reminder ids that are unique for the life of the process
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// UUIDv7 ids: a millisecond timestamp followed by random bits
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIdGenerator;

impl IdGenerator for TimeOrderedIdGenerator {
    fn next_id(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

/// `prefix-1`, `prefix-2`, ... for deterministic runs
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        if self.prefix.is_empty() {
            n.to_string()
        } else {
            format!("{}-{}", self.prefix, n)
        }
    }
}

/// Build a fresh, incomplete record from form input
pub fn create_reminder(form: ReminderFormData, id: String, now: DateTime<Utc>) -> Reminder {
    Reminder {
        id,
        title: form.title,
        description: form.description,
        category: form.category,
        due_date: form.due_date,
        is_completed: false,
        priority: form.priority,
        audio_uri: form.audio_uri,
        transcription: form.transcription,
        created_at: now,
        updated_at: now,
    }
}

/// Apply a patch, keeping identity, creation time and completion state
pub fn apply_patch(reminder: &Reminder, patch: ReminderPatch, now: DateTime<Utc>) -> Reminder {
    let mut updated = reminder.clone();

    if let Some(title) = patch.title {
        updated.title = title;
    }
    if let Some(description) = patch.description {
        updated.description = description;
    }
    if let Some(category) = patch.category {
        updated.category = category;
    }
    if let Some(due_date) = patch.due_date {
        updated.due_date = due_date;
    }
    if let Some(priority) = patch.priority {
        updated.priority = priority;
    }
    if let Some(audio_uri) = patch.audio_uri {
        updated.audio_uri = audio_uri;
    }
    if let Some(transcription) = patch.transcription {
        updated.transcription = transcription;
    }

    updated.updated_at = stamp(&updated, now);
    updated
}

/// Flip completion, refreshing the update time
pub fn toggle_completion(reminder: &Reminder, now: DateTime<Utc>) -> Reminder {
    let mut updated = reminder.clone();
    updated.is_completed = !updated.is_completed;
    updated.updated_at = stamp(&updated, now);
    updated
}

// updated_at never goes behind created_at, even if the clock steps back
fn stamp(reminder: &Reminder, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(reminder.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReminderCategory, ReminderPriority};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_create_stamps_identity_and_times() {
        let form = ReminderFormData::new("Book flights")
            .with_category(ReminderCategory::Personal)
            .with_priority(ReminderPriority::High);

        let reminder = create_reminder(form, "r1".to_string(), t0());

        assert_eq!(reminder.id, "r1");
        assert_eq!(reminder.title, "Book flights");
        assert!(!reminder.is_completed);
        assert_eq!(reminder.created_at, reminder.updated_at);
    }

    #[test]
    fn test_patch_keeps_identity_and_clears_optionals() {
        let form = ReminderFormData::new("Book flights")
            .with_description("window seat")
            .with_due_date(t0() + Duration::days(3));
        let reminder = create_reminder(form, "r1".to_string(), t0());
        let later = t0() + Duration::hours(1);

        let patch = ReminderPatch {
            title: Some("Book trains".to_string()),
            description: Some(None),
            ..Default::default()
        };
        let updated = apply_patch(&reminder, patch, later);

        assert_eq!(updated.id, reminder.id);
        assert_eq!(updated.created_at, reminder.created_at);
        assert_eq!(updated.title, "Book trains");
        assert_eq!(updated.description, None);
        assert_eq!(updated.due_date, reminder.due_date);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn test_stamp_never_precedes_creation() {
        let reminder = create_reminder(ReminderFormData::new("x"), "r1".to_string(), t0());
        let toggled = toggle_completion(&reminder, t0() - Duration::hours(2));
        assert!(toggled.is_completed);
        assert_eq!(toggled.updated_at, reminder.created_at);
    }

    #[test]
    fn test_id_generators() {
        let seq = SequentialIdGenerator::new("t");
        assert_eq!(seq.next_id(), "t-1");
        assert_eq!(seq.next_id(), "t-2");

        let ids = TimeOrderedIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
