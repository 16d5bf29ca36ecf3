//! Built-in sample reminders used when storage is empty.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Reminder, ReminderCategory, ReminderPriority};

struct SeedEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: ReminderCategory,
    due_in: Duration,
    is_completed: bool,
    priority: ReminderPriority,
    transcription: &'static str,
    created_ago: Duration,
    updated_ago: Duration,
}

fn entries() -> [SeedEntry; 7] {
    use ReminderCategory::*;
    use ReminderPriority::*;

    [
        SeedEntry {
            id: "1",
            title: "Call John about project",
            description: "Need to discuss the timeline for the new feature implementation",
            category: Work,
            due_in: Duration::hours(2),
            is_completed: false,
            priority: High,
            transcription: "Remind me to call John about the project timeline at 5 PM",
            created_ago: Duration::days(1),
            updated_ago: Duration::days(1),
        },
        SeedEntry {
            id: "2",
            title: "Pick up groceries",
            description: "Milk, eggs, bread, and vegetables",
            category: Shopping,
            due_in: Duration::days(1),
            is_completed: false,
            priority: Medium,
            transcription: "Don't forget to pick up groceries tomorrow. I need milk, eggs, bread, and vegetables",
            created_ago: Duration::days(2),
            updated_ago: Duration::days(2),
        },
        SeedEntry {
            id: "3",
            title: "Dentist appointment",
            description: "Annual checkup at Dr. Smith's office",
            category: Health,
            due_in: Duration::days(3),
            is_completed: false,
            priority: Medium,
            transcription: "I have a dentist appointment on Friday at 2 PM for my annual checkup with Dr. Smith",
            created_ago: Duration::days(3),
            updated_ago: Duration::days(3),
        },
        SeedEntry {
            id: "4",
            title: "Mom's birthday",
            description: "Buy flowers and call her in the morning",
            category: Personal,
            due_in: Duration::days(5),
            is_completed: false,
            priority: High,
            transcription: "Mom's birthday is on Sunday. Remember to buy flowers and call her in the morning",
            created_ago: Duration::days(4),
            updated_ago: Duration::days(4),
        },
        SeedEntry {
            id: "5",
            title: "Submit expense report",
            description: "Include receipts from the business trip",
            category: Work,
            due_in: Duration::days(2),
            is_completed: true,
            priority: Medium,
            transcription: "Need to submit my expense report by Wednesday with all receipts from the business trip",
            created_ago: Duration::days(5),
            updated_ago: Duration::days(1),
        },
        SeedEntry {
            id: "6",
            title: "Gym session",
            description: "Focus on cardio and core exercises",
            category: Health,
            due_in: Duration::hours(6),
            is_completed: false,
            priority: Low,
            transcription: "Go to the gym this evening and focus on cardio and core exercises",
            created_ago: Duration::hours(12),
            updated_ago: Duration::hours(12),
        },
        SeedEntry {
            id: "7",
            title: "Team meeting notes",
            description: "Prepare agenda for tomorrow's meeting",
            category: Work,
            due_in: Duration::hours(20),
            is_completed: false,
            priority: High,
            transcription: "Prepare the agenda for tomorrow's team meeting and send it to everyone by tonight",
            created_ago: Duration::hours(6),
            updated_ago: Duration::hours(6),
        },
    ]
}

/// Sample reminders with due dates relative to `now`
pub fn seed_reminders(now: DateTime<Utc>) -> Vec<Reminder> {
    entries()
        .into_iter()
        .map(|e| Reminder {
            id: e.id.to_string(),
            title: e.title.to_string(),
            description: Some(e.description.to_string()),
            category: e.category,
            due_date: Some(now + e.due_in),
            is_completed: e.is_completed,
            priority: e.priority,
            audio_uri: None,
            transcription: Some(e.transcription.to_string()),
            created_at: now - e.created_ago,
            updated_at: now - e.updated_ago,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_respects_record_invariants() {
        let now = Utc::now();
        let seed = seed_reminders(now);

        assert_eq!(seed.len(), 7);
        let ids: HashSet<&str> = seed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), seed.len());
        assert!(seed.iter().all(|r| r.updated_at >= r.created_at));
        assert_eq!(seed.iter().filter(|r| r.is_completed).count(), 1);
    }
}
