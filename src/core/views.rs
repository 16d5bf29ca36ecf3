//! Derived views over the reminder collection.
//!
//! Every view is recomputed from the full collection on each call; nothing is
//! cached or maintained incrementally. Records without a due date never show
//! up in the time-bucketed views.

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};

use super::clock::{start_of_day, start_of_next_day};
use crate::domain::{CategoryFilter, Reminder};

/// Records passing the category filter and search query, in list order
pub fn filtered<'a>(
    reminders: &'a [Reminder],
    filter: CategoryFilter,
    query: &str,
) -> Vec<&'a Reminder> {
    let query = query.to_lowercase();

    let mut items: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| filter.matches(r.category))
        .filter(|r| matches_query(r, &query))
        .collect();

    items.sort_by(|a, b| list_order(a, b));
    items
}

/// Incomplete records due strictly after `now`, soonest first
pub fn upcoming<'a, Tz: TimeZone>(reminders: &'a [Reminder], now: &DateTime<Tz>) -> Vec<&'a Reminder> {
    let now = now.with_timezone(&Utc);
    let mut items = open_with_due_date(reminders, |due| due > now);
    items.sort_by_key(|r| r.due_date);
    items
}

/// Incomplete records due strictly before `now`, latest due date first
pub fn past_due<'a, Tz: TimeZone>(reminders: &'a [Reminder], now: &DateTime<Tz>) -> Vec<&'a Reminder> {
    let now = now.with_timezone(&Utc);
    let mut items = open_with_due_date(reminders, |due| due < now);
    items.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    items
}

/// Incomplete records due within today (in `now`'s zone), soonest first
pub fn today<'a, Tz: TimeZone>(reminders: &'a [Reminder], now: &DateTime<Tz>) -> Vec<&'a Reminder> {
    let start = start_of_day(now).with_timezone(&Utc);
    let end = start_of_next_day(now).with_timezone(&Utc);
    let mut items = open_with_due_date(reminders, |due| due >= start && due < end);
    items.sort_by_key(|r| r.due_date);
    items
}

/// Comparator for the main list: open before done, dated before undated
/// (earliest first), then newest creation first.
pub fn list_order(a: &Reminder, b: &Reminder) -> Ordering {
    a.is_completed
        .cmp(&b.is_completed)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

// `query` is already lowercased; an empty query matches everything
fn matches_query(reminder: &Reminder, query: &str) -> bool {
    reminder.title.to_lowercase().contains(query)
        || reminder
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
}

fn open_with_due_date(
    reminders: &[Reminder],
    due_matches: impl Fn(DateTime<Utc>) -> bool,
) -> Vec<&Reminder> {
    reminders
        .iter()
        .filter(|r| !r.is_completed)
        .filter(|r| r.due_date.is_some_and(&due_matches))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factory::create_reminder;
    use crate::domain::{ReminderCategory, ReminderFormData};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn reminder(id: &str, due: Option<DateTime<Utc>>, created_offset_min: i64) -> Reminder {
        let mut form = ReminderFormData::new(format!("Task {}", id));
        form.due_date = due;
        create_reminder(
            form,
            id.to_string(),
            now() - Duration::days(1) + Duration::minutes(created_offset_min),
        )
    }

    #[test]
    fn test_list_order() {
        let mut done = reminder("done", Some(now() - Duration::hours(5)), 0);
        done.is_completed = true;

        let items = vec![
            reminder("undated-old", None, 0),
            done,
            reminder("late", Some(now() + Duration::days(2)), 0),
            reminder("undated-new", None, 10),
            reminder("soon", Some(now() + Duration::hours(1)), 0),
        ];

        let ids: Vec<&str> = filtered(&items, CategoryFilter::All, "")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["soon", "late", "undated-new", "undated-old", "done"]);
    }

    #[test]
    fn test_equal_due_dates_fall_back_to_newest_first() {
        let due = Some(now() + Duration::hours(3));
        let items = vec![reminder("older", due, 0), reminder("newer", due, 30)];

        let ids: Vec<&str> = filtered(&items, CategoryFilter::All, "")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["newer", "older"]);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let mut groceries = reminder("g", None, 0);
        groceries.title = "Pick up groceries".to_string();
        groceries.description = Some("Milk and EGGS".to_string());
        groceries.category = ReminderCategory::Shopping;
        let other = reminder("o", None, 0);

        let items = vec![groceries, other];
        assert_eq!(filtered(&items, CategoryFilter::All, "eggs").len(), 1);
        assert_eq!(filtered(&items, CategoryFilter::All, "GROCER").len(), 1);
        assert_eq!(filtered(&items, CategoryFilter::All, "").len(), 2);
        assert_eq!(
            filtered(&items, CategoryFilter::Only(ReminderCategory::Work), "").len(),
            0
        );
    }

    #[test]
    fn test_time_buckets() {
        let items = vec![
            reminder("an-hour-ago", Some(now() - Duration::hours(1)), 0),
            reminder("yesterday", Some(now() - Duration::days(1)), 0),
            reminder("tonight", Some(now() + Duration::hours(8)), 0),
            reminder("in-two-hours", Some(now() + Duration::hours(2)), 0),
            reminder("next-week", Some(now() + Duration::days(7)), 0),
            reminder("undated", None, 0),
        ];

        let ids = |v: Vec<&Reminder>| v.iter().map(|r| r.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(past_due(&items, &now())), ["an-hour-ago", "yesterday"]);
        assert_eq!(
            ids(upcoming(&items, &now())),
            ["in-two-hours", "tonight", "next-week"]
        );
        assert_eq!(
            ids(today(&items, &now())),
            ["an-hour-ago", "in-two-hours", "tonight"]
        );
    }
}
