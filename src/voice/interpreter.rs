//! Rule-based interpretation of a transcribed voice memo.
//!
//! Turns free text like "Remind me to call John tomorrow at 3 PM" into a
//! title, category, priority and due date. Matching is case-insensitive
//! substring matching over fixed keyword sets, so "recall" counts as "call"
//! and "not urgent" counts as urgent. Every string yields a result.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};
use regex::{Captures, Regex};

use crate::core::clock::resolve_local;
use crate::domain::{ReminderCategory, ReminderFormData, ReminderPriority};

/// Category keyword groups, checked in order; the first hit wins
const CATEGORY_KEYWORDS: [(ReminderCategory, &[&str]); 4] = [
    (
        ReminderCategory::Work,
        &[
            "work",
            "meeting",
            "project",
            "client",
            "report",
            "presentation",
            "email",
            "call",
            "conference",
        ],
    ),
    (
        ReminderCategory::Health,
        &[
            "gym", "doctor", "dentist", "medicine", "pill", "exercise", "workout", "health",
            "medical",
        ],
    ),
    (
        ReminderCategory::Shopping,
        &[
            "shop",
            "buy",
            "store",
            "grocery",
            "groceries",
            "purchase",
            "shopping",
        ],
    ),
    (
        ReminderCategory::Personal,
        &[
            "family", "friend", "mom", "dad", "sister", "brother", "birthday", "personal",
        ],
    ),
];

const HIGH_URGENCY: &[&str] = &["urgent", "important", "critical", "asap", "emergency"];

const LOW_URGENCY: &[&str] = &["whenever", "sometime", "low priority", "not urgent"];

/// Day keywords, checked in order; the first hit wins
const DAY_KEYWORDS: [(&str, DayKeyword); 9] = [
    ("today", DayKeyword::Today),
    ("tomorrow", DayKeyword::Tomorrow),
    ("monday", DayKeyword::Weekday(Weekday::Mon)),
    ("tuesday", DayKeyword::Weekday(Weekday::Tue)),
    ("wednesday", DayKeyword::Weekday(Weekday::Wed)),
    ("thursday", DayKeyword::Weekday(Weekday::Thu)),
    ("friday", DayKeyword::Weekday(Weekday::Fri)),
    ("saturday", DayKeyword::Weekday(Weekday::Sat)),
    ("sunday", DayKeyword::Weekday(Weekday::Sun)),
];

#[derive(Debug, Clone, Copy)]
enum DayKeyword {
    Today,
    Tomorrow,
    Weekday(Weekday),
}

/// Structured fields pulled out of a transcription
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInterpretation {
    pub title: String,
    pub category: ReminderCategory,
    pub priority: ReminderPriority,
    pub due_date: Option<DateTime<Utc>>,
}

impl VoiceInterpretation {
    /// Form data for a voice-captured reminder, keeping the source text
    pub fn into_form_data(self, transcription: impl Into<String>) -> ReminderFormData {
        ReminderFormData {
            title: self.title,
            description: None,
            category: self.category,
            due_date: self.due_date,
            priority: self.priority,
            audio_uri: None,
            transcription: Some(transcription.into()),
        }
    }
}

struct Patterns {
    /// "at 3", "at 3pm", "at 15:30", "at 9:05 am"
    time: Regex,
    /// The cleanup variant: single space after "at", no captures
    time_phrase: Regex,
    /// Title cleanup, applied in order, first occurrence only
    cleanup: Vec<Regex>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let day_words: Vec<&str> = DAY_KEYWORDS.iter().map(|(word, _)| *word).collect();
        let urgency_words: Vec<&str> = HIGH_URGENCY.iter().chain(LOW_URGENCY).copied().collect();

        let time_phrase = Regex::new(r"(?i)at [0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm)?")
            .expect("valid time phrase regex");

        Patterns {
            time: Regex::new(r"(?i)at\s+([0-9]{1,2})(?::([0-9]{2}))?\s*(am|pm)?")
                .expect("valid time regex"),
            cleanup: vec![
                Regex::new(r"(?i)remind me to ").expect("valid prefix regex"),
                Regex::new(r"(?i)remind me ").expect("valid prefix regex"),
                time_phrase.clone(),
                alternation(&day_words),
                alternation(&["next week", "next month"]),
                alternation(&urgency_words),
            ],
            time_phrase,
        }
    })
}

fn alternation(words: &[&str]) -> Regex {
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Regex::new(&format!("(?i){}", escaped.join("|"))).expect("valid keyword regex")
}

/// Interpret a transcription relative to `now`.
///
/// Relative days resolve in `now`'s time zone. A day keyword without a time
/// keeps `now`'s time of day; a time without a day keyword is ignored.
pub fn interpret<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> VoiceInterpretation {
    let lowered = text.to_lowercase();

    let due_date = base_date(&lowered, now).map(|base| {
        patterns()
            .time
            .captures(text)
            .and_then(|caps| with_time_of_day(&base, &caps))
            .unwrap_or(base)
            .with_timezone(&Utc)
    });

    VoiceInterpretation {
        title: clean_title(text),
        category: detect_category(&lowered),
        priority: detect_priority(&lowered),
        due_date,
    }
}

fn contains_any(lowered: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lowered.contains(w))
}

fn detect_category(lowered: &str) -> ReminderCategory {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| contains_any(lowered, words))
        .map(|(category, _)| *category)
        .unwrap_or(ReminderCategory::Other)
}

fn detect_priority(lowered: &str) -> ReminderPriority {
    if contains_any(lowered, HIGH_URGENCY) {
        ReminderPriority::High
    } else if contains_any(lowered, LOW_URGENCY) {
        ReminderPriority::Low
    } else {
        ReminderPriority::Medium
    }
}

fn base_date<Tz: TimeZone>(lowered: &str, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let keyword = DAY_KEYWORDS
        .iter()
        .find(|(word, _)| lowered.contains(word))
        .map(|(_, keyword)| *keyword)?;

    let days = match keyword {
        DayKeyword::Today => 0,
        DayKeyword::Tomorrow => 1,
        DayKeyword::Weekday(target) => days_until(now.weekday(), target),
    };

    if days == 0 {
        return Some(now.clone());
    }
    let shifted = now.naive_local() + Duration::days(days);
    Some(resolve_local(&now.timezone(), shifted))
}

/// Days from `from` to the next `target`, never zero
fn days_until(from: Weekday, target: Weekday) -> i64 {
    let diff = (7 + i64::from(target.num_days_from_sunday()) - i64::from(from.num_days_from_sunday())) % 7;
    if diff == 0 {
        7
    } else {
        diff
    }
}

/// Set the captured hour/minute on `base`, zeroing seconds.
///
/// Hours past 23 roll into the following day.
fn with_time_of_day<Tz: TimeZone>(base: &DateTime<Tz>, caps: &Captures<'_>) -> Option<DateTime<Tz>> {
    let mut hour: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minute: i64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.get(3).map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    let naive = base.date_naive().and_time(NaiveTime::MIN)
        + Duration::hours(hour)
        + Duration::minutes(minute);
    Some(resolve_local(&base.timezone(), naive))
}

fn clean_title(text: &str) -> String {
    let stripped = patterns()
        .cleanup
        .iter()
        .fold(text.to_string(), |title, pattern| {
            pattern.replace(&title, "").into_owned()
        });

    capitalize_first(stripped.trim())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `text` carries a time phrase the title cleanup would strip
pub fn has_time_phrase(text: &str) -> bool {
    patterns().time_phrase.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    // Wednesday 2024-01-10 09:30 UTC
    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    #[test]
    fn test_category_order() {
        // "meeting" (work) outranks "gym" (health)
        let result = interpret("gym meeting", &wednesday());
        assert_eq!(result.category, ReminderCategory::Work);

        assert_eq!(interpret("buy milk", &wednesday()).category, ReminderCategory::Shopping);
        assert_eq!(interpret("Dad's BIRTHDAY", &wednesday()).category, ReminderCategory::Personal);
        assert_eq!(interpret("water the plants", &wednesday()).category, ReminderCategory::Other);
    }

    #[test]
    fn test_substring_matching() {
        // "recall" contains "call"
        assert_eq!(interpret("recall the book", &wednesday()).category, ReminderCategory::Work);
        // "not urgent" contains "urgent", which is checked first
        assert_eq!(interpret("not urgent", &wednesday()).priority, ReminderPriority::High);
    }

    #[test]
    fn test_priority() {
        assert_eq!(interpret("ASAP fix", &wednesday()).priority, ReminderPriority::High);
        assert_eq!(interpret("read sometime", &wednesday()).priority, ReminderPriority::Low);
        assert_eq!(interpret("read", &wednesday()).priority, ReminderPriority::Medium);
    }

    #[test]
    fn test_today_keeps_time_of_day() {
        let result = interpret("stretch today", &wednesday());
        assert_eq!(result.due_date, Some(wednesday()));
    }

    #[test]
    fn test_same_weekday_means_next_week() {
        let result = interpret("standup on wednesday at 9am", &wednesday());
        assert_eq!(result.due_date, Some(at(17, 9, 0)));
    }

    #[test]
    fn test_weekday_order_beats_text_order() {
        // monday is checked before friday regardless of position
        let result = interpret("friday or monday", &wednesday());
        assert_eq!(result.due_date.unwrap().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_time_parsing() {
        let due = |text: &str| interpret(text, &wednesday()).due_date.unwrap();

        assert_eq!(due("tomorrow at 3pm"), at(11, 15, 0));
        assert_eq!(due("tomorrow at 12 am"), at(11, 0, 0));
        assert_eq!(due("tomorrow at 12pm"), at(11, 12, 0));
        assert_eq!(due("tomorrow at 17:45"), at(11, 17, 45));
        assert_eq!(due("tomorrow at 7:05 AM"), at(11, 7, 5));
        assert_eq!(due("tomorrow at 11PM"), at(11, 23, 0));
    }

    #[test]
    fn test_hours_past_midnight_roll_over() {
        let due = interpret("tomorrow at 25", &wednesday()).due_date.unwrap();
        assert_eq!(due, at(12, 1, 0));
    }

    #[test]
    fn test_time_without_day_is_ignored() {
        let result = interpret("call mom at 5pm", &wednesday());
        assert_eq!(result.due_date, None);
        assert_eq!(result.title, "Call mom");
    }

    #[test]
    fn test_title_strips_first_occurrence_only() {
        let result = interpret("today and today", &wednesday());
        assert_eq!(result.title, "And today");
    }

    #[test]
    fn test_title_cleanup_order() {
        let result = interpret(
            "remind me to finish slides next week, important",
            &wednesday(),
        );
        assert_eq!(result.title, "Finish slides ,");
        assert_eq!(result.priority, ReminderPriority::High);
    }

    #[test]
    fn test_empty_input() {
        let result = interpret("", &wednesday());
        assert_eq!(result.title, "");
        assert_eq!(result.category, ReminderCategory::Other);
        assert_eq!(result.priority, ReminderPriority::Medium);
        assert_eq!(result.due_date, None);
    }

    #[test]
    fn test_days_resolve_in_local_offset() {
        // 23:30 Tuesday UTC is already 01:30 Wednesday at +02:00
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = Utc
            .with_ymd_and_hms(2024, 1, 9, 23, 30, 0)
            .unwrap()
            .with_timezone(&offset);

        let due = interpret("tomorrow at 8am", &now).due_date.unwrap();
        let local = due.with_timezone(&offset);
        assert_eq!(local.weekday(), Weekday::Thu);
        assert_eq!(local.hour(), 8);
    }

    #[test]
    fn test_time_phrase_detection() {
        assert!(has_time_phrase("lunch at 12:30"));
        assert!(!has_time_phrase("lunch at noon"));
    }
}
