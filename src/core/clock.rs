//! Clock and calendar helpers.
//!
//! Everything that depends on "now" takes it as an argument or reads it from
//! a [`Clock`], so the interpreter and the derived views can be driven by a
//! fixed clock in tests. Day arithmetic runs against the time zone carried by
//! the supplied `now`, so a real zone (`Local`, or a `chrono_tz::Tz`) keeps
//! wall-clock times stable across daylight-saving changes.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::domain::ReminderError;

/// Source of the current wall-clock time in zone `Tz`
pub trait Clock<Tz: TimeZone = Local>: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// The machine's local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock<Local> for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock<Tz: TimeZone = Utc> {
    now: Mutex<DateTime<Tz>>,
}

impl<Tz: TimeZone> ManualClock<Tz> {
    pub fn new(now: DateTime<Tz>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl ManualClock<Utc> {
    /// Pin the clock to a UTC instant
    pub fn at_utc(now: DateTime<Utc>) -> Self {
        Self::new(now)
    }
}

impl<Tz> Clock<Tz> for ManualClock<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    fn now(&self) -> DateTime<Tz> {
        self.now
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Which agenda section a single due date is labelled with.
///
/// Past-due takes precedence: an open item due earlier today is `PastDue`
/// here, while the today view still lists it alongside the rest of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    /// Strictly before now
    PastDue,
    /// Later today
    Today,
    /// Tomorrow or later
    Upcoming,
}

/// Map a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks falling back) resolve to the earlier instant;
/// times inside a gap (clocks springing forward) are pushed forward an hour.
pub(crate) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Midnight at the start of `date` in `tz`
pub(crate) fn midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(NaiveTime::MIN))
}

/// Midnight at the start of the day containing `at`
pub fn start_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    midnight(&at.timezone(), at.date_naive())
}

/// Midnight at the start of the day after the one containing `at`
pub fn start_of_next_day<Tz: TimeZone>(at: &DateTime<Tz>) -> DateTime<Tz> {
    midnight(&at.timezone(), at.date_naive() + Duration::days(1))
}

pub fn is_past_due<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    *date < now.with_timezone(&Utc)
}

/// Whether `date` falls on the same calendar day as `now` (in `now`'s zone)
pub fn is_today<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// Place a due date relative to now. Past-due wins over today.
pub fn classify<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> DueBucket {
    if is_past_due(date, now) {
        DueBucket::PastDue
    } else if *date < start_of_next_day(now).with_timezone(&Utc) {
        DueBucket::Today
    } else {
        DueBucket::Upcoming
    }
}

/// 12-hour clock time, e.g. `3:05 PM`
pub fn format_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    let (is_pm, hour) = date.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        date.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Friendly rendering of an optional due date, relative to `now`
pub fn format_due_date<Tz: TimeZone>(date: Option<&DateTime<Utc>>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(date) = date else {
        return "No date".to_string();
    };

    let local = date.with_timezone(&now.timezone());
    let days_diff = (local.date_naive() - now.date_naive()).num_days();
    let time = format_time(&local);

    match days_diff {
        0 => format!("Today at {}", time),
        1 => format!("Tomorrow at {}", time),
        2..=6 => format!("{} at {}", local.format("%A"), time),
        _ => format!("{} at {}", local.format("%-m/%-d/%Y"), time),
    }
}

/// How long ago `date` was, e.g. `3 hours ago`
pub fn relative_time<Tz: TimeZone>(date: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let seconds = (now.with_timezone(&Utc) - *date).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 30 {
        plural(days, "day")
    } else {
        date.with_timezone(&now.timezone())
            .format("%-m/%-d/%Y")
            .to_string()
    }
}

/// Parse a user-entered due date.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` (or with a `T` separator) in `now`'s
/// zone, or a bare `YYYY-MM-DD`, which lands at noon.
pub fn parse_due_date<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, ReminderError> {
    let input = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let tz = now.timezone();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(resolve_local(&tz, naive).with_timezone(&Utc));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
        return Ok(resolve_local(&tz, noon).with_timezone(&Utc));
    }

    Err(ReminderError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use chrono_tz::America::New_York;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_day_boundaries() {
        let now = at(2024, 1, 10, 15, 30);
        assert_eq!(start_of_day(&now), at(2024, 1, 10, 0, 0));
        assert_eq!(start_of_next_day(&now), at(2024, 1, 11, 0, 0));
    }

    #[test]
    fn test_day_boundaries_follow_offset() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        // 22:00 UTC on the 10th is 03:00 on the 11th at +05:00
        let now = at(2024, 1, 10, 22, 0).with_timezone(&offset);
        assert_eq!(start_of_day(&now).with_timezone(&Utc), at(2024, 1, 10, 19, 0));
    }

    #[test]
    fn test_day_boundaries_across_spring_forward() {
        // 2024-03-10 is 23 hours long in New York
        let now = New_York.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap();
        assert_eq!(start_of_day(&now).with_timezone(&Utc), at(2024, 3, 10, 5, 0));
        assert_eq!(start_of_next_day(&now).with_timezone(&Utc), at(2024, 3, 11, 4, 0));
    }

    #[test]
    fn test_parse_due_date_uses_zone_rules() {
        // Parsed in early March, due after the switch to daylight time
        let now = New_York.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(
            parse_due_date("2024-03-15 15:00", &now).unwrap(),
            at(2024, 3, 15, 19, 0)
        );
    }

    #[test]
    fn test_classify() {
        let now = at(2024, 1, 10, 12, 0);
        assert_eq!(classify(&at(2024, 1, 10, 9, 0), &now), DueBucket::PastDue);
        assert_eq!(classify(&at(2024, 1, 10, 18, 0), &now), DueBucket::Today);
        assert_eq!(classify(&at(2024, 1, 11, 0, 0), &now), DueBucket::Upcoming);
        assert!(is_today(&at(2024, 1, 10, 9, 0), &now));
        assert!(!is_today(&at(2024, 1, 11, 9, 0), &now));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(&at(2024, 1, 10, 0, 5)), "12:05 AM");
        assert_eq!(format_time(&at(2024, 1, 10, 12, 0)), "12:00 PM");
        assert_eq!(format_time(&at(2024, 1, 10, 15, 30)), "3:30 PM");
    }

    #[test]
    fn test_format_due_date() {
        // Wednesday
        let now = at(2024, 1, 10, 8, 0);
        assert_eq!(format_due_date(None, &now), "No date");
        assert_eq!(
            format_due_date(Some(&at(2024, 1, 10, 15, 0)), &now),
            "Today at 3:00 PM"
        );
        assert_eq!(
            format_due_date(Some(&at(2024, 1, 11, 9, 15)), &now),
            "Tomorrow at 9:15 AM"
        );
        assert_eq!(
            format_due_date(Some(&at(2024, 1, 12, 14, 0)), &now),
            "Friday at 2:00 PM"
        );
        assert_eq!(
            format_due_date(Some(&at(2024, 1, 20, 14, 0)), &now),
            "1/20/2024 at 2:00 PM"
        );
        assert_eq!(
            format_due_date(Some(&at(2024, 1, 9, 14, 0)), &now),
            "1/9/2024 at 2:00 PM"
        );
    }

    #[test]
    fn test_relative_time() {
        let now = at(2024, 1, 10, 12, 0);
        assert_eq!(relative_time(&at(2024, 1, 10, 11, 59), &now), "1 minute ago");
        assert_eq!(relative_time(&now, &now), "just now");
        assert_eq!(relative_time(&at(2024, 1, 10, 9, 0), &now), "3 hours ago");
        assert_eq!(relative_time(&at(2024, 1, 9, 12, 0), &now), "1 day ago");
        assert_eq!(relative_time(&at(2023, 11, 1, 12, 0), &now), "11/1/2023");
    }

    #[test]
    fn test_parse_due_date() {
        let now = at(2024, 1, 10, 12, 0);
        assert_eq!(
            parse_due_date("2024-01-12 14:30", &now).unwrap(),
            at(2024, 1, 12, 14, 30)
        );
        assert_eq!(
            parse_due_date("2024-01-12", &now).unwrap(),
            at(2024, 1, 12, 12, 0)
        );
        assert_eq!(
            parse_due_date("2024-01-12T10:00:00+02:00", &now).unwrap(),
            at(2024, 1, 12, 8, 0)
        );
        assert!(matches!(
            parse_due_date("next tuesday", &now),
            Err(ReminderError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::at_utc(at(2024, 1, 10, 12, 0));
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now().with_timezone(&Utc), at(2024, 1, 10, 12, 5));
    }
}
