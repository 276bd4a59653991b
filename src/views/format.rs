//! Text formatting shared by the view renderers.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;

/// `$100`, `$12.5`
pub fn money(amount: f64) -> String {
    format!("${}", amount)
}

/// Humanized distance between `target` and `now`: "in 2 days", "3 hours ago"
pub fn relative_time(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target.signed_duration_since(now);
    let seconds = delta.num_seconds().unsigned_abs() as f64;
    let phrase = humanize(seconds);

    if delta.num_seconds() >= 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn humanize(seconds: f64) -> String {
    let minutes = (seconds / 60.0).round();
    let hours = (seconds / 3600.0).round();
    let days = (seconds / 86_400.0).round();

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round())
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round())
    }
}

/// "Mar 5, 2:30 pm"
pub fn short_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format("%b %-d, %-I:%M %P").to_string()
}

/// "3/5/2024, 2:30:00 PM"
pub fn long_timestamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn local(dt: &DateTime<Utc>) -> DateTime<Local> {
    dt.with_timezone(&Local)
}

/// Heading with an underline of matching width
pub(crate) fn heading(f: &mut fmt::Formatter<'_>, title: &str, rule: char) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", rule.to_string().repeat(title.chars().count()))
}

pub(crate) fn alert(f: &mut fmt::Formatter<'_>, message: &str) -> fmt::Result {
    writeln!(f, "[!] {}", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_money() {
        assert_eq!(money(100.0), "$100");
        assert_eq!(money(12.5), "$12.5");
    }

    #[test]
    fn test_relative_time_future() {
        let now = now();
        assert_eq!(relative_time(now + Duration::seconds(30), now), "in a few seconds");
        assert_eq!(relative_time(now + Duration::seconds(60), now), "in a minute");
        assert_eq!(relative_time(now + Duration::minutes(10), now), "in 10 minutes");
        assert_eq!(relative_time(now + Duration::minutes(50), now), "in an hour");
        assert_eq!(relative_time(now + Duration::hours(5), now), "in 5 hours");
        assert_eq!(relative_time(now + Duration::hours(30), now), "in a day");
        assert_eq!(relative_time(now + Duration::days(2), now), "in 2 days");
        assert_eq!(relative_time(now + Duration::days(30), now), "in a month");
        assert_eq!(relative_time(now + Duration::days(400), now), "in a year");
        assert_eq!(relative_time(now + Duration::days(900), now), "in 2 years");
    }

    #[test]
    fn test_relative_time_past() {
        let now = now();
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn test_timestamps() {
        let dt = now();
        assert_eq!(short_timestamp(&dt), "Mar 5, 2:30 pm");
        assert_eq!(long_timestamp(&dt), "3/5/2024, 2:30:00 PM");
    }
}
