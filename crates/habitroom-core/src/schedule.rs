//! Habit recurrence: daily or weekly on a set of weekdays.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How often a habit recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    /// Anything else found in a hand-edited data file. Never due.
    #[serde(other)]
    Unknown,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(ValidationError::InvalidFrequency(s.to_string())),
        }
    }
}

/// Canonical capitalized name, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday name, ignoring case. Three-letter abbreviations are accepted.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a comma-separated day list such as `monday,Friday`.
///
/// Duplicates are dropped while keeping first-seen order. Every invalid
/// name is reported, not just the first.
pub fn parse_days(list: &str) -> Result<Vec<Weekday>, ValidationError> {
    let mut days = Vec::new();
    let mut invalid = Vec::new();

    for raw in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match parse_weekday(raw) {
            Some(day) if !days.contains(&day) => days.push(day),
            Some(_) => {}
            None => invalid.push(raw.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidDays(invalid));
    }
    if days.is_empty() {
        return Err(ValidationError::MissingDays);
    }
    Ok(days)
}

/// Whether a habit with this schedule is due on `weekday`.
pub fn is_due_today(frequency: Frequency, days: &[Weekday], weekday: Weekday) -> bool {
    match frequency {
        Frequency::Daily => true,
        Frequency::Weekly => days.contains(&weekday),
        Frequency::Unknown => false,
    }
}

/// [`is_due_today`] for a calendar date.
pub fn is_due_on(frequency: Frequency, days: &[Weekday], date: NaiveDate) -> bool {
    is_due_today(frequency, days, date.weekday())
}

/// Human readable frequency, e.g. `Weekly (Monday, Friday)`.
pub fn describe(frequency: Frequency, days: &[Weekday]) -> String {
    let base = match frequency {
        Frequency::Daily => "Daily",
        Frequency::Weekly => "Weekly",
        Frequency::Unknown => "Unknown",
    };
    if frequency == Frequency::Weekly {
        let names: Vec<&str> = days.iter().map(|d| weekday_name(*d)).collect();
        format!("{base} ({})", names.join(", "))
    } else {
        base.to_string()
    }
}

/// Serialize weekdays as canonical names.
pub(crate) fn serialize_day_names<S: Serializer>(
    days: &[Weekday],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(days.iter().map(|d| weekday_name(*d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_is_always_due() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(is_due_today(Frequency::Daily, &[], day));
        }
    }

    #[test]
    fn weekly_matches_case_insensitively() {
        let days = parse_days("Monday,Friday").unwrap();
        let monday = parse_weekday("monday").unwrap();
        let tuesday = parse_weekday("tuesday").unwrap();
        assert!(is_due_today(Frequency::Weekly, &days, monday));
        assert!(!is_due_today(Frequency::Weekly, &[Weekday::Mon], tuesday));
    }

    #[test]
    fn unknown_frequency_is_never_due() {
        assert!(!is_due_today(Frequency::Unknown, &[Weekday::Mon], Weekday::Mon));
        let parsed: Frequency = serde_json::from_str("\"fortnightly\"").unwrap();
        assert_eq!(parsed, Frequency::Unknown);
    }

    #[test]
    fn is_due_on_uses_the_date_weekday() {
        // 2024-05-01 was a Wednesday.
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(is_due_on(Frequency::Weekly, &[Weekday::Wed], date));
        assert!(!is_due_on(Frequency::Weekly, &[Weekday::Thu], date));
    }

    #[test]
    fn parse_days_reports_all_invalid_names() {
        assert_eq!(
            parse_days("monday,funday,someday"),
            Err(ValidationError::InvalidDays(vec![
                "funday".to_string(),
                "someday".to_string()
            ]))
        );
        assert_eq!(parse_days(" , "), Err(ValidationError::MissingDays));
        assert_eq!(
            parse_days("fri,Friday,mon").unwrap(),
            vec![Weekday::Fri, Weekday::Mon]
        );
    }

    #[test]
    fn frequency_parsing() {
        assert_eq!("Weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("monthly".parse::<Frequency>().is_err());
    }

    #[test]
    fn describe_lists_weekly_days() {
        assert_eq!(describe(Frequency::Daily, &[]), "Daily");
        assert_eq!(
            describe(Frequency::Weekly, &[Weekday::Mon, Weekday::Fri]),
            "Weekly (Monday, Friday)"
        );
    }
}
