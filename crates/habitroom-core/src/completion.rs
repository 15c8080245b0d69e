//! Per-day completion tracking for habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of marking something complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The completion was new and has been recorded.
    Recorded,
    /// Already complete; nothing changed.
    AlreadyCompleted,
}

impl CompletionOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, CompletionOutcome::Recorded)
    }
}

/// Whether `today` is among the recorded completion dates.
pub fn is_completed_today(completions: &[NaiveDate], today: NaiveDate) -> bool {
    completions.contains(&today)
}

/// Record a completion for `today`. A date is never stored twice.
pub fn record_completion(completions: &mut Vec<NaiveDate>, today: NaiveDate) -> CompletionOutcome {
    if is_completed_today(completions, today) {
        CompletionOutcome::AlreadyCompleted
    } else {
        completions.push(today);
        CompletionOutcome::Recorded
    }
}

/// Drop repeated dates, keeping the first occurrence of each.
pub(crate) fn dedup_in_place(completions: &mut Vec<NaiveDate>) -> usize {
    let before = completions.len();
    let mut seen = HashSet::with_capacity(before);
    completions.retain(|date| seen.insert(*date));
    before - completions.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn completed_today_checks_membership() {
        let completions = vec![day(1), day(3)];
        assert!(is_completed_today(&completions, day(3)));
        assert!(!is_completed_today(&completions, day(2)));
        assert!(!is_completed_today(&[], day(2)));
    }

    #[test]
    fn record_completion_is_idempotent() {
        let mut completions = vec![day(1)];

        assert_eq!(record_completion(&mut completions, day(2)), CompletionOutcome::Recorded);
        assert_eq!(
            record_completion(&mut completions, day(2)),
            CompletionOutcome::AlreadyCompleted
        );

        assert_eq!(completions, vec![day(1), day(2)]);
        assert_eq!(completions.iter().filter(|d| **d == day(2)).count(), 1);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut completions = vec![day(2), day(1), day(2), day(1), day(4)];
        assert_eq!(dedup_in_place(&mut completions), 2);
        assert_eq!(completions, vec![day(2), day(1), day(4)]);
    }

    #[test]
    fn dedup_handles_long_histories() {
        let start = day(1);
        let mut completions: Vec<NaiveDate> = (0..2000)
            .map(|n| start + chrono::Duration::days(n % 1000))
            .collect();
        assert_eq!(dedup_in_place(&mut completions), 1000);
        assert_eq!(completions.len(), 1000);
        assert_eq!(completions[999], start + chrono::Duration::days(999));
    }
}
