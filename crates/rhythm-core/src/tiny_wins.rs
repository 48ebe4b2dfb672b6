//! Tiny-win completion tracking.
//!
//! Tracks which micro-actions were completed today and derives the daily
//! count and the streak. Recording is idempotent per day for data, while the
//! caller still celebrates every tap.
//!
//! Day boundaries are decided outside the core: the owner calls
//! [`TinyWinTracker::roll_over`] when the calendar day changes. Past days are
//! kept only as an in-memory count ledger for the streak.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TinyWinRecord {
    pub action_id: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TinyWinTracker {
    today: NaiveDate,
    /// Today's completions in the order they first happened.
    completed: Vec<TinyWinRecord>,
    /// Completion counts for days before `today`.
    history: BTreeMap<NaiveDate, usize>,
}

impl TinyWinTracker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            completed: Vec::new(),
            history: BTreeMap::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Record an action as done now. Returns `true` if it was not yet
    /// recorded today.
    pub fn record_completion(&mut self, action_id: &str) -> bool {
        self.record_completion_at(action_id, Utc::now())
    }

    pub fn record_completion_at(&mut self, action_id: &str, at: DateTime<Utc>) -> bool {
        if self.is_completed(action_id) {
            debug!(action_id, "tiny win already recorded today");
            return false;
        }
        self.completed.push(TinyWinRecord {
            action_id: action_id.to_string(),
            completed_at: at,
        });
        true
    }

    pub fn is_completed(&self, action_id: &str) -> bool {
        self.completed.iter().any(|r| r.action_id == action_id)
    }

    pub fn completions(&self) -> &[TinyWinRecord] {
        &self.completed
    }

    pub fn daily_count(&self) -> usize {
        self.completed.len()
    }

    /// Consecutive days, ending today, with at least one completion.
    ///
    /// A day with no completions (including a day that was skipped
    /// entirely by the rollover) breaks the streak.
    pub fn streak_days(&self) -> u32 {
        if self.daily_count() == 0 {
            return 0;
        }
        let mut streak = 1;
        let mut day = self.today;
        while let Some(prev) = day.pred_opt() {
            match self.history.get(&prev) {
                Some(&count) if count > 0 => streak += 1,
                _ => break,
            }
            day = prev;
        }
        streak
    }

    /// Close out the current day and start `new_day` with an empty set.
    ///
    /// Rolling to a day that is not after the current one is ignored.
    pub fn roll_over(&mut self, new_day: NaiveDate) {
        if new_day <= self.today {
            warn!(%new_day, today = %self.today, "ignoring rollover to a non-future day");
            return;
        }
        self.history.insert(self.today, self.completed.len());
        self.completed.clear();
        debug!(from = %self.today, to = %new_day, "tiny win day rolled over");
        self.today = new_day;
    }

    /// Archived count for a past day, if it was ever the current day.
    pub fn count_on(&self, day: NaiveDate) -> Option<usize> {
        if day == self.today {
            return Some(self.daily_count());
        }
        self.history.get(&day).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    #[test]
    fn recording_twice_keeps_count_at_one() {
        let mut tracker = TinyWinTracker::new(day(15));
        assert!(tracker.record_completion("water"));
        assert!(!tracker.record_completion("water"));
        assert_eq!(tracker.daily_count(), 1);
        assert!(tracker.is_completed("water"));
    }

    #[test]
    fn distinct_actions_accumulate() {
        let mut tracker = TinyWinTracker::new(day(15));
        tracker.record_completion("water");
        tracker.record_completion("sunlight");
        tracker.record_completion("breathe");
        assert_eq!(tracker.daily_count(), 3);
        let ids: Vec<_> = tracker.completions().iter().map(|r| r.action_id.as_str()).collect();
        assert_eq!(ids, ["water", "sunlight", "breathe"]);
    }

    #[test]
    fn streak_is_zero_without_completions_today() {
        let tracker = TinyWinTracker::new(day(15));
        assert_eq!(tracker.streak_days(), 0);
    }

    #[test]
    fn streak_stops_at_earliest_representable_day() {
        let mut tracker = TinyWinTracker::new(NaiveDate::MIN);
        tracker.record_completion("water");
        assert_eq!(tracker.streak_days(), 1);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut tracker = TinyWinTracker::new(day(13));
        tracker.record_completion("water");
        tracker.roll_over(day(14));
        tracker.record_completion("water");
        tracker.roll_over(day(15));
        tracker.record_completion("breathe");
        assert_eq!(tracker.streak_days(), 3);
    }

    #[test]
    fn empty_day_breaks_streak() {
        let mut tracker = TinyWinTracker::new(day(12));
        tracker.record_completion("water");
        tracker.roll_over(day(13));
        tracker.roll_over(day(14));
        tracker.record_completion("water");
        tracker.roll_over(day(15));
        tracker.record_completion("water");
        assert_eq!(tracker.streak_days(), 2);
    }

    #[test]
    fn skipped_calendar_day_breaks_streak() {
        let mut tracker = TinyWinTracker::new(day(13));
        tracker.record_completion("water");
        tracker.roll_over(day(15));
        tracker.record_completion("water");
        assert_eq!(tracker.streak_days(), 1);
        assert_eq!(tracker.count_on(day(14)), None);
    }

    #[test]
    fn rollover_clears_set_and_allows_rerecording() {
        let mut tracker = TinyWinTracker::new(day(14));
        tracker.record_completion("water");
        tracker.roll_over(day(15));
        assert_eq!(tracker.daily_count(), 0);
        assert!(tracker.record_completion("water"));
        assert_eq!(tracker.count_on(day(14)), Some(1));
    }

    #[test]
    fn backwards_rollover_is_ignored() {
        let mut tracker = TinyWinTracker::new(day(15));
        tracker.record_completion("water");
        tracker.roll_over(day(15));
        tracker.roll_over(day(10));
        assert_eq!(tracker.today(), day(15));
        assert_eq!(tracker.daily_count(), 1);
    }
}
