//! Nudge timer implementation.
//!
//! A single countdown used by tiny-win nudges and light-therapy sessions.
//! It has no internal thread: the caller delivers one `tick` per second
//! while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --tick--> Running --tick(0)--> Completed
//! Running --pause--> Idle            (remaining kept)
//! Running | Completed --dismiss--> Idle (remaining reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = NudgeTimer::new(300)?;
//! timer.start();
//! // Once per second:
//! if let Some(run) = timer.run_id() {
//!     timer.tick(run); // Returns Some(Event::TimerCompleted) on the last tick
//! }
//! ```
//!
//! Every start opens a new run. Ticks name the run they were scheduled for,
//! so a tick that was already in flight when the timer was paused or
//! dismissed is dropped instead of touching the reset countdown.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::events::Event;

/// Identifier of one start-to-stop span of a timer.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
}

/// Countdown timer with second granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeTimer {
    duration_secs: u32,
    remaining_secs: u32,
    state: TimerState,
    /// Run currently accepting ticks. `None` unless running.
    #[serde(default)]
    active_run: Option<RunId>,
    /// Last run id handed out; ids are never reused.
    #[serde(default)]
    last_run: RunId,
}

impl NudgeTimer {
    /// Create an idle timer with the given configured duration.
    pub fn new(duration_secs: u32) -> Result<Self, ValidationError> {
        if duration_secs == 0 {
            return Err(ValidationError::InvalidDuration(duration_secs));
        }
        Ok(Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: TimerState::Idle,
            active_run: None,
            last_run: 0,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// The run that will accept the next tick, if running.
    pub fn run_id(&self) -> Option<RunId> {
        self.active_run
    }

    /// True when paused part-way through a countdown.
    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Idle && self.remaining_secs < self.duration_secs
    }

    /// 0.0 .. 1.0 progress through the configured duration.
    pub fn progress(&self) -> f64 {
        1.0 - (self.remaining_secs as f64 / self.duration_secs as f64)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or resume the countdown from its current remaining time.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.last_run += 1;
                self.active_run = Some(self.last_run);
                self.state = TimerState::Running;
                debug!(
                    run_id = self.last_run,
                    remaining_secs = self.remaining_secs,
                    "timer running"
                );
                Some(Event::TimerStarted {
                    run_id: self.last_run,
                    duration_secs: self.duration_secs,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or waiting for dismissal.
            TimerState::Running | TimerState::Completed => None,
        }
    }

    /// Start with an explicit duration.
    ///
    /// The same duration resumes a paused countdown. A different duration
    /// reconfigures an idle timer before starting it.
    pub fn start_with(&mut self, duration_secs: u32) -> Result<Option<Event>, ValidationError> {
        if duration_secs == 0 {
            return Err(ValidationError::InvalidDuration(duration_secs));
        }
        if self.state == TimerState::Idle && duration_secs != self.duration_secs {
            self.duration_secs = duration_secs;
            self.remaining_secs = duration_secs;
        }
        Ok(self.start())
    }

    /// Stop delivering ticks, keeping the remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Idle;
                self.active_run = None;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Advance by one second. Returns `Some(Event::TimerCompleted)` on the
    /// tick that reaches zero, and nothing on any other tick.
    pub fn tick(&mut self, run_id: RunId) -> Option<Event> {
        if self.state != TimerState::Running || self.active_run != Some(run_id) {
            debug!(run_id, active_run = ?self.active_run, "dropping stale tick");
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = TimerState::Completed;
        self.active_run = None;
        Some(Event::TimerCompleted {
            run_id,
            duration_secs: self.duration_secs,
            at: Utc::now(),
        })
    }

    /// Cancel from `Running` or `Completed`, resetting to the full duration.
    pub fn dismiss(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running | TimerState::Completed => {
                self.state = TimerState::Idle;
                self.active_run = None;
                self.remaining_secs = self.duration_secs;
                Some(Event::TimerDismissed {
                    duration_secs: self.duration_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut NudgeTimer, n: u32) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..n {
            if let Some(run) = timer.run_id() {
                events.extend(timer.tick(run));
            }
        }
        events
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert_eq!(
            NudgeTimer::new(0).unwrap_err(),
            ValidationError::InvalidDuration(0)
        );
    }

    #[test]
    fn full_countdown_completes_once() {
        let mut timer = NudgeTimer::new(300).unwrap();
        assert!(timer.start().is_some());
        let events = run_ticks(&mut timer, 300);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::TimerCompleted { duration_secs: 300, .. }));
        assert_eq!(timer.state(), TimerState::Completed);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn extra_ticks_after_completion_are_ignored() {
        let mut timer = NudgeTimer::new(3).unwrap();
        timer.start();
        let run = timer.run_id().unwrap();
        let completions = (0..10).filter_map(|_| timer.tick(run)).count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn dismiss_from_completed_resets_duration() {
        let mut timer = NudgeTimer::new(300).unwrap();
        timer.start();
        run_ticks(&mut timer, 300);
        assert!(timer.dismiss().is_some());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn pause_then_start_resumes() {
        let mut timer = NudgeTimer::new(300).unwrap();
        timer.start();
        run_ticks(&mut timer, 10);
        assert!(timer.pause().is_some());
        assert!(timer.is_paused());
        let event = timer.start_with(300).unwrap();
        assert!(matches!(event, Some(Event::TimerStarted { remaining_secs: 290, .. })));
        assert_eq!(timer.remaining_secs(), 290);
    }

    #[test]
    fn pause_does_not_emit_completion() {
        let mut timer = NudgeTimer::new(2).unwrap();
        timer.start();
        run_ticks(&mut timer, 1);
        assert!(matches!(timer.pause(), Some(Event::TimerPaused { remaining_secs: 1, .. })));
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn tick_after_dismiss_is_dropped() {
        let mut timer = NudgeTimer::new(60).unwrap();
        timer.start();
        let pending = timer.run_id().unwrap();
        timer.tick(pending);
        timer.dismiss();
        assert!(timer.tick(pending).is_none());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn tick_from_earlier_run_is_dropped_after_restart() {
        let mut timer = NudgeTimer::new(60).unwrap();
        timer.start();
        let old = timer.run_id().unwrap();
        timer.pause();
        timer.start();
        let current = timer.run_id().unwrap();
        assert_ne!(old, current);
        assert!(timer.tick(old).is_none());
        assert_eq!(timer.remaining_secs(), 60);
        timer.tick(current);
        assert_eq!(timer.remaining_secs(), 59);
    }

    #[test]
    fn start_with_new_duration_reconfigures_idle_timer() {
        let mut timer = NudgeTimer::new(300).unwrap();
        timer.start_with(900).unwrap();
        assert_eq!(timer.duration_secs(), 900);
        assert_eq!(timer.remaining_secs(), 900);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut timer = NudgeTimer::new(300).unwrap();
        timer.start();
        let run = timer.run_id();
        assert!(timer.start_with(60).unwrap().is_none());
        assert_eq!(timer.duration_secs(), 300);
        assert_eq!(timer.run_id(), run);
    }

    #[test]
    fn dismiss_from_idle_is_noop() {
        let mut timer = NudgeTimer::new(300).unwrap();
        assert!(timer.dismiss().is_none());
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut timer = NudgeTimer::new(4).unwrap();
        assert_eq!(timer.progress(), 0.0);
        timer.start();
        run_ticks(&mut timer, 1);
        assert!((timer.progress() - 0.25).abs() < f64::EPSILON);
    }
}
