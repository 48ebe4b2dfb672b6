use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkin::CheckInResult;
use crate::timer::RunId;

/// Every outbound notification produced by the core.
///
/// Events are fire-and-forget: presentation and telemetry collaborators
/// consume them, nothing acknowledges them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// One-time greeting after consent is granted.
    Welcome {
        at: DateTime<Utc>,
    },
    CheckInCompleted {
        result: CheckInResult,
        at: DateTime<Utc>,
    },
    /// Emitted on every completion tap, even for an action already
    /// recorded today.
    TinyWinCompleted {
        action_id: String,
        newly_recorded: bool,
        daily_count: usize,
        at: DateTime<Utc>,
    },
    TimerStarted {
        run_id: RunId,
        duration_secs: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerCompleted {
        run_id: RunId,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerDismissed {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Stable snake_case name, used for log fields and CLI filtering.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Welcome { .. } => "welcome",
            Event::CheckInCompleted { .. } => "check_in_completed",
            Event::TinyWinCompleted { .. } => "tiny_win_completed",
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerCompleted { .. } => "timer_completed",
            Event::TimerDismissed { .. } => "timer_dismissed",
        }
    }
}
