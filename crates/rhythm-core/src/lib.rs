//! # Rhythm Core Library
//!
//! This library holds the logic behind the Rhythm wellbeing app. Screens,
//! styling and static content live in the presentation layer; the core
//! decides what is shown and reacts to what the user does.
//!
//! ## Architecture
//!
//! - **Session**: navigation state machine gating screens behind onboarding
//!   and consent, routing tabs and owning the modal overlay
//! - **Dispatcher**: single-threaded command queue feeding the session and
//!   fanning events out to notification sinks
//! - **Check-in**: dissonance detection and alignment banding
//! - **Tiny wins**: per-day completion set with streak tracking
//! - **Pace signals**: early-sign toggles for the bipolar track
//! - **Timer**: tick-driven countdown for nudges and light therapy
//!
//! ## Key Components
//!
//! - [`Session`]: the navigation state machine
//! - [`Dispatcher`]: command queue in front of the session
//! - [`NudgeTimer`]: countdown state machine
//! - [`Config`]: application configuration management

pub mod checkin;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod navigation;
pub mod pace;
pub mod storage;
pub mod timer;
pub mod tiny_wins;

pub use checkin::{evaluate, AlignmentScore, AlignmentStatus, CheckInInput, CheckInResult, CheckInSample};
pub use dispatch::{Command, Dispatcher, NotificationSink, Outbox, SinkResult};
pub use error::{ConfigError, CoreError, TransitionError, ValidationError};
pub use events::Event;
pub use navigation::{
    ActionsContent, ContentTrack, HomeCards, Modal, OnboardingFocus, Screen, Session, SessionSnapshot,
    SessionState, Tab, View,
};
pub use pace::{PaceSignal, PaceSignals};
pub use storage::Config;
pub use timer::{NudgeTimer, RunId, TimerPreset, TimerState};
pub use tiny_wins::{TinyWinRecord, TinyWinTracker};
