//! Single-threaded command dispatch.
//!
//! Presentation code never mutates the [`Session`] directly. It submits
//! [`Command`]s to a [`Dispatcher`], which applies them one at a time in FIFO
//! order and hands each resulting [`Event`] to the registered sinks.
//!
//! Sinks may react by queueing follow-up commands through the [`Outbox`]
//! they receive. Those commands run after the current one has fully
//! completed, never from inside it. A failing sink is logged and skipped;
//! it never blocks or undoes a transition.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::checkin::{AlignmentScore, CheckInInput};
use crate::events::Event;
use crate::navigation::{Modal, OnboardingFocus, Session, Tab};
use crate::pace::PaceSignal;
use crate::timer::RunId;

/// Inbound commands accepted by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    CompleteOnboarding {
        #[serde(default)]
        focus: OnboardingFocus,
    },
    CompleteConsent,
    SelectTab {
        tab: Tab,
    },
    OpenModal {
        modal: Modal,
    },
    CloseModal,
    SubmitCheckIn {
        sample: CheckInInput,
        alignment_score: AlignmentScore,
    },
    RecordTinyWin {
        action_id: String,
    },
    /// Start or resume the timer. `action_id` is credited as a tiny win
    /// when the run completes.
    StartTimer {
        duration_secs: u32,
        #[serde(default)]
        action_id: Option<String>,
    },
    PauseTimer,
    DismissTimer,
    /// One second elapsed. Scheduled ticks name the run they were
    /// scheduled for and are dropped once that run is paused or dismissed.
    ///
    /// `None` targets whichever run is active when the tick is applied, so an
    /// unaddressed tick queued before a pause and restart counts against the
    /// new run. Tick sources that can race a cancel must address their ticks.
    Tick {
        #[serde(default)]
        run_id: Option<RunId>,
    },
    TogglePaceSignal {
        signal: PaceSignal,
    },
    /// The calendar day changed.
    RollOverDay {
        date: NaiveDate,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CompleteOnboarding { .. } => "complete_onboarding",
            Command::CompleteConsent => "complete_consent",
            Command::SelectTab { .. } => "select_tab",
            Command::OpenModal { .. } => "open_modal",
            Command::CloseModal => "close_modal",
            Command::SubmitCheckIn { .. } => "submit_check_in",
            Command::RecordTinyWin { .. } => "record_tiny_win",
            Command::StartTimer { .. } => "start_timer",
            Command::PauseTimer => "pause_timer",
            Command::DismissTimer => "dismiss_timer",
            Command::Tick { .. } => "tick",
            Command::TogglePaceSignal { .. } => "toggle_pace_signal",
            Command::RollOverDay { .. } => "roll_over_day",
        }
    }
}

/// Follow-up commands queued by a sink while handling an event.
#[derive(Debug, Default)]
pub struct Outbox {
    commands: Vec<Command>,
}

impl Outbox {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

pub type SinkResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Consumer of outbound events (toasts, telemetry, a terminal printer).
pub trait NotificationSink {
    fn name(&self) -> &str {
        "sink"
    }

    fn notify(&mut self, event: &Event, outbox: &mut Outbox) -> SinkResult;
}

impl<F> NotificationSink for F
where
    F: FnMut(&Event, &mut Outbox) -> SinkResult,
{
    fn notify(&mut self, event: &Event, outbox: &mut Outbox) -> SinkResult {
        self(event, outbox)
    }
}

pub struct Dispatcher {
    session: Session,
    queue: VecDeque<Command>,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Dispatcher {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            queue: VecDeque::new(),
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn add_sink(&mut self, sink: impl NotificationSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Queue a command and drain the queue. Returns every event emitted
    /// while draining, including those of sink follow-ups.
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        self.queue.push_back(command);
        self.drain()
    }

    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
        self.queue.extend(commands);
        self.drain()
    }

    fn drain(&mut self) -> Vec<Event> {
        let mut emitted = Vec::new();
        while let Some(command) = self.queue.pop_front() {
            trace!(command = command.name(), queued = self.queue.len(), "dispatching");
            let events = self.session.handle(command);
            let mut outbox = Outbox::default();
            for event in &events {
                self.notify_sinks(event, &mut outbox);
            }
            self.queue.extend(outbox.commands);
            emitted.extend(events);
        }
        emitted
    }

    fn notify_sinks(&mut self, event: &Event, outbox: &mut Outbox) {
        for sink in &mut self.sinks {
            if let Err(err) = sink.notify(event, outbox) {
                warn!(sink = sink.name(), event = event.kind(), %err, "notification sink failed");
            }
        }
    }
}
