//! Session and navigation state machine.
//!
//! ```text
//! Onboarding -> Consent -> Home <-> {Actions, Report, Support, Settings}
//! ```
//!
//! The session owns everything that lives for one app run: the navigation
//! state, today's tiny wins and pace signals, the active nudge timer and the
//! last check-in.
//! [`Session::handle`] applies one command and returns the events it
//! produced. Commands that have no defined effect in the current state are
//! logged and ignored; nothing here fails the session.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cards::HomeCards;
use super::screen::{ActionsContent, Modal, OnboardingFocus, Screen, Tab, View};
use super::track::{self, ContentTrack};
use crate::checkin::{self, AlignmentScore, CheckInInput, CheckInResult};
use crate::dispatch::Command;
use crate::error::{CoreError, TransitionError};
use crate::events::Event;
use crate::pace::{PaceSignal, PaceSignals};
use crate::tiny_wins::TinyWinTracker;
use crate::timer::{NudgeTimer, RunId, TimerState};

/// Navigation state. `has_onboarded` is true exactly when the screen is
/// past onboarding and consent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub screen: Screen,
    pub has_onboarded: bool,
    pub focus: OnboardingFocus,
    pub active_modal: Option<Modal>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            screen: Screen::Onboarding,
            has_onboarded: false,
            focus: OnboardingFocus::None,
            active_modal: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    tiny_wins: TinyWinTracker,
    timer: Option<NudgeTimer>,
    /// Tiny win credited when the current run completes.
    timer_reward: Option<String>,
    /// Screen the current run was started from.
    timer_origin: Option<Screen>,
    /// The home nudge was finished or dismissed today.
    nudge_closed: bool,
    pace: PaceSignals,
    last_check_in: Option<CheckInResult>,
}

impl Session {
    /// Fresh session on the onboarding screen.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: SessionState::default(),
            tiny_wins: TinyWinTracker::new(today),
            timer: None,
            timer_reward: None,
            timer_origin: None,
            nudge_closed: false,
            pace: PaceSignals::default(),
            last_check_in: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn has_onboarded(&self) -> bool {
        self.state.has_onboarded
    }

    pub fn focus(&self) -> OnboardingFocus {
        self.state.focus
    }

    pub fn active_modal(&self) -> Option<Modal> {
        self.state.active_modal
    }

    pub fn content_track(&self) -> Option<ContentTrack> {
        track::resolve(self.state.focus)
    }

    pub fn tiny_wins(&self) -> &TinyWinTracker {
        &self.tiny_wins
    }

    pub fn timer(&self) -> Option<&NudgeTimer> {
        self.timer.as_ref()
    }

    /// Run id a scheduled tick should carry, if a timer is running.
    pub fn timer_run(&self) -> Option<RunId> {
        self.timer.as_ref().and_then(NudgeTimer::run_id)
    }

    pub fn last_check_in(&self) -> Option<&CheckInResult> {
        self.last_check_in.as_ref()
    }

    pub fn pace_signals(&self) -> &PaceSignals {
        &self.pace
    }

    /// Which contextual home cards to show at local `hour`.
    pub fn home_cards(&self, hour: u32) -> HomeCards {
        let dissonant = self.last_check_in.is_some_and(|r| r.dissonant);
        HomeCards::at(hour, self.nudge_closed, dissonant)
    }

    /// The view to render, with the actions branch resolved against the
    /// onboarding focus.
    pub fn active_view(&self) -> View {
        match self.state.screen {
            Screen::Onboarding => View::Onboarding,
            Screen::Consent => View::Consent,
            Screen::Home => View::Home,
            Screen::Actions => View::Actions(match self.content_track() {
                Some(track) => ActionsContent::Specialized(track),
                None => ActionsContent::TinyWinCatalog,
            }),
            Screen::Report => View::Report,
            Screen::Support => View::Support,
            Screen::Settings => View::Settings,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            view: self.active_view(),
            today: self.tiny_wins.today(),
            daily_count: self.tiny_wins.daily_count(),
            streak_days: self.tiny_wins.streak_days(),
            timer: self.timer.as_ref().map(|t| TimerSnapshot {
                state: t.state(),
                remaining_secs: t.remaining_secs(),
                duration_secs: t.duration_secs(),
            }),
            pace_signals: self.pace.clone(),
            last_check_in: self.last_check_in,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one command to completion and return the events it produced.
    pub fn handle(&mut self, command: Command) -> Vec<Event> {
        let name = command.name();
        match self.apply(command) {
            Ok(events) => {
                debug!(command = name, screen = %self.state.screen, events = events.len(), "command applied");
                events
            }
            Err(err) => {
                warn!(command = name, %err, "ignoring command");
                Vec::new()
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Vec<Event>, CoreError> {
        let events = match command {
            Command::CompleteOnboarding { focus } => self.complete_onboarding(focus)?,
            Command::CompleteConsent => self.complete_consent()?,
            Command::SelectTab { tab } => self.select_tab(tab)?,
            Command::OpenModal { modal } => self.open_modal(modal),
            Command::CloseModal => self.close_modal()?,
            Command::SubmitCheckIn {
                sample,
                alignment_score,
            } => self.submit_check_in(sample, alignment_score),
            Command::RecordTinyWin { action_id } => self.record_tiny_win(&action_id),
            Command::StartTimer {
                duration_secs,
                action_id,
            } => self.start_timer(duration_secs, action_id)?,
            Command::PauseTimer => self.timer_mut().and_then(NudgeTimer::pause).into_iter().collect(),
            Command::DismissTimer => self.dismiss_timer(),
            Command::Tick { run_id } => self.tick(run_id),
            Command::TogglePaceSignal { signal } => self.toggle_pace_signal(signal)?,
            Command::RollOverDay { date } => self.roll_over(date),
        };
        Ok(events)
    }

    fn complete_onboarding(&mut self, focus: OnboardingFocus) -> Result<Vec<Event>, TransitionError> {
        self.expect_screen(Screen::Onboarding, "complete_onboarding")?;
        self.state.focus = focus;
        self.state.screen = Screen::Consent;
        info!(?focus, "onboarding complete");
        Ok(Vec::new())
    }

    fn complete_consent(&mut self) -> Result<Vec<Event>, TransitionError> {
        self.expect_screen(Screen::Consent, "complete_consent")?;
        self.state.has_onboarded = true;
        self.state.screen = Screen::Home;
        info!("consent granted, entering home");
        Ok(vec![Event::Welcome { at: Utc::now() }])
    }

    fn select_tab(&mut self, tab: Tab) -> Result<Vec<Event>, TransitionError> {
        if !self.state.has_onboarded {
            return Err(self.invalid("select_tab"));
        }
        self.state.screen = tab.into();
        Ok(Vec::new())
    }

    /// Opening replaces whatever overlay is showing, so at most one is
    /// ever active.
    fn open_modal(&mut self, modal: Modal) -> Vec<Event> {
        if let Some(previous) = self.state.active_modal.replace(modal) {
            if previous != modal {
                debug!(?previous, ?modal, "modal replaced");
            }
        }
        Vec::new()
    }

    fn close_modal(&mut self) -> Result<Vec<Event>, TransitionError> {
        match self.state.active_modal.take() {
            Some(_) => Ok(Vec::new()),
            None => Err(self.invalid("close_modal")),
        }
    }

    fn submit_check_in(&mut self, input: CheckInInput, score: AlignmentScore) -> Vec<Event> {
        let sample = input.into_sample();
        let result = checkin::evaluate(&sample, score);
        if result.dissonant {
            info!(mood = sample.mood(), energy = sample.energy(), "check-in dissonance detected");
        }
        if self.state.active_modal == Some(Modal::CheckIn) {
            self.state.active_modal = None;
        }
        self.last_check_in = Some(result);
        vec![Event::CheckInCompleted {
            result,
            at: Utc::now(),
        }]
    }

    fn record_tiny_win(&mut self, action_id: &str) -> Vec<Event> {
        let newly_recorded = self.tiny_wins.record_completion(action_id);
        vec![Event::TinyWinCompleted {
            action_id: action_id.to_string(),
            newly_recorded,
            daily_count: self.tiny_wins.daily_count(),
            at: Utc::now(),
        }]
    }

    fn start_timer(
        &mut self,
        duration_secs: u32,
        action_id: Option<String>,
    ) -> Result<Vec<Event>, CoreError> {
        let event = match self.timer.as_mut() {
            Some(timer) => timer.start_with(duration_secs)?,
            None => {
                let mut timer = NudgeTimer::new(duration_secs)?;
                let event = timer.start();
                self.timer = Some(timer);
                event
            }
        };
        if event.is_some() {
            self.timer_reward = action_id;
            self.timer_origin = Some(self.state.screen);
        }
        Ok(event.into_iter().collect())
    }

    fn dismiss_timer(&mut self) -> Vec<Event> {
        let Some(event) = self.timer_mut().and_then(NudgeTimer::dismiss) else {
            return Vec::new();
        };
        self.timer_reward = None;
        self.close_run();
        vec![event]
    }

    fn tick(&mut self, run_id: Option<RunId>) -> Vec<Event> {
        let Some(timer) = self.timer.as_mut() else {
            return Vec::new();
        };
        // An unaddressed tick targets whatever run is active right now.
        let Some(event) = run_id.or_else(|| timer.run_id()).and_then(|run| timer.tick(run)) else {
            return Vec::new();
        };
        let mut events = vec![event];
        if matches!(events[0], Event::TimerCompleted { .. }) {
            if let Some(action_id) = self.timer_reward.take() {
                info!(%action_id, "timer completion counted as a tiny win");
                events.extend(self.record_tiny_win(&action_id));
            }
            self.close_run();
        }
        events
    }

    /// A run started from home is the midday nudge; ending it hides the card.
    fn close_run(&mut self) {
        if self.timer_origin.take() == Some(Screen::Home) {
            self.nudge_closed = true;
        }
    }

    fn toggle_pace_signal(&mut self, signal: PaceSignal) -> Result<Vec<Event>, TransitionError> {
        if !self.state.has_onboarded {
            return Err(self.invalid("toggle_pace_signal"));
        }
        let active = self.pace.toggle(signal);
        debug!(?signal, active, count = self.pace.activated_count(), "pace signal toggled");
        Ok(Vec::new())
    }

    fn roll_over(&mut self, date: NaiveDate) -> Vec<Event> {
        if date > self.tiny_wins.today() {
            self.pace.clear();
            self.nudge_closed = false;
        }
        self.tiny_wins.roll_over(date);
        Vec::new()
    }

    fn timer_mut(&mut self) -> Option<&mut NudgeTimer> {
        self.timer.as_mut()
    }

    fn expect_screen(&self, screen: Screen, command: &'static str) -> Result<(), TransitionError> {
        if self.state.screen == screen {
            Ok(())
        } else {
            Err(self.invalid(command))
        }
    }

    fn invalid(&self, command: &'static str) -> TransitionError {
        TransitionError::InvalidTransition {
            command,
            screen: self.state.screen,
        }
    }
}

/// Serializable view of the whole session, for display and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub view: View,
    pub today: NaiveDate,
    pub daily_count: usize,
    pub streak_days: u32,
    pub timer: Option<TimerSnapshot>,
    pub pace_signals: PaceSignals,
    pub last_check_in: Option<CheckInResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_secs: u32,
    pub duration_secs: u32,
}
