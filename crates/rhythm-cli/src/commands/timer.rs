use std::time::Duration;

use chrono::Utc;
use clap::{Subcommand, ValueEnum};
use rhythm_core::{Command, Config, Dispatcher, Session, TimerPreset};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Nudge,
    LightTherapy,
    Breathing,
}

impl From<PresetArg> for TimerPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Nudge => TimerPreset::Nudge,
            PresetArg::LightTherapy => TimerPreset::LightTherapy,
            PresetArg::Breathing => TimerPreset::Breathing,
        }
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the foreground, printing events as JSON lines
    Run {
        /// Named preset (lengths come from the [timer] config section)
        #[arg(long, value_enum, default_value = "nudge")]
        preset: PresetArg,
        /// Explicit length in seconds, overriding the preset
        #[arg(long)]
        secs: Option<u32>,
        /// Dismiss the timer after this many ticks
        #[arg(long)]
        dismiss_after: Option<u32>,
        /// Tick interval in milliseconds
        #[arg(long, default_value = "1000", hide = true)]
        tick_ms: u64,
    },
}

pub fn run(action: TimerAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            preset,
            secs,
            dismiss_after,
            tick_ms,
        } => {
            let preset = match secs {
                Some(secs) => TimerPreset::Custom(secs),
                None => preset.into(),
            };
            let duration_secs = preset.duration_secs(&config.timer);
            if duration_secs == 0 {
                return Err("timer length must be at least one second".into());
            }

            info!(preset = preset.label(), duration_secs, "starting countdown");

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(countdown(
                config,
                preset,
                duration_secs,
                dismiss_after,
                Duration::from_millis(tick_ms.max(1)),
            ));
        }
    }
    Ok(())
}

/// Drive one timer run from a periodic tick source.
///
/// Each tick is addressed to the run that was active when it was scheduled,
/// so a dismissal between scheduling and delivery wins. Completing a named
/// preset records its tiny win.
async fn countdown(
    config: &Config,
    preset: TimerPreset,
    duration_secs: u32,
    dismiss_after: Option<u32>,
    period: Duration,
) {
    let mut dispatcher = Dispatcher::new(Session::new(Utc::now().date_naive()));
    if config.notifications.enabled {
        dispatcher.add_sink(super::print_event);
    }
    dispatcher.dispatch(Command::StartTimer {
        duration_secs,
        action_id: preset.tiny_win_id().map(String::from),
    });

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    let mut ticks = 0u32;
    while let Some(run_id) = dispatcher.session().timer_run() {
        interval.tick().await;
        if dismiss_after.is_some_and(|limit| ticks >= limit) {
            dispatcher.dispatch_all([Command::DismissTimer, Command::Tick { run_id: Some(run_id) }]);
            break;
        }
        dispatcher.dispatch(Command::Tick {
            run_id: Some(run_id),
        });
        ticks += 1;
        debug!(ticks, "tick delivered");
    }

    if let Some(timer) = dispatcher.session().timer() {
        debug!(state = ?timer.state(), remaining = timer.remaining_secs(), "countdown finished");
    }
}
