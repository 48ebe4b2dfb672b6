use std::io::Read;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, Timelike, Utc};
use clap::Subcommand;
use rhythm_core::{Command, Config, Dispatcher, Session};
use tracing::info;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Replay a JSON array of commands and print the events and final state
    Run {
        /// Script file, or "-" for stdin
        script: PathBuf,
        /// Calendar day the session starts on (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print events as they happen instead of only in the summary
        #[arg(long)]
        follow: bool,
        /// Local hour (0-23) used for home card visibility (defaults to now)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
        hour: Option<u32>,
    },
}

fn read_script(path: &PathBuf) -> Result<Vec<Command>, Box<dyn std::error::Error>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

pub fn run(action: SessionAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Run {
            script,
            date,
            follow,
            hour,
        } => {
            let commands = read_script(&script)?;
            let today = date.unwrap_or_else(|| Utc::now().date_naive());
            info!(commands = commands.len(), %today, "replaying session script");

            let mut dispatcher = Dispatcher::new(Session::new(today));
            if follow && config.notifications.enabled {
                dispatcher.add_sink(super::print_event);
            }
            let events = dispatcher.dispatch_all(commands);
            let hour = hour.unwrap_or_else(|| Local::now().hour());

            let summary = serde_json::json!({
                "events": events,
                "snapshot": dispatcher.session().snapshot(),
                "homeCards": dispatcher.session().home_cards(hour),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
