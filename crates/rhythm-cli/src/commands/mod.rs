pub mod checkin;
pub mod config;
pub mod session;
pub mod timer;
pub mod track;

use rhythm_core::{Event, Outbox, SinkResult};

/// Sink that prints each event as one JSON line on stdout.
pub fn print_event(event: &Event, _outbox: &mut Outbox) -> SinkResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
