mod engine;
mod preset;

pub use engine::{NudgeTimer, RunId, TimerState};
pub use preset::TimerPreset;
