use serde::{Deserialize, Serialize};

use crate::storage::config::TimerConfig;

/// Named countdown lengths offered by the home and specialized screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "secs")]
pub enum TimerPreset {
    /// "Sunny window, 5 minutes outside" style nudge.
    Nudge,
    /// Morning light box session.
    LightTherapy,
    Breathing,
    Custom(u32),
}

impl TimerPreset {
    /// Resolve to seconds using the configured preset lengths.
    pub fn duration_secs(self, config: &TimerConfig) -> u32 {
        match self {
            TimerPreset::Nudge => config.nudge_secs,
            TimerPreset::LightTherapy => config.light_therapy_secs,
            TimerPreset::Breathing => config.breathing_secs,
            TimerPreset::Custom(secs) => secs,
        }
    }

    /// Tiny win credited when a run of this preset completes.
    pub fn tiny_win_id(self) -> Option<&'static str> {
        match self {
            TimerPreset::Nudge => Some("outdoor_break"),
            TimerPreset::LightTherapy => Some("light_therapy"),
            TimerPreset::Breathing => Some("breathe"),
            TimerPreset::Custom(_) => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerPreset::Nudge => "nudge",
            TimerPreset::LightTherapy => "light-therapy",
            TimerPreset::Breathing => "breathing",
            TimerPreset::Custom(_) => "custom",
        }
    }
}
