//! Pace-of-day early signs for the bipolar track.
//!
//! The user toggles signals they notice today. Signals are not scored; the
//! track only surfaces how many are active. They reset when the day rolls
//! over.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceSignal {
    HighEnergy,
    RapidThoughts,
    LessSleep,
    Impulsive,
}

impl PaceSignal {
    pub const ALL: [PaceSignal; 4] = [
        PaceSignal::HighEnergy,
        PaceSignal::RapidThoughts,
        PaceSignal::LessSleep,
        PaceSignal::Impulsive,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaceSignals(BTreeSet<PaceSignal>);

impl PaceSignals {
    /// Flip a signal. Returns whether it is active afterwards.
    pub fn toggle(&mut self, signal: PaceSignal) -> bool {
        if self.0.remove(&signal) {
            false
        } else {
            self.0.insert(signal);
            true
        }
    }

    pub fn is_active(&self, signal: PaceSignal) -> bool {
        self.0.contains(&signal)
    }

    pub fn activated_count(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_counts() {
        let mut signals = PaceSignals::default();
        assert!(signals.toggle(PaceSignal::LessSleep));
        assert!(signals.toggle(PaceSignal::Impulsive));
        assert_eq!(signals.activated_count(), 2);
        assert!(!signals.toggle(PaceSignal::LessSleep));
        assert!(!signals.is_active(PaceSignal::LessSleep));
        assert_eq!(signals.activated_count(), 1);
    }

    #[test]
    fn serializes_as_a_list() {
        let mut signals = PaceSignals::default();
        signals.toggle(PaceSignal::RapidThoughts);
        assert_eq!(
            serde_json::to_value(&signals).unwrap(),
            serde_json::json!(["rapid_thoughts"])
        );
    }
}
