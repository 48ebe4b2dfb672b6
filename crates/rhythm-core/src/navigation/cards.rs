//! Time-of-day visibility for the contextual cards on the home screen.
//!
//! The midday nudge is offered between noon and five, until the user either
//! finishes or dismisses it. The dissonance reminder shows from five in the
//! evening when the latest check-in was dissonant.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Local hours during which the outdoor nudge is offered.
pub const NUDGE_WINDOW: Range<u32> = 12..17;
/// First local hour counted as evening.
pub const EVENING_FROM: u32 = 17;

pub fn is_nudge_window(hour: u32) -> bool {
    NUDGE_WINDOW.contains(&hour)
}

pub fn is_evening(hour: u32) -> bool {
    (EVENING_FROM..24).contains(&hour)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCards {
    pub nudge: bool,
    pub dissonance: bool,
}

impl HomeCards {
    /// Card visibility at a local `hour` (0-23). Hours past 23 show nothing.
    pub fn at(hour: u32, nudge_closed: bool, dissonant_check_in: bool) -> Self {
        Self {
            nudge: is_nudge_window(hour) && !nudge_closed,
            dissonance: is_evening(hour) && dissonant_check_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_window_bounds() {
        assert!(!is_nudge_window(11));
        assert!(is_nudge_window(12));
        assert!(is_nudge_window(16));
        assert!(!is_nudge_window(17));
    }

    #[test]
    fn evening_starts_at_five() {
        assert!(!is_evening(16));
        assert!(is_evening(17));
        assert!(is_evening(23));
        assert!(!is_evening(24));
    }

    #[test]
    fn closed_nudge_stays_hidden() {
        assert!(HomeCards::at(14, false, false).nudge);
        assert!(!HomeCards::at(14, true, false).nudge);
    }

    #[test]
    fn dissonance_card_needs_evening_and_dissonant_check_in() {
        assert!(HomeCards::at(19, false, true).dissonance);
        assert!(!HomeCards::at(19, false, false).dissonance);
        assert!(!HomeCards::at(9, false, true).dissonance);
    }

    #[test]
    fn nudge_and_dissonance_never_overlap() {
        for hour in 0..24 {
            let cards = HomeCards::at(hour, false, true);
            assert!(!(cards.nudge && cards.dissonance), "hour {hour}");
        }
    }
}
