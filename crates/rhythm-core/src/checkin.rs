//! Check-in evaluation.
//!
//! A check-in is a mood/energy self-report. Evaluating it derives two
//! independent signals:
//!
//! - **Dissonance**: the user reports a "fine" mood while their energy is low.
//! - **Alignment status**: a band over the rolling alignment score supplied
//!   by the score aggregator.
//!
//! Both are fixed heuristics, not clinical inference.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 5;
pub const PERCENT_MAX: u8 = 100;

/// Mood at or above this reads as "I'm fine".
pub const DISSONANCE_MOOD_FLOOR: u8 = 3;
/// Energy strictly below this reads as low.
pub const DISSONANCE_ENERGY_CEILING: u8 = 40;

pub const ALIGNMENT_GOOD_FLOOR: u8 = 70;
pub const ALIGNMENT_OK_FLOOR: u8 = 40;

/// A validated mood/energy self-report. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSample {
    mood: u8,
    energy: u8,
    energy_honesty: u8,
    notes: Option<String>,
}

impl CheckInSample {
    /// Strict constructor. Fails with `InvalidSample` naming the first
    /// out-of-range field.
    pub fn try_new(
        mood: i64,
        energy: i64,
        energy_honesty: i64,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mood = check_range("mood", mood, MOOD_MIN, MOOD_MAX)?;
        let energy = check_range("energy", energy, 0, PERCENT_MAX)?;
        let energy_honesty = check_range("energy_honesty", energy_honesty, 0, PERCENT_MAX)?;
        Ok(Self {
            mood,
            energy,
            energy_honesty,
            notes: normalize_notes(notes),
        })
    }

    /// Lenient constructor: out-of-range values are clamped to the nearest
    /// bound and logged. Never fails.
    pub fn clamped(mood: i64, energy: i64, energy_honesty: i64, notes: Option<String>) -> Self {
        Self {
            mood: clamp_field("mood", mood, MOOD_MIN, MOOD_MAX),
            energy: clamp_field("energy", energy, 0, PERCENT_MAX),
            energy_honesty: clamp_field("energy_honesty", energy_honesty, 0, PERCENT_MAX),
            notes: normalize_notes(notes),
        }
    }

    pub fn mood(&self) -> u8 {
        self.mood
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn energy_honesty(&self) -> u8 {
        self.energy_honesty
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_dissonant(&self) -> bool {
        self.mood >= DISSONANCE_MOOD_FLOOR && self.energy < DISSONANCE_ENERGY_CEILING
    }
}

/// Raw, unvalidated check-in as it arrives from a form or a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInInput {
    pub mood: i64,
    pub energy: i64,
    #[serde(default = "default_honesty")]
    pub energy_honesty: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_honesty() -> i64 {
    50
}

impl CheckInInput {
    pub fn into_sample(self) -> CheckInSample {
        CheckInSample::clamped(self.mood, self.energy, self.energy_honesty, self.notes)
    }
}

/// Rolling wellbeing score in [0, 100], produced outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct AlignmentScore(u8);

impl AlignmentScore {
    pub fn new(score: i64) -> Self {
        Self(score.clamp(0, PERCENT_MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn status(self) -> AlignmentStatus {
        if self.0 >= ALIGNMENT_GOOD_FLOOR {
            AlignmentStatus::Good
        } else if self.0 >= ALIGNMENT_OK_FLOOR {
            AlignmentStatus::Ok
        } else {
            AlignmentStatus::Drifting
        }
    }
}

impl From<i64> for AlignmentScore {
    fn from(score: i64) -> Self {
        Self::new(score)
    }
}

impl From<AlignmentScore> for u8 {
    fn from(score: AlignmentScore) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Good,
    Ok,
    Drifting,
}

impl AlignmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AlignmentStatus::Good => "Aligned",
            AlignmentStatus::Ok => "Slight drift",
            AlignmentStatus::Drifting => "Off rhythm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResult {
    pub dissonant: bool,
    pub alignment_status: AlignmentStatus,
    pub alignment_score: AlignmentScore,
}

/// Evaluate a sample against the current alignment score. Total and pure.
pub fn evaluate(sample: &CheckInSample, score: AlignmentScore) -> CheckInResult {
    CheckInResult {
        dissonant: sample.is_dissonant(),
        alignment_status: score.status(),
        alignment_score: score,
    }
}

fn check_range(field: &'static str, value: i64, min: u8, max: u8) -> Result<u8, ValidationError> {
    if value < min as i64 || value > max as i64 {
        return Err(ValidationError::InvalidSample {
            field,
            value,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(value as u8)
}

fn clamp_field(field: &'static str, value: i64, min: u8, max: u8) -> u8 {
    match check_range(field, value, min, max) {
        Ok(v) => v,
        Err(err) => {
            let clamped = value.clamp(min as i64, max as i64) as u8;
            warn!(%err, clamped, "clamping check-in field");
            clamped
        }
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
