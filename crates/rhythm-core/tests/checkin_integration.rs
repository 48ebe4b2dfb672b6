//! Integration tests for check-in evaluation.

use proptest::prelude::*;
use rhythm_core::{evaluate, AlignmentScore, AlignmentStatus, CheckInSample, ValidationError};

#[test]
fn documented_examples() {
    let score = AlignmentScore::new(60);
    let cases = [(4, 30, true), (2, 30, false), (4, 50, false), (3, 40, false), (5, 0, true)];
    for (mood, energy, dissonant) in cases {
        let sample = CheckInSample::try_new(mood, energy, 50, None).unwrap();
        assert_eq!(evaluate(&sample, score).dissonant, dissonant, "mood {mood} energy {energy}");
    }
}

#[test]
fn invalid_sample_reports_first_bad_field() {
    let err = CheckInSample::try_new(0, 200, 50, None).unwrap_err();
    assert_eq!(
        err,
        ValidationError::InvalidSample {
            field: "mood",
            value: 0,
            min: 1,
            max: 5,
        }
    );
}

proptest! {
    #[test]
    fn banding_is_total_and_monotonic(a in 0i64..=100, b in 0i64..=100) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |s: AlignmentStatus| match s {
            AlignmentStatus::Drifting => 0,
            AlignmentStatus::Ok => 1,
            AlignmentStatus::Good => 2,
        };
        prop_assert!(rank(AlignmentScore::new(lo).status()) <= rank(AlignmentScore::new(hi).status()));
    }

    #[test]
    fn clamped_samples_are_always_in_range(
        mood in -100i64..100,
        energy in -500i64..500,
        honesty in -500i64..500,
    ) {
        let sample = CheckInSample::clamped(mood, energy, honesty, None);
        prop_assert!((1..=5).contains(&sample.mood()));
        prop_assert!(sample.energy() <= 100);
        prop_assert!(sample.energy_honesty() <= 100);
        prop_assert!(CheckInSample::try_new(
            sample.mood() as i64,
            sample.energy() as i64,
            sample.energy_honesty() as i64,
            None,
        ).is_ok());
    }

    #[test]
    fn dissonance_matches_rule(mood in 1i64..=5, energy in 0i64..=100, score in 0i64..=100) {
        let sample = CheckInSample::try_new(mood, energy, 50, None).unwrap();
        let result = evaluate(&sample, AlignmentScore::new(score));
        prop_assert_eq!(result.dissonant, mood >= 3 && energy < 40);
    }
}
