use clap::Args;
use rhythm_core::{evaluate, AlignmentScore, CheckInSample};

#[derive(Args)]
pub struct CheckinArgs {
    /// Mood from 1 (low) to 5 (great)
    #[arg(long, allow_negative_numbers = true)]
    mood: i64,
    /// Energy level, 0-100
    #[arg(long, allow_negative_numbers = true)]
    energy: i64,
    /// How genuine the energy feels, 0-100
    #[arg(long, default_value = "50", allow_negative_numbers = true)]
    honesty: i64,
    /// One honest line
    #[arg(long)]
    notes: Option<String>,
    /// Rolling alignment score, 0-100
    #[arg(long, allow_negative_numbers = true)]
    score: i64,
    /// Reject out-of-range values instead of clamping them
    #[arg(long)]
    strict: bool,
}

pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let sample = if args.strict {
        CheckInSample::try_new(args.mood, args.energy, args.honesty, args.notes)?
    } else {
        CheckInSample::clamped(args.mood, args.energy, args.honesty, args.notes)
    };
    let result = evaluate(&sample, AlignmentScore::new(args.score));
    println!("{}", serde_json::to_string_pretty(&result)?);
    eprintln!(
        "alignment {}: {}",
        result.alignment_score.value(),
        result.alignment_status.label()
    );
    if result.dissonant {
        eprintln!("You selected 'I'm fine', but your energy looks low. Want a gentle check-in?");
    }
    Ok(())
}
