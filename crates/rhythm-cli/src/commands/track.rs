use rhythm_core::navigation;
use rhythm_core::OnboardingFocus;

pub fn run(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let focus = OnboardingFocus::parse(raw);
    let output = serde_json::json!({
        "focus": focus,
        "track": navigation::resolve(focus),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
