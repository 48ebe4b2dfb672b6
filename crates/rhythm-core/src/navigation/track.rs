use serde::{Deserialize, Serialize};

use super::screen::OnboardingFocus;

/// Specialized content branch shown in place of the generic actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentTrack {
    /// Seasonal prehab: light therapy, dawn simulation.
    Seasonal,
    Postpartum,
    /// Early-sign monitoring.
    Bipolar,
}

/// Map an onboarding focus to its content track.
///
/// `General` and `None` have no track; the tiny-wins catalog is shown.
pub fn resolve(focus: OnboardingFocus) -> Option<ContentTrack> {
    match focus {
        OnboardingFocus::Seasonal => Some(ContentTrack::Seasonal),
        OnboardingFocus::Postpartum => Some(ContentTrack::Postpartum),
        OnboardingFocus::Bipolar => Some(ContentTrack::Bipolar),
        OnboardingFocus::General | OnboardingFocus::None => None,
    }
}
