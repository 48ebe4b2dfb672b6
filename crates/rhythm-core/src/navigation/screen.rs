use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::track::ContentTrack;

/// Every top-level screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Onboarding,
    Consent,
    Home,
    Actions,
    Report,
    Support,
    Settings,
}

impl Screen {
    /// Screens shown before the user has finished onboarding.
    pub fn is_pre_onboarding(self) -> bool {
        matches!(self, Screen::Onboarding | Screen::Consent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Onboarding => "onboarding",
            Screen::Consent => "consent",
            Screen::Home => "home",
            Screen::Actions => "actions",
            Screen::Report => "report",
            Screen::Support => "support",
            Screen::Settings => "settings",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bottom navigation tabs. Onboarding and consent are not tabs, so they
/// can never be selected once the user is in the main app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Home,
    Actions,
    Report,
    Support,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Actions, Tab::Report, Tab::Support, Tab::Settings];
}

impl From<Tab> for Screen {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Home => Screen::Home,
            Tab::Actions => Screen::Actions,
            Tab::Report => Screen::Report,
            Tab::Support => Screen::Support,
            Tab::Settings => Screen::Settings,
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "actions" => Ok(Tab::Actions),
            "report" => Ok(Tab::Report),
            "support" => Ok(Tab::Support),
            "settings" => Ok(Tab::Settings),
            other => Err(format!("unknown tab: {other}")),
        }
    }
}

/// Overlays drawn above the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    CheckIn,
    /// Crisis resources sheet.
    Crisis,
}

/// What the user chose to focus on during onboarding.
///
/// Parsing never fails: anything unrecognized becomes `None`, so onboarding
/// always moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OnboardingFocus {
    General,
    Seasonal,
    Postpartum,
    Bipolar,
    #[default]
    None,
}

impl OnboardingFocus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "general" => OnboardingFocus::General,
            "seasonal" => OnboardingFocus::Seasonal,
            "postpartum" => OnboardingFocus::Postpartum,
            "bipolar" => OnboardingFocus::Bipolar,
            _ => OnboardingFocus::None,
        }
    }
}

impl From<String> for OnboardingFocus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for OnboardingFocus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// What the actions tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "track")]
pub enum ActionsContent {
    /// The generic tiny-wins catalog.
    TinyWinCatalog,
    Specialized(ContentTrack),
}

/// The screen to render, with the actions content branch already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "screen", content = "content")]
pub enum View {
    Onboarding,
    Consent,
    Home,
    Actions(ActionsContent),
    Report,
    Support,
    Settings,
}
