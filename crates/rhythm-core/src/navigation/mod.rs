pub mod cards;
mod screen;
mod session;
pub mod track;

pub use cards::HomeCards;
pub use screen::{ActionsContent, Modal, OnboardingFocus, Screen, Tab, View};
pub use session::{Session, SessionSnapshot, SessionState, TimerSnapshot};
pub use track::{resolve, ContentTrack};
