pub mod config;

pub use config::{Config, LoggingConfig, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

/// Returns `~/.config/rhythm[-dev]/` based on RHYTHM_ENV.
///
/// Set RHYTHM_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RHYTHM_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rhythm-dev")
    } else {
        base_dir.join("rhythm")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
