use clap::Subcommand;
use rhythm_core::{Config, TimerPreset};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "timer.nudge_secs", "logging.level")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show timer presets with their configured lengths and tiny wins
    Presets,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Presets => {
            let config = Config::load()?;
            for preset in [TimerPreset::Nudge, TimerPreset::LightTherapy, TimerPreset::Breathing] {
                let line = serde_json::json!({
                    "preset": preset.label(),
                    "secs": preset.duration_secs(&config.timer),
                    "tinyWin": preset.tiny_win_id(),
                });
                println!("{line}");
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
