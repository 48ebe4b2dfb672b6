use clap::{Parser, Subcommand};
use rhythm_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rhythm-cli", version, about = "Rhythm CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay scripted sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Evaluate a single check-in
    Checkin(commands::checkin::CheckinArgs),
    /// Show the content track for an onboarding focus
    Track {
        /// Focus chosen at onboarding (general, seasonal, postpartum, bipolar)
        focus: String,
    },
    /// Nudge and light-therapy countdowns
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_logging(&config);

    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action, &config),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::Track { focus } => commands::track::run(&focus),
        Commands::Timer { action } => commands::timer::run(action, &config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
