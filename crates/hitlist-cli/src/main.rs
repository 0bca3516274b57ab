use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hitlist", version, about = "Hitlist monthly habit tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management and day toggles
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Month overview and carrying habits into a new month
    Month {
        #[command(subcommand)]
        action: commands::month::MonthAction,
    },
    /// Monthly statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Run the streak engine on ad-hoc input
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr, filtered by `HITLIST_LOG` or `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("HITLIST_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Month { action } => commands::month::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
