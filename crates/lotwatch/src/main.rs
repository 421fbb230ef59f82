//! CLI entry point for lotwatch.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use lotwatch_app::{AppConfig, MockLotSource, ParkingService, Theme, default_config_path};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt::format::FmtSpan};

mod commands;
mod config;
mod tui;

/// Campus parking occupancy at a glance.
#[derive(Parser, Debug)]
#[command(
    name = "lotwatch",
    version,
    about = "lotwatch: campus parking availability with tiered occupancy"
)]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every lot with its availability tier.
    Lots {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Current status and predictions for one lot.
    Show {
        #[arg(long)]
        lot: String,
        #[arg(long)]
        json: bool,
    },

    /// Today's hourly usage for one lot.
    History {
        #[arg(long)]
        lot: String,
        #[arg(long)]
        json: bool,
    },

    /// Upcoming campus events and their parking impact.
    Events {
        #[arg(long)]
        json: bool,
    },

    /// Launch interactive terminal UI.
    Tui {
        /// Start with this theme instead of the configured one.
        #[arg(long)]
        theme: Option<Theme>,
    },

    /// Write a commented default configuration file.
    InitConfig {
        /// Destination (defaults to the configuration path).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let Cli { config, cmd } = Cli::parse();

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    execute_command(config, cmd)
}

fn execute_command(config_path: Option<PathBuf>, command: Command) -> Result<()> {
    if let Command::InitConfig { output, force } = command {
        let target = output
            .or(config_path)
            .or_else(default_config_path)
            .ok_or_else(|| anyhow!("could not determine the configuration directory"))?;
        return config::init_config(&target, force);
    }

    let app_config = AppConfig::load(config_path.as_deref())?;
    let service = ParkingService::with_thresholds(
        MockLotSource::default(),
        app_config.thresholds,
        app_config.event_thresholds,
    );

    match command {
        Command::Tui { theme } => {
            let keybindings_path = config_path.or_else(default_config_path);
            tui::run(service, &app_config, theme, keybindings_path.as_deref())
        }
        other => commands::run(other, &service, &mut std::io::stdout().lock()),
    }
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui { .. })
}

/// Parse `RUST_LOG`-style directives; anything left unset logs at INFO.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn install_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = log_filter(&directives);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
