//! CLI commands
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "altwatch")]
#[command(version, about = "altFINS price and signal monitor with Telegram alerts")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "Config.toml")]
    pub config: String,

    /// Log alerts instead of sending them to Telegram
    #[arg(long)]
    pub dry_run: bool,

    /// Run a single tick of each selected monitor, then exit
    #[arg(long)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Alert when the asset price moves more than the threshold
    Price,

    /// Alert on every new entry of the signals feed
    Signals,

    /// Run both monitors side by side
    All,
}

impl Commands {
    pub fn runs_price(&self) -> bool {
        matches!(self, Commands::Price | Commands::All)
    }

    pub fn runs_signals(&self) -> bool {
        matches!(self, Commands::Signals | Commands::All)
    }
}
