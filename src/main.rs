use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use altwatch::app::{self, AppCfg};
use altwatch::application::Cli;
use altwatch::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let mut config = Config::from_file(&cli.config)?;
    config.apply_env_overrides();

    app::run(AppCfg {
        config,
        command: cli.command,
        dry_run: cli.dry_run,
        once: cli.once,
    })
    .await
}
