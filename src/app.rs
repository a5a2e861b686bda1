// src/app.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::application::{run_forever, run_tick, Commands, PriceJob, SignalJob};
use crate::config::Config;
use crate::domain::signal::Watermark;
use crate::infrastructure::altfins::{AltfinsClient, PriceFeed, SignalFeed};
use crate::infrastructure::telegram::{LogNotifier, Notifier, TelegramNotifier};

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
    pub command: Commands,
    pub dry_run: bool,
    pub once: bool,
}

fn build_notifier(cfg: &AppCfg) -> Result<Arc<dyn Notifier>> {
    if cfg.dry_run {
        info!("Dry-run mode - alerts are logged, not sent");
        return Ok(Arc::new(LogNotifier));
    }

    let telegram = &cfg.config.telegram;
    if let Some(username) = &telegram.username {
        info!("Sending alerts as @{}", username);
    }
    let notifier = TelegramNotifier::new(&telegram.api_base, &telegram.token, cfg.config.api.timeout())?;
    Ok(Arc::new(notifier))
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Starting altwatch: {:?}", app_cfg.command);

    let config = &app_cfg.config;
    config.validate(app_cfg.dry_run)?;

    let notifier = build_notifier(&app_cfg)?;
    let destination = if config.telegram.chat_id.is_empty() {
        "dry-run".to_string()
    } else {
        config.telegram.chat_id.clone()
    };
    let client = AltfinsClient::new(config.api.key.clone(), config.api.timeout())?;

    let price = if app_cfg.command.runs_price() {
        let price_cfg = config.price()?;
        info!(
            "✅ Price monitor: {:?}, threshold {}",
            price_cfg.symbols, price_cfg.threshold
        );
        let feed = PriceFeed::new(client.clone(), &config.api.price_url, price_cfg.request());
        let job = PriceJob::new(Arc::new(feed), notifier.clone(), destination.clone(), price_cfg.threshold);
        Some((job, price_cfg.schedule()))
    } else {
        None
    };

    let signals = if app_cfg.command.runs_signals() {
        let signals_cfg = config.signals()?;
        let watermark = Watermark::now();
        info!(
            "✅ Signal monitor: {:?}, reporting signals after {}",
            signals_cfg.symbols,
            watermark.timestamp()
        );
        let feed = SignalFeed::new(client.clone(), &config.api.signals_url, signals_cfg.request());
        let job = SignalJob::new(Arc::new(feed), notifier.clone(), destination.clone(), watermark);
        Some((job, signals_cfg.schedule()))
    } else {
        None
    };

    if app_cfg.once {
        if let Some((mut job, _)) = price {
            run_tick(&mut job).await;
        }
        if let Some((mut job, _)) = signals {
            run_tick(&mut job).await;
        }
        return Ok(());
    }

    let mut handles = Vec::new();
    if let Some((job, schedule)) = price {
        handles.push(tokio::spawn(run_forever(job, schedule)));
    }
    if let Some((job, schedule)) = signals {
        handles.push(tokio::spawn(run_forever(job, schedule)));
    }

    info!("All monitors started. Press Ctrl+C to stop.");

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("🛑 Shutdown signal received");
        }
        results = futures::future::join_all(handles) => {
            for result in results {
                if let Err(e) = result {
                    error!("❌ Monitor task stopped: {}", e);
                }
            }
        }
    }

    Ok(())
}
