use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::signal::{SignalMonitor, Watermark};
use crate::infrastructure::altfins::SignalSource;
use crate::infrastructure::telegram::Notifier;
use crate::report;

use super::deliver;
use super::scheduler::{ScheduledJob, TickOutcome};

/// Alerts once per signal that appeared since the last tick
pub struct SignalJob {
    source: Arc<dyn SignalSource>,
    notifier: Arc<dyn Notifier>,
    destination: String,
    monitor: SignalMonitor,
}

impl SignalJob {
    pub fn new(
        source: Arc<dyn SignalSource>,
        notifier: Arc<dyn Notifier>,
        destination: impl Into<String>,
        watermark: Watermark,
    ) -> Self {
        Self {
            source,
            notifier,
            destination: destination.into(),
            monitor: SignalMonitor::with_watermark(watermark),
        }
    }

    pub fn watermark(&self) -> &Watermark {
        self.monitor.watermark()
    }
}

#[async_trait]
impl ScheduledJob for SignalJob {
    fn name(&self) -> &str {
        "signals"
    }

    async fn tick(&mut self) -> TickOutcome {
        info!("🔍 Checking signals...");

        let batch = match self.source.latest_signals().await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("⚠️ Failed to retrieve signals: {}", e);
                return TickOutcome::Skipped;
            }
        };

        if batch.is_empty() {
            debug!("No signals found.");
            return TickOutcome::Skipped;
        }

        let fresh = self.monitor.pending(batch);
        if fresh.is_empty() {
            info!("No new signals since {}", self.monitor.watermark().timestamp());
            return TickOutcome::Quiet;
        }

        info!("Found {} new signals.", fresh.len());

        // Advance after each signal so a partial batch is never replayed.
        for signal in &fresh {
            let text = report::signal_alert(signal);
            deliver(self.notifier.as_ref(), &self.destination, &text).await;
            self.monitor.mark_processed(signal);
        }

        TickOutcome::Alerted(fresh.len())
    }
}
