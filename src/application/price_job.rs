use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::price::{PriceMonitor, PriceState};
use crate::infrastructure::altfins::PriceSource;
use crate::infrastructure::telegram::Notifier;
use crate::report;

use super::deliver;
use super::scheduler::{ScheduledJob, TickOutcome};

/// Alerts when the asset price moves more than the threshold
pub struct PriceJob {
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    destination: String,
    monitor: PriceMonitor,
}

impl PriceJob {
    pub fn new(
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        destination: impl Into<String>,
        threshold: Decimal,
    ) -> Self {
        Self {
            source,
            notifier,
            destination: destination.into(),
            monitor: PriceMonitor::new(threshold),
        }
    }

    pub fn state(&self) -> PriceState {
        self.monitor.state()
    }
}

#[async_trait]
impl ScheduledJob for PriceJob {
    fn name(&self) -> &str {
        "price"
    }

    async fn tick(&mut self) -> TickOutcome {
        info!("🔍 Checking price...");

        let sample = match self.source.latest_price().await {
            Ok(Some(sample)) => sample,
            Ok(None) => {
                warn!("⚠️ Price API returned no data");
                return TickOutcome::Skipped;
            }
            Err(e) => {
                warn!("⚠️ Failed to retrieve price: {}", e);
                return TickOutcome::Skipped;
            }
        };

        info!("Current {} price: {}", sample.symbol, sample.last_price);

        let first_observation = self.monitor.state() == PriceState::Uninitialized;
        match self.monitor.observe(sample.last_price) {
            Some(price_move) => {
                info!(
                    "{} moved {} -> {} (threshold {})",
                    sample.symbol,
                    price_move.previous,
                    price_move.current,
                    self.monitor.threshold()
                );
                let text = report::price_alert(sample.display_name(), &price_move);
                deliver(self.notifier.as_ref(), &self.destination, &text).await;
                TickOutcome::Alerted(1)
            }
            None if first_observation => {
                info!("Initial price set to: {}", sample.last_price);
                TickOutcome::Baseline
            }
            None => TickOutcome::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakePriceSource, RecordingNotifier};

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn job(source: &Arc<FakePriceSource>, notifier: &Arc<RecordingNotifier>) -> PriceJob {
        PriceJob::new(source.clone(), notifier.clone(), "chat-1", dec(5))
    }

    #[tokio::test]
    async fn test_first_fetch_only_sets_baseline() {
        let source = Arc::new(FakePriceSource::new(vec![Ok(Some(dec(100)))]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut job = job(&source, &notifier);

        assert_eq!(job.tick().await, TickOutcome::Baseline);
        assert_eq!(job.state(), PriceState::Tracking(dec(100)));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_threshold_crossing_sends_one_alert() {
        let source = Arc::new(FakePriceSource::new(vec![
            Ok(Some(dec(100))),
            Ok(Some(dec(104))),
            Ok(Some(dec(106))),
        ]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut job = job(&source, &notifier);

        job.tick().await;
        assert_eq!(job.tick().await, TickOutcome::Quiet);
        assert_eq!(job.state(), PriceState::Tracking(dec(100)));

        assert_eq!(job.tick().await, TickOutcome::Alerted(1));
        assert_eq!(job.state(), PriceState::Tracking(dec(106)));

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "chat-1");
        assert_eq!(sent[0].1, "📈 ⬆️ Bitcoin price increased by 6.00$! New price: 106.00$");
    }

    #[tokio::test]
    async fn test_decrease_alert() {
        let source = Arc::new(FakePriceSource::new(vec![Ok(Some(dec(100))), Ok(Some(dec(94)))]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut job = job(&source, &notifier);

        job.tick().await;
        assert_eq!(job.tick().await, TickOutcome::Alerted(1));
        assert_eq!(job.state(), PriceState::Tracking(dec(94)));
        assert_eq!(
            notifier.sent()[0].1,
            "📉 ⬇️ Bitcoin price decreased by 6.00$! New price: 94.00$"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_changes_nothing() {
        let source = Arc::new(FakePriceSource::new(vec![
            Ok(Some(dec(100))),
            Err(()),
            Ok(None),
        ]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut job = job(&source, &notifier);

        job.tick().await;
        assert_eq!(job.tick().await, TickOutcome::Skipped);
        assert_eq!(job.tick().await, TickOutcome::Skipped);
        assert_eq!(job.state(), PriceState::Tracking(dec(100)));
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_before_baseline() {
        let source = Arc::new(FakePriceSource::new(vec![Err(()), Ok(Some(dec(300)))]));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut job = job(&source, &notifier);

        assert_eq!(job.tick().await, TickOutcome::Skipped);
        assert_eq!(job.state(), PriceState::Uninitialized);
        assert_eq!(job.tick().await, TickOutcome::Baseline);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_new_price() {
        let source = Arc::new(FakePriceSource::new(vec![Ok(Some(dec(100))), Ok(Some(dec(120)))]));
        let notifier = Arc::new(RecordingNotifier::failing());
        let mut job = job(&source, &notifier);

        job.tick().await;
        assert_eq!(job.tick().await, TickOutcome::Alerted(1));
        assert_eq!(job.state(), PriceState::Tracking(dec(120)));
        assert_eq!(notifier.attempts(), 1);
    }
}
