//! Application layer - scheduled monitor jobs and the CLI

pub mod commands;
pub mod price_job;
pub mod scheduler;
pub mod signal_job;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{Cli, Commands};
pub use price_job::PriceJob;
pub use scheduler::{run_forever, run_tick, Schedule, ScheduledJob, TickOutcome};
pub use signal_job::SignalJob;

use tracing::error;

use crate::infrastructure::telegram::Notifier;

/// Send one alert. Failures are logged and swallowed.
pub(crate) async fn deliver(notifier: &dyn Notifier, destination: &str, text: &str) -> bool {
    match notifier.send(destination, text).await {
        Ok(()) => true,
        Err(e) => {
            error!("❌ Failed to send notification: {}", e);
            false
        }
    }
}
