//! Fixed-interval trigger for monitor jobs

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fetch failed or returned nothing; state untouched
    Skipped,
    /// First price observed
    Baseline,
    /// Data fetched, nothing worth an alert
    Quiet,
    /// Number of alerts handed to the notifier
    Alerted(usize),
}

/// A monitor that the scheduler drives one tick at a time
#[async_trait]
pub trait ScheduledJob: Send {
    fn name(&self) -> &str;

    async fn tick(&mut self) -> TickOutcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub every: Duration,
    /// Start on a multiple of `every` since the Unix epoch
    pub align: bool,
}

impl Schedule {
    pub fn every(every: Duration) -> Self {
        Self { every, align: false }
    }

    pub fn aligned(every: Duration) -> Self {
        Self { every, align: true }
    }

    /// Wait before the first tick.
    pub fn first_delay(&self, now: DateTime<Utc>) -> Duration {
        let period_ms = self.every.as_millis() as i64;
        if !self.align || period_ms == 0 {
            return Duration::ZERO;
        }
        let remainder = now.timestamp_millis().rem_euclid(period_ms);
        if remainder == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis((period_ms - remainder) as u64)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run one tick, containing any panic so the next trigger still fires.
///
/// Returns `None` when the tick panicked.
pub async fn run_tick<J: ScheduledJob + ?Sized>(job: &mut J) -> Option<TickOutcome> {
    let result = AssertUnwindSafe(job.tick()).catch_unwind().await;
    match result {
        Ok(outcome) => {
            debug!("[{}] tick finished: {:?}", job.name(), outcome);
            Some(outcome)
        }
        Err(panic) => {
            error!("💥 [{}] tick aborted: {}", job.name(), panic_message(panic.as_ref()));
            None
        }
    }
}

/// Drive `job` forever.
///
/// Each tick is awaited before the next trigger is taken, so ticks never
/// overlap. Triggers missed while a slow tick was running are dropped.
pub async fn run_forever<J: ScheduledJob>(mut job: J, schedule: Schedule) {
    let delay = schedule.first_delay(Utc::now());
    info!(
        "⏱️ [{}] scheduled every {:?} (first tick in {:?})",
        job.name(),
        schedule.every,
        delay
    );

    let mut interval = tokio::time::interval_at(Instant::now() + delay, schedule.every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        run_tick(&mut job).await;
    }
}
