//! In-memory collaborators for job tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::infrastructure::altfins::{PriceSource, SignalSource};
use crate::infrastructure::telegram::Notifier;
use crate::shared::errors::{DeliveryError, FetchError};
use crate::shared::types::{PriceSample, SignalRecord};

/// Replays scripted responses; `Err(())` becomes a fetch failure.
pub struct FakePriceSource {
    responses: Mutex<VecDeque<Result<Option<Decimal>, ()>>>,
}

impl FakePriceSource {
    pub fn new(responses: Vec<Result<Option<Decimal>, ()>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl PriceSource for FakePriceSource {
    async fn latest_price(&self) -> Result<Option<PriceSample>, FetchError> {
        let next = self.responses.lock().unwrap().pop_front().unwrap_or(Ok(None));
        match next {
            Ok(price) => Ok(price.map(|last_price| PriceSample {
                symbol: "BTC".to_string(),
                name: "Bitcoin".to_string(),
                last_price,
            })),
            Err(()) => Err(FetchError::Decode("scripted failure".to_string())),
        }
    }
}

pub struct FakeSignalSource {
    responses: Mutex<VecDeque<Result<Vec<SignalRecord>, ()>>>,
}

impl FakeSignalSource {
    pub fn new(responses: Vec<Result<Vec<SignalRecord>, ()>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl SignalSource for FakeSignalSource {
    async fn latest_signals(&self) -> Result<Vec<SignalRecord>, FetchError> {
        let next = self.responses.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()));
        next.map_err(|()| FetchError::Decode("scripted failure".to_string()))
    }
}

/// Keeps every delivered message; `failing()` rejects them all.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DeliveryError::Rejected("chat not found".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}
