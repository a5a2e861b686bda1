//! Watermark filtering of the signals feed

use std::collections::HashSet;

use crate::shared::types::SignalRecord;

use super::Watermark;

/// Signals in `batch` not yet covered by `watermark`, oldest first.
///
/// The upstream batch is unordered. The sort is stable, so signals with
/// equal timestamps keep their upstream order. Exact repeats inside one
/// batch are collapsed.
pub fn select_new(watermark: &Watermark, batch: Vec<SignalRecord>) -> Vec<SignalRecord> {
    let mut fresh: Vec<SignalRecord> = batch
        .into_iter()
        .filter(|record| watermark.is_new(record))
        .collect();
    fresh.sort_by_key(|record| record.timestamp);

    let mut taken = HashSet::new();
    fresh.retain(|record| taken.insert((record.timestamp, record.identity())));
    fresh
}

/// Owns the watermark between ticks
#[derive(Debug, Clone)]
pub struct SignalMonitor {
    watermark: Watermark,
}

impl SignalMonitor {
    pub fn with_watermark(watermark: Watermark) -> Self {
        Self { watermark }
    }

    pub fn pending(&self, batch: Vec<SignalRecord>) -> Vec<SignalRecord> {
        select_new(&self.watermark, batch)
    }

    pub fn mark_processed(&mut self, record: &SignalRecord) {
        self.watermark.advance(record);
    }

    pub fn watermark(&self) -> &Watermark {
        &self.watermark
    }
}
