use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::shared::types::{SignalIdentity, SignalRecord};

/// Boundary below which signals count as already processed.
///
/// Signals sharing the boundary timestamp are told apart by their
/// identity, so a second signal stamped with the same instant is still
/// delivered when it shows up in a later batch. The starting boundary
/// is exclusive: nothing stamped at that instant is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    timestamp: DateTime<Utc>,
    // true until a processed signal moves the boundary
    closed: bool,
    seen_at_timestamp: BTreeSet<SignalIdentity>,
}

impl Watermark {
    pub fn starting_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            closed: true,
            seen_at_timestamp: BTreeSet::new(),
        }
    }

    pub fn now() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_new(&self, record: &SignalRecord) -> bool {
        if record.timestamp > self.timestamp {
            return true;
        }
        record.timestamp == self.timestamp
            && !self.closed
            && !self.seen_at_timestamp.contains(&record.identity())
    }

    /// Record `record` as processed. Never moves the boundary backward.
    pub fn advance(&mut self, record: &SignalRecord) {
        if record.timestamp > self.timestamp {
            self.timestamp = record.timestamp;
            self.closed = false;
            self.seen_at_timestamp.clear();
            self.seen_at_timestamp.insert(record.identity());
        } else if record.timestamp == self.timestamp && !self.closed {
            self.seen_at_timestamp.insert(record.identity());
        }
    }
}
