//! Price domain - threshold tracking of a single asset

mod price_monitor;

pub use price_monitor::{evaluate, PriceMonitor};

use rust_decimal::Decimal;

/// Last price the monitor compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceState {
    #[default]
    Uninitialized,
    Tracking(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn verb(&self) -> &'static str {
        match self {
            MoveDirection::Up => "increased",
            MoveDirection::Down => "decreased",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MoveDirection::Up => "📈 ⬆️",
            MoveDirection::Down => "📉 ⬇️",
        }
    }
}

/// A price change large enough to alert on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceMove {
    pub direction: MoveDirection,
    /// Absolute change against the previous tracked price
    pub delta: Decimal,
    pub previous: Decimal,
    pub current: Decimal,
}
