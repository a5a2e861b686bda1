//! Price monitoring state machine

use rust_decimal::Decimal;

use super::{MoveDirection, PriceMove, PriceState};

/// Compare a fetched price against the tracked one.
///
/// The first observation only sets the baseline. Afterwards the tracked
/// price moves only when the change is strictly greater than `threshold`,
/// so small moves accumulate until one tick crosses it.
pub fn evaluate(state: PriceState, price: Decimal, threshold: Decimal) -> (PriceState, Option<PriceMove>) {
    let previous = match state {
        PriceState::Uninitialized => return (PriceState::Tracking(price), None),
        PriceState::Tracking(previous) => previous,
    };

    let difference = price - previous;
    if difference.abs() <= threshold {
        return (state, None);
    }

    let direction = if difference > Decimal::ZERO {
        MoveDirection::Up
    } else {
        MoveDirection::Down
    };

    let price_move = PriceMove {
        direction,
        delta: difference.abs(),
        previous,
        current: price,
    };
    (PriceState::Tracking(price), Some(price_move))
}

/// Holds the tracked price between ticks
#[derive(Debug, Clone)]
pub struct PriceMonitor {
    threshold: Decimal,
    state: PriceState,
}

impl PriceMonitor {
    pub fn new(threshold: Decimal) -> Self {
        Self {
            threshold,
            state: PriceState::Uninitialized,
        }
    }

    pub fn with_state(threshold: Decimal, state: PriceState) -> Self {
        Self { threshold, state }
    }

    pub fn observe(&mut self, price: Decimal) -> Option<PriceMove> {
        let (next, price_move) = evaluate(self.state, price, self.threshold);
        self.state = next;
        price_move
    }

    pub fn state(&self) -> PriceState {
        self.state
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }
}
