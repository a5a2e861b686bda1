// src/report.rs
//! Alert text sent to the chat

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::price::PriceMove;
use crate::shared::types::SignalRecord;

fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// One-line price alert, e.g. `📈 ⬆️ Bitcoin price increased by 6.00$! New price: 106.00$`
pub fn price_alert(asset: &str, price_move: &PriceMove) -> String {
    format!(
        "{} {} price {} by {}$! New price: {}$",
        price_move.direction.icon(),
        asset,
        price_move.direction.verb(),
        two_places(price_move.delta),
        two_places(price_move.current),
    )
}

/// Six labeled lines, always in the same order.
pub fn signal_alert(record: &SignalRecord) -> String {
    [
        format!("Direction: {}", record.direction),
        format!("Coin: {} ({})", record.symbol, record.symbol_name),
        format!("Signal: {}", record.signal_name),
        format!("Price: ${}", record.last_price),
        format!("Change: {}", record.price_change),
        format!("Time: {}", record.time_label()),
    ]
    .join("\n")
}
