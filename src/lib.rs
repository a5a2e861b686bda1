//! altwatch - altFINS price and signal monitor
//! Polls the market-data API on a schedule and forwards new events to Telegram

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::{PriceJob, SignalJob};
pub use domain::price::PriceMonitor;
pub use domain::signal::{SignalMonitor, Watermark};
pub use infrastructure::telegram::Notifier;
