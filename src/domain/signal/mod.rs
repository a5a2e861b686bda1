//! Signal domain - deciding which feed entries are new

mod signal_monitor;
mod watermark;

pub use signal_monitor::{select_new, SignalMonitor};
pub use watermark::Watermark;
