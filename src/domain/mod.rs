//! Domain layer - the comparison logic behind each monitor

pub mod price;
pub mod signal;
