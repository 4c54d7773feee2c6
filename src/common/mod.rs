//! Numeric helpers shared by the indicator library.

pub mod math;
