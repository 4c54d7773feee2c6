//! Scan orchestration

pub mod runtime;

pub use runtime::*;
