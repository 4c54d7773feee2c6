//! Crowd-positioning signal scanner for perpetual futures.
//!
//! Combines technical indicators with long/short account positioning into a
//! composite score, a quality tier, risk levels and a prediction label per
//! instrument.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;
