//! Confluence Core — deterministic signal aggregation over OHLCV series.
//!
//! This crate contains the whole scoring pipeline:
//! - Domain types (bars, validated series, votes, verdicts)
//! - Indicator battery: a fixed catalog precomputed over the series
//! - Composite CRSI calculator
//! - Vote resolver: fixed thresholds applied to the final row
//! - Confluence aggregator: symmetric, monotonic decision rule
//! - Verdict assembly with entry/target/stop levels and a per-indicator
//!   detail map
//!
//! The engine performs no I/O and holds no shared mutable state; every
//! invocation computes fresh from its input series.

pub mod battery;
pub mod config;
pub mod confluence;
pub mod crsi;
pub mod domain;
pub mod engine;
pub mod error;
pub mod frame;
pub mod indicators;
pub mod votes;
