//! Indicator trait and the typed indicator frame.
//!
//! Indicators are pure functions: bar history in, numeric series out. The
//! battery computes every column once, up front; nothing is recomputed per
//! row. Columns are keyed by the `Column` enum rather than by name, so a
//! consumer asking for a column that was never computed is a visible
//! `None`, not a runtime string-match failure.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of one output column in the indicator frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    Rsi,
    StochK,
    StochD,
    StochRsiK,
    StochRsiD,
    BbUpper,
    BbMiddle,
    BbLower,
    Cci,
    Mfi,
    Adx,
    PlusDi,
    MinusDi,
    Vwap,
    Psar,
    Cmf,
    SuperTrend,
    SuperTrendDir,
    UltimateOsc,
    DonchianUpper,
    DonchianLower,
    WillR,
    Crsi,
}

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. Rows inside the warm-up window are `f64::NAN` — the
/// explicit undefined marker, never a silent zero.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or
/// later.
pub trait Indicator: Send + Sync {
    /// Which frame column this instance fills.
    fn column(&self) -> Column;

    /// Number of bars needed before the indicator produces valid output.
    /// The first `lookback()` values of the output should be NaN.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`, NaN-prefixed.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// The bar series extended with one numeric column per indicator output.
///
/// Built once per invocation, then read by the vote resolver (final row
/// only) and returned whole to the caller for charting.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    rows: usize,
    columns: HashMap<Column, Vec<f64>>,
}

impl IndicatorFrame {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            columns: HashMap::new(),
        }
    }

    /// Insert a column. Every column must match the frame's row count.
    pub fn insert(&mut self, column: Column, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.rows,
            "column {column:?} length {} != frame rows {}",
            values.len(),
            self.rows
        );
        self.columns.insert(column, values);
    }

    /// Full series for a column, if computed.
    pub fn column(&self, column: Column) -> Option<&[f64]> {
        self.columns.get(&column).map(|v| v.as_slice())
    }

    /// Value at a specific row. NaN (warm-up) reads back as `None`.
    pub fn value(&self, column: Column, row: usize) -> Option<f64> {
        self.columns
            .get(&column)
            .and_then(|v| v.get(row).copied())
            .filter(|v| !v.is_nan())
    }

    /// Value at the final row — the only row the vote resolver reads.
    pub fn last(&self, column: Column) -> Option<f64> {
        if self.rows == 0 {
            return None;
        }
        self.value(column, self.rows - 1)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    /// Number of rows (same as the source series length).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns stored.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
