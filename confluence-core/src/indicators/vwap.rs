//! Volume-Weighted Average Price.
//!
//! Running cumulative VWAP from the start of the series:
//! VWAP[t] = sum(TP * volume, 0..=t) / sum(volume, 0..=t)
//! where TP is the typical price (H+L+C)/3.
//!
//! The engine sees one continuous series and has no session calendar, so
//! there is no intraday anchor to reset on.
//!
//! Lookback: 0.
//! Edge case: while cumulative volume is zero the equal-weight mean of
//! typical prices stands in, so the column is defined from the first bar.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for Vwap {
    fn column(&self) -> Column {
        Column::Vwap
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;
        let mut cum_tp = 0.0;

        for (i, bar) in bars.iter().enumerate() {
            let tp = bar.typical_price();
            if tp.is_nan() || bar.volume.is_nan() {
                // A void bar poisons the cumulative sums; stop here.
                break;
            }
            cum_pv += tp * bar.volume;
            cum_volume += bar.volume;
            cum_tp += tp;

            result[i] = if cum_volume > 0.0 {
                cum_pv / cum_volume
            } else {
                cum_tp / (i + 1) as f64
            };
        }

        result
    }
}
