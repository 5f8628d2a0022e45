//! Williams %R — fast momentum reversal gauge.
//!
//! %R = -100 * (HH(period) - close) / (HH(period) - LL(period))
//! Range: [-100, 0]; near 0 means close pinned at the window high.
//!
//! Lookback: period - 1.
//! Edge case: flat window reads -50.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self { period }
    }
}

impl Indicator for WilliamsR {
    fn column(&self) -> Column {
        Column::WillR
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];
            let mut hh = f64::NEG_INFINITY;
            let mut ll = f64::INFINITY;
            let mut has_nan = false;
            for bar in window {
                if bar.high.is_nan() || bar.low.is_nan() {
                    has_nan = true;
                    break;
                }
                hh = hh.max(bar.high);
                ll = ll.min(bar.low);
            }
            if has_nan || bars[i].close.is_nan() {
                continue;
            }
            result[i] = if hh == ll {
                -50.0
            } else {
                -100.0 * (hh - bars[i].close) / (hh - ll)
            };
        }

        result
    }
}
