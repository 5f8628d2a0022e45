//! Money Flow Index — volume-weighted RSI analogue.
//!
//! Raw money flow = typical_price * volume. A bar's flow is positive when
//! its typical price rose vs. the previous bar, negative when it fell, and
//! ignored when unchanged.
//! MFI = 100 * positive_flow / (positive_flow + negative_flow) over the
//! window.
//!
//! Lookback: period (flows need a previous bar).
//! Edge cases: no negative flow → 100; no positive flow → 0; no flow at
//! all (flat or zero-volume window) → 50.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct Mfi {
    period: usize,
}

impl Mfi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "MFI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Mfi {
    fn column(&self) -> Column {
        Column::Mfi
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period + 1 {
            return result;
        }

        let tp: Vec<f64> = bars.iter().map(|b| b.typical_price()).collect();

        // Signed flows; flows[i] needs bar i-1.
        let mut flows = vec![f64::NAN; n];
        for i in 1..n {
            if tp[i].is_nan() || tp[i - 1].is_nan() || bars[i].volume.is_nan() {
                continue;
            }
            let raw = tp[i] * bars[i].volume;
            flows[i] = if tp[i] > tp[i - 1] {
                raw
            } else if tp[i] < tp[i - 1] {
                -raw
            } else {
                0.0
            };
        }

        for i in self.period..n {
            let window = &flows[i + 1 - self.period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let positive: f64 = window.iter().filter(|&&v| v > 0.0).sum();
            let negative: f64 = -window.iter().filter(|&&v| v < 0.0).sum::<f64>();
            result[i] = if positive == 0.0 && negative == 0.0 {
                50.0
            } else if negative == 0.0 {
                100.0
            } else if positive == 0.0 {
                0.0
            } else {
                100.0 * positive / (positive + negative)
            };
        }

        result
    }
}
