//! Chaikin Money Flow.
//!
//! Money flow multiplier = ((close - low) - (high - close)) / (high - low)
//! Money flow volume = multiplier * volume
//! CMF = sum(money flow volume, period) / sum(volume, period)
//!
//! Lookback: period - 1.
//! Edge cases: a bar with high == low contributes zero flow; a window with
//! zero total volume reads 0 (no flow either way).

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct Cmf {
    period: usize,
}

impl Cmf {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CMF period must be >= 1");
        Self { period }
    }
}

impl Indicator for Cmf {
    fn column(&self) -> Column {
        Column::Cmf
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

        let mut flow = vec![f64::NAN; n];
        for (i, bar) in bars.iter().enumerate() {
            if bar.high.is_nan() || bar.low.is_nan() || bar.close.is_nan() || bar.volume.is_nan() {
                continue;
            }
            let range = bar.high - bar.low;
            flow[i] = if range == 0.0 {
                0.0
            } else {
                ((bar.close - bar.low) - (bar.high - bar.close)) / range * bar.volume
            };
        }

        for i in (self.period - 1)..n {
            let window = &flow[i + 1 - self.period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let flow_sum: f64 = window.iter().sum();
            let volume_sum: f64 = bars[i + 1 - self.period..=i].iter().map(|b| b.volume).sum();
            result[i] = if volume_sum == 0.0 {
                0.0
            } else {
                flow_sum / volume_sum
            };
        }

        result
    }
}
