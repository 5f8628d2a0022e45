//! Commodity Channel Index.
//!
//! CCI = (TP - SMA(TP, period)) / (0.015 * mean_deviation(TP, period))
//! where TP is the typical price (H+L+C)/3 and mean_deviation is the mean
//! absolute deviation from the window SMA.
//!
//! Lookback: period - 1.
//! Edge case: zero deviation (flat window) reads 0.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

const CCI_SCALE: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Cci {
    fn column(&self) -> Column {
        Column::Cci
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

        let tp: Vec<f64> = bars.iter().map(|b| b.typical_price()).collect();

        for i in (self.period - 1)..n {
            let window = &tp[i + 1 - self.period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let mean = window.iter().sum::<f64>() / self.period as f64;
            let mad = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / self.period as f64;
            result[i] = if mad == 0.0 {
                0.0
            } else {
                (tp[i] - mean) / (CCI_SCALE * mad)
            };
        }

        result
    }
}
