//! Ultimate Oscillator — triple-timeframe buying-pressure momentum.
//!
//! BP[t] = close[t] - min(low[t], close[t-1])
//! TR[t] = max(high[t], close[t-1]) - min(low[t], close[t-1])
//! avg(p) = sum(BP, p) / sum(TR, p)
//! UO = 100 * (4*avg(fast) + 2*avg(medium) + avg(slow)) / 7
//!
//! Lookback: slow (BP/TR need a previous close).
//! Edge case: a window with zero total true range reads mid-scale (50).

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct UltimateOscillator {
    fast: usize,
    medium: usize,
    slow: usize,
}

impl UltimateOscillator {
    pub fn new(fast: usize, medium: usize, slow: usize) -> Self {
        assert!(fast >= 1, "UO fast period must be >= 1");
        assert!(fast <= medium && medium <= slow, "UO periods must be ordered");
        Self { fast, medium, slow }
    }
}

impl UltimateOscillator {
    fn window_average(bp: &[f64], tr: &[f64], end: usize, period: usize) -> Option<f64> {
        let start = end + 1 - period;
        let bp_window = &bp[start..=end];
        let tr_window = &tr[start..=end];
        if bp_window.iter().any(|v| v.is_nan()) || tr_window.iter().any(|v| v.is_nan()) {
            return None;
        }
        let tr_sum: f64 = tr_window.iter().sum();
        if tr_sum == 0.0 {
            return Some(0.5);
        }
        Some(bp_window.iter().sum::<f64>() / tr_sum)
    }
}

impl Indicator for UltimateOscillator {
    fn column(&self) -> Column {
        Column::UltimateOsc
    }

    fn lookback(&self) -> usize {
        self.slow
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.slow + 1 {
            return result;
        }

        let mut bp = vec![f64::NAN; n];
        let mut tr = vec![f64::NAN; n];
        for i in 1..n {
            let prev_close = bars[i - 1].close;
            if bars[i].high.is_nan()
                || bars[i].low.is_nan()
                || bars[i].close.is_nan()
                || prev_close.is_nan()
            {
                continue;
            }
            let floor = bars[i].low.min(prev_close);
            let ceil = bars[i].high.max(prev_close);
            bp[i] = bars[i].close - floor;
            tr[i] = ceil - floor;
        }

        for i in self.slow..n {
            let (Some(fast), Some(medium), Some(slow)) = (
                Self::window_average(&bp, &tr, i, self.fast),
                Self::window_average(&bp, &tr, i, self.medium),
                Self::window_average(&bp, &tr, i, self.slow),
            ) else {
                continue;
            };
            result[i] = 100.0 * (4.0 * fast + 2.0 * medium + slow) / 7.0;
        }

        result
    }
}
