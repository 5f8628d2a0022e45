//! Stochastic Oscillator (%K, %D) with slow smoothing.
//!
//! raw %K = 100 * (close - LL(period)) / (HH(period) - LL(period))
//! %K = SMA(raw %K, smooth_k)
//! %D = SMA(%K, d_period)
//!
//! Two outputs, one instance each. Lookback: period-1 + smooth_k-1 for %K,
//! plus d_period-1 for %D.
//! Edge case: a flat window (HH == LL) reads mid-scale (50).

use crate::domain::Bar;
use crate::frame::{Column, Indicator};
use crate::indicators::sma_over;

/// Which line of the stochastic to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochOutput {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smooth_k: usize,
    d_period: usize,
    output: StochOutput,
}

impl Stochastic {
    pub fn k(period: usize, smooth_k: usize, d_period: usize) -> Self {
        Self::new(period, smooth_k, d_period, StochOutput::K)
    }

    pub fn d(period: usize, smooth_k: usize, d_period: usize) -> Self {
        Self::new(period, smooth_k, d_period, StochOutput::D)
    }

    fn new(period: usize, smooth_k: usize, d_period: usize, output: StochOutput) -> Self {
        assert!(period >= 1, "stochastic period must be >= 1");
        assert!(smooth_k >= 1, "stochastic smooth_k must be >= 1");
        assert!(d_period >= 1, "stochastic d_period must be >= 1");
        Self {
            period,
            smooth_k,
            d_period,
            output,
        }
    }
}

/// Raw (fast) %K over high/low/close windows. NaN inside the warm-up or on
/// any NaN window.
pub(crate) fn raw_percent_k(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
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
        result[i] = scale_within(bars[i].close, ll, hh);
    }

    result
}

/// 0-100 position of `value` inside [low, high]; flat range reads mid-scale.
pub(crate) fn scale_within(value: f64, low: f64, high: f64) -> f64 {
    if high == low {
        50.0
    } else {
        100.0 * (value - low) / (high - low)
    }
}

impl Indicator for Stochastic {
    fn column(&self) -> Column {
        match self.output {
            StochOutput::K => Column::StochK,
            StochOutput::D => Column::StochD,
        }
    }

    fn lookback(&self) -> usize {
        let k = self.period - 1 + self.smooth_k - 1;
        match self.output {
            StochOutput::K => k,
            StochOutput::D => k + self.d_period - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let raw = raw_percent_k(bars, self.period);
        let k = sma_over(&raw, self.smooth_k);
        match self.output {
            StochOutput::K => k,
            StochOutput::D => sma_over(&k, self.d_period),
        }
    }
}
