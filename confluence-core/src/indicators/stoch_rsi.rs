//! Stochastic RSI (%K, %D).
//!
//! Applies the stochastic scaling to an RSI series instead of price:
//! raw = 100 * (RSI - min(RSI, stoch_period)) / (max(RSI, stoch_period) - min)
//! %K = SMA(raw, smooth_k), %D = SMA(%K, d_period)
//!
//! Lookback: rsi_period + stoch_period - 1 + smooth_k - 1 for %K, plus
//! d_period - 1 for %D.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};
use crate::indicators::rsi::rsi_over;
use crate::indicators::sma_over;
use crate::indicators::stochastic::scale_within;

/// Which line of the stochastic RSI to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochRsiOutput {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct StochRsi {
    rsi_period: usize,
    stoch_period: usize,
    smooth_k: usize,
    d_period: usize,
    output: StochRsiOutput,
}

impl StochRsi {
    pub fn k(rsi_period: usize, stoch_period: usize, smooth_k: usize, d_period: usize) -> Self {
        Self::new(rsi_period, stoch_period, smooth_k, d_period, StochRsiOutput::K)
    }

    pub fn d(rsi_period: usize, stoch_period: usize, smooth_k: usize, d_period: usize) -> Self {
        Self::new(rsi_period, stoch_period, smooth_k, d_period, StochRsiOutput::D)
    }

    fn new(
        rsi_period: usize,
        stoch_period: usize,
        smooth_k: usize,
        d_period: usize,
        output: StochRsiOutput,
    ) -> Self {
        assert!(rsi_period >= 1, "stochrsi rsi_period must be >= 1");
        assert!(stoch_period >= 1, "stochrsi stoch_period must be >= 1");
        assert!(smooth_k >= 1, "stochrsi smooth_k must be >= 1");
        assert!(d_period >= 1, "stochrsi d_period must be >= 1");
        Self {
            rsi_period,
            stoch_period,
            smooth_k,
            d_period,
            output,
        }
    }
}

impl Indicator for StochRsi {
    fn column(&self) -> Column {
        match self.output {
            StochRsiOutput::K => Column::StochRsiK,
            StochRsiOutput::D => Column::StochRsiD,
        }
    }

    fn lookback(&self) -> usize {
        let k = self.rsi_period + self.stoch_period - 1 + self.smooth_k - 1;
        match self.output {
            StochRsiOutput::K => k,
            StochRsiOutput::D => k + self.d_period - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = rsi_over(&closes, self.rsi_period);

        let n = bars.len();
        let mut raw = vec![f64::NAN; n];
        for i in 0..n {
            if i + 1 < self.stoch_period {
                continue;
            }
            let window = &rsi[i + 1 - self.stoch_period..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            raw[i] = scale_within(rsi[i], min, max);
        }

        let k = sma_over(&raw, self.smooth_k);
        match self.output {
            StochRsiOutput::K => k,
            StochRsiOutput::D => sma_over(&k, self.d_period),
        }
    }
}
