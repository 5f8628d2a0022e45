//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period.
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }
}

/// RSI over an arbitrary value series.
///
/// The seed window starts at the first run of `period` consecutive valid
/// one-step changes, so a NaN-prefixed input (a derived series such as the
/// CRSI streak) warms up correctly. A NaN after the seed poisons the rest
/// of the output.
pub(crate) fn rsi_over(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    // One-step changes; changes[i] needs values[i-1] and values[i].
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        if values[i].is_nan() || values[i - 1].is_nan() {
            changes[i] = f64::NAN;
        } else {
            changes[i] = values[i] - values[i - 1];
        }
    }

    // First index with `period` consecutive valid changes.
    let seed_start = match (1..n).find(|&i| {
        i + period <= n && changes[i..i + period].iter().all(|c| !c.is_nan())
    }) {
        Some(i) => i,
        None => return result,
    };

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[seed_start..seed_start + period] {
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    let first = seed_start + period - 1;
    result[first] = compute_rsi(avg_gain, avg_loss);

    // Wilder smoothing for subsequent values.
    let alpha = 1.0 / period as f64;
    for i in (first + 1)..n {
        if changes[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }

        let gain = if changes[i] > 0.0 { changes[i] } else { 0.0 };
        let loss = if changes[i] < 0.0 { -changes[i] } else { 0.0 };

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = compute_rsi(avg_gain, avg_loss);
    }

    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

impl Indicator for Rsi {
    fn column(&self) -> Column {
        Column::Rsi
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rsi_over(&closes, self.period)
    }
}
