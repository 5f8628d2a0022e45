//! Connors-style composite RSI (CRSI).
//!
//! CRSI is the unweighted mean of three 0-100 sub-signals:
//! 1. RSI(close, rsi_period)
//! 2. Streak RSI: per-bar movement sign (+1 rise / -1 fall / 0 flat),
//!    summed over a rolling `streak_window`, then RSI(rsi_period) of that
//!    streak series.
//! 3. Percentile rank of today's 1-bar return within the returns of the
//!    trailing `rank_window` bars inclusive (strict less-than, scaled to
//!    0-100 by the number of returns actually in the window).
//!
//! CRSI is defined only where all three sub-signals are defined; with the
//! default windows (3/2/100) the rank sub-signal is binding and the first
//! defined row is `rank_window - 1`.

use crate::config::CrsiParams;
use crate::domain::Bar;
use crate::frame::{Column, IndicatorFrame};
use crate::indicators::rsi::rsi_over;

#[derive(Debug, Clone)]
pub struct CrsiCalculator {
    params: CrsiParams,
}

impl CrsiCalculator {
    pub fn new(params: CrsiParams) -> Self {
        Self { params }
    }

    /// Warm-up length: the slowest of the three sub-signals.
    pub fn lookback(&self) -> usize {
        let rank = self.params.rank_window - 1;
        let streak = self.params.streak_window + self.params.rsi_period;
        rank.max(streak).max(self.params.rsi_period)
    }

    /// Compute the CRSI column for the whole series.
    pub fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let price_rsi = rsi_over(&closes, self.params.rsi_period);
        let streak_rsi = rsi_over(&self.streak_series(&closes), self.params.rsi_period);
        let rank = self.percent_rank(&closes);

        (0..n)
            .map(|i| {
                if price_rsi[i].is_nan() || streak_rsi[i].is_nan() || rank[i].is_nan() {
                    f64::NAN
                } else {
                    (price_rsi[i] + streak_rsi[i] + rank[i]) / 3.0
                }
            })
            .collect()
    }

    /// Compute and append the `Crsi` column.
    pub fn extend(&self, frame: &mut IndicatorFrame, bars: &[Bar]) {
        frame.insert(Column::Crsi, self.compute(bars));
    }

    /// Rolling sum of per-bar movement signs over `streak_window`.
    fn streak_series(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let w = self.params.streak_window;

        let mut signs = vec![f64::NAN; n];
        for i in 1..n {
            if closes[i].is_nan() || closes[i - 1].is_nan() {
                continue;
            }
            signs[i] = if closes[i] > closes[i - 1] {
                1.0
            } else if closes[i] < closes[i - 1] {
                -1.0
            } else {
                0.0
            };
        }

        let mut streak = vec![f64::NAN; n];
        for i in w..n {
            let window = &signs[i + 1 - w..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            streak[i] = window.iter().sum();
        }
        streak
    }

    /// Percentile rank of today's return among the returns of the trailing
    /// `rank_window` bars inclusive.
    ///
    /// At exactly `rank_window` bars the window's oldest bar has no
    /// predecessor, so the distribution holds `rank_window - 1` returns;
    /// the denominator is the actual count, keeping the rank a true 0-100
    /// percentile either way.
    fn percent_rank(&self, closes: &[f64]) -> Vec<f64> {
        let n = closes.len();
        let w = self.params.rank_window;
        let mut rank = vec![f64::NAN; n];

        let mut returns = vec![f64::NAN; n];
        for i in 1..n {
            if closes[i].is_nan() || closes[i - 1].is_nan() || closes[i - 1] == 0.0 {
                continue;
            }
            returns[i] = closes[i] / closes[i - 1] - 1.0;
        }

        for i in (w - 1)..n {
            let today = returns[i];
            if today.is_nan() {
                continue;
            }
            let start = (i + 1 - w).max(1);
            let window = &returns[start..=i];
            if window.iter().any(|v| v.is_nan()) {
                continue;
            }
            let below = window.iter().filter(|&&r| r < today).count();
            rank[i] = 100.0 * below as f64 / window.len() as f64;
        }

        rank
    }
}
