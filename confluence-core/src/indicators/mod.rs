//! Concrete indicator implementations.
//!
//! Every indicator implements the `Indicator` trait from `crate::frame`.
//! The battery precomputes each one over the whole series before any vote
//! is resolved.
//!
//! Multi-output indicators (Bollinger, Donchian, Stochastic, Stochastic
//! RSI, the ADX family, SuperTrend) are exposed as separate named instances
//! per output column, keeping the single-series `Indicator` trait
//! unchanged.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod cmf;
pub mod donchian;
pub mod mfi;
pub mod parabolic_sar;
pub mod rsi;
pub mod stoch_rsi;
pub mod stochastic;
pub mod supertrend;
pub mod ultimate;
pub mod vwap;
pub mod willr;

pub use adx::Adx;
pub use bollinger::Bollinger;
pub use cci::Cci;
pub use cmf::Cmf;
pub use donchian::Donchian;
pub use mfi::Mfi;
pub use parabolic_sar::ParabolicSar;
pub use rsi::Rsi;
pub use stoch_rsi::StochRsi;
pub use stochastic::Stochastic;
pub use supertrend::Supertrend;
pub use ultimate::UltimateOscillator;
pub use vwap::Vwap;
pub use willr::WilliamsR;

/// Simple moving average over a value series.
///
/// Output is NaN until the window holds `period` consecutive non-NaN
/// values ending at the current index. Shared by the stochastics and CCI.
pub(crate) fn sma_over(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }
    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }
    result
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLCV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            crate::domain::Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples, volume 1000.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| crate::domain::Bar {
            timestamp: base + chrono::Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_over_basic() {
        let result = sma_over(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(result[0].is_nan());
        assert_approx(result[1], 1.5, DEFAULT_EPSILON);
        assert_approx(result[2], 2.5, DEFAULT_EPSILON);
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_over_nan_window() {
        let result = sma_over(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_over_short_input() {
        assert!(sma_over(&[1.0], 3).iter().all(|v| v.is_nan()));
    }
}
