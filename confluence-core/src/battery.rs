//! Indicator battery — precomputes the full catalog over a series.
//!
//! The catalog is fixed: every frame column is always computed, whatever
//! preset is voting, so the returned frame is complete for charting. The
//! battery refuses series shorter than its floor — the point past which
//! every catalog column is defined at the final row — instead of handing
//! downstream a frame that is all-NaN where it matters.

use crate::domain::Series;
use crate::error::EngineError;
use crate::frame::{Indicator, IndicatorFrame};
use crate::indicators::{
    Adx, Bollinger, Cci, Cmf, Donchian, Mfi, ParabolicSar, Rsi, StochRsi, Stochastic, Supertrend,
    UltimateOscillator, Vwap, WilliamsR,
};

pub struct IndicatorBattery {
    catalog: Vec<Box<dyn Indicator>>,
}

impl IndicatorBattery {
    /// The standard catalog: RSI(14), Stochastic(14,3,3), Stochastic
    /// RSI(14,14,3,3), Bollinger(20, 2σ), CCI(20), MFI(14), ADX(14) family,
    /// VWAP, Parabolic SAR, CMF(20), SuperTrend(7, 3.0), Ultimate
    /// Oscillator(7,14,28), Donchian(20), Williams %R(14).
    pub fn new() -> Self {
        let catalog: Vec<Box<dyn Indicator>> = vec![
            Box::new(Rsi::new(14)),
            Box::new(Stochastic::k(14, 3, 3)),
            Box::new(Stochastic::d(14, 3, 3)),
            Box::new(StochRsi::k(14, 14, 3, 3)),
            Box::new(StochRsi::d(14, 14, 3, 3)),
            Box::new(Bollinger::upper(20, 2.0)),
            Box::new(Bollinger::middle(20, 2.0)),
            Box::new(Bollinger::lower(20, 2.0)),
            Box::new(Cci::new(20)),
            Box::new(Mfi::new(14)),
            Box::new(Adx::adx(14)),
            Box::new(Adx::plus_di(14)),
            Box::new(Adx::minus_di(14)),
            Box::new(Vwap::new()),
            Box::new(ParabolicSar::default_params()),
            Box::new(Cmf::new(20)),
            Box::new(Supertrend::value(7, 3.0)),
            Box::new(Supertrend::direction(7, 3.0)),
            Box::new(UltimateOscillator::new(7, 14, 28)),
            Box::new(Donchian::upper(20)),
            Box::new(Donchian::lower(20)),
            Box::new(WilliamsR::new(14)),
        ];
        Self { catalog }
    }

    /// Minimum series length for every catalog column to be defined at the
    /// final row.
    pub fn min_bars(&self) -> usize {
        self.catalog
            .iter()
            .map(|ind| ind.lookback())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Compute every catalog column.
    ///
    /// Fails with `InsufficientData` below the battery floor; the frame is
    /// never silently all-NaN at the final row.
    pub fn compute(&self, series: &Series) -> Result<IndicatorFrame, EngineError> {
        let required = self.min_bars();
        if series.len() < required {
            return Err(EngineError::InsufficientData {
                required,
                actual: series.len(),
            });
        }

        let mut frame = IndicatorFrame::new(series.len());
        for indicator in &self.catalog {
            frame.insert(indicator.column(), indicator.compute(series.bars()));
        }
        Ok(frame)
    }
}

impl Default for IndicatorBattery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Series};
    use crate::frame::Column;
    use chrono::TimeZone;

    fn synthetic_series(n: usize) -> Series {
        let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.4).sin() * 6.0 + i as f64 * 0.02;
                let open = if i == 0 { close } else { close - 0.2 };
                Bar {
                    timestamp: base + chrono::Duration::hours(i as i64),
                    open,
                    high: open.max(close) + 1.0,
                    low: open.min(close) - 1.0,
                    close,
                    volume: 1200.0,
                }
            })
            .collect();
        Series::new(bars).unwrap()
    }

    #[test]
    fn battery_floor_is_stoch_rsi_bound() {
        // StochRSI %D is the slowest catalog column: 14 + 14 - 1 + 2 + 2.
        assert_eq!(IndicatorBattery::new().min_bars(), 32);
    }

    #[test]
    fn battery_rejects_short_series() {
        let battery = IndicatorBattery::new();
        let err = battery.compute(&synthetic_series(31)).unwrap_err();
        match err {
            EngineError::InsufficientData { required, actual } => {
                assert_eq!(required, 32);
                assert_eq!(actual, 31);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn battery_final_row_fully_defined_at_floor() {
        let battery = IndicatorBattery::new();
        let frame = battery.compute(&synthetic_series(32)).unwrap();
        let columns = [
            Column::Rsi,
            Column::StochK,
            Column::StochD,
            Column::StochRsiK,
            Column::StochRsiD,
            Column::BbUpper,
            Column::BbMiddle,
            Column::BbLower,
            Column::Cci,
            Column::Mfi,
            Column::Adx,
            Column::PlusDi,
            Column::MinusDi,
            Column::Vwap,
            Column::Psar,
            Column::Cmf,
            Column::SuperTrend,
            Column::SuperTrendDir,
            Column::UltimateOsc,
            Column::DonchianUpper,
            Column::DonchianLower,
            Column::WillR,
        ];
        for column in columns {
            assert!(
                frame.last(column).is_some(),
                "column {column:?} undefined at final row"
            );
        }
        assert_eq!(frame.width(), columns.len());
    }

    #[test]
    fn battery_marks_warmup_rows_undefined() {
        let battery = IndicatorBattery::new();
        let frame = battery.compute(&synthetic_series(40)).unwrap();
        // Bollinger(20) needs 20 bars; row 5 is inside every 20-bar warm-up.
        assert_eq!(frame.value(Column::BbUpper, 5), None);
        assert_eq!(frame.value(Column::StochRsiK, 5), None);
    }
}
