//! ADX family — Average Directional Index and the directional lines (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Three outputs, one instance each (band-instance pattern): `Adx`,
//! `PlusDi`, `MinusDi`.
//!
//! Lookback: 2 * period for ADX (period for DI smoothing, then period for
//! ADX smoothing); period for the DI lines.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};
use crate::indicators::atr::{true_range, wilder_smooth};

/// Which series of the ADX family to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxOutput {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    output: AdxOutput,
}

impl Adx {
    pub fn adx(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            output: AdxOutput::Adx,
        }
    }

    pub fn plus_di(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            output: AdxOutput::PlusDi,
        }
    }

    pub fn minus_di(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            output: AdxOutput::MinusDi,
        }
    }

    /// Smoothed +DI and -DI series.
    fn directional_lines(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let n = bars.len();
        let mut plus_di = vec![f64::NAN; n];
        let mut minus_di = vec![f64::NAN; n];

        if n < 2 {
            return (plus_di, minus_di);
        }

        let mut plus_dm = vec![f64::NAN; n];
        let mut minus_dm = vec![f64::NAN; n];

        for i in 1..n {
            if bars[i].high.is_nan()
                || bars[i].low.is_nan()
                || bars[i - 1].high.is_nan()
                || bars[i - 1].low.is_nan()
            {
                continue;
            }

            let high_diff = bars[i].high - bars[i - 1].high;
            let low_diff = bars[i - 1].low - bars[i].low;

            plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 {
                high_diff
            } else {
                0.0
            };
            minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 {
                low_diff
            } else {
                0.0
            };
        }

        let mut tr = true_range(bars);
        if !tr.is_empty() {
            // TR[0] has no previous close; align the seed with the DM series.
            tr[0] = f64::NAN;
        }
        let smooth_tr = wilder_smooth(&tr, self.period);
        let smooth_plus_dm = wilder_smooth(&plus_dm, self.period);
        let smooth_minus_dm = wilder_smooth(&minus_dm, self.period);

        for i in 0..n {
            if smooth_tr[i].is_nan()
                || smooth_plus_dm[i].is_nan()
                || smooth_minus_dm[i].is_nan()
                || smooth_tr[i] == 0.0
            {
                continue;
            }
            plus_di[i] = 100.0 * smooth_plus_dm[i] / smooth_tr[i];
            minus_di[i] = 100.0 * smooth_minus_dm[i] / smooth_tr[i];
        }

        (plus_di, minus_di)
    }
}

impl Indicator for Adx {
    fn column(&self) -> Column {
        match self.output {
            AdxOutput::Adx => Column::Adx,
            AdxOutput::PlusDi => Column::PlusDi,
            AdxOutput::MinusDi => Column::MinusDi,
        }
    }

    fn lookback(&self) -> usize {
        match self.output {
            AdxOutput::Adx => 2 * self.period,
            AdxOutput::PlusDi | AdxOutput::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (plus_di, minus_di) = self.directional_lines(bars);

        match self.output {
            AdxOutput::PlusDi => plus_di,
            AdxOutput::MinusDi => minus_di,
            AdxOutput::Adx => {
                let n = bars.len();
                let mut dx = vec![f64::NAN; n];
                for i in 0..n {
                    if plus_di[i].is_nan() || minus_di[i].is_nan() {
                        continue;
                    }
                    let di_sum = plus_di[i] + minus_di[i];
                    dx[i] = if di_sum == 0.0 {
                        0.0
                    } else {
                        100.0 * (plus_di[i] - minus_di[i]).abs() / di_sum
                    };
                }
                wilder_smooth(&dx, self.period)
            }
        }
    }
}
