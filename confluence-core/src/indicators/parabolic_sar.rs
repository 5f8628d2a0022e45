//! Parabolic SAR — Wilder's acceleration factor system.
//!
//! Inherently sequential/stateful: maintains direction, extreme point (EP),
//! and acceleration factor (AF).
//!
//! Parameters: af_start (default 0.02), af_step (default 0.02), af_max
//! (default 0.20).
//! Lookback: 1 (needs at least 2 bars to start).

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    af_start: f64,
    af_step: f64,
    af_max: f64,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        assert!(af_start > 0.0, "AF start must be > 0");
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_start, "AF max must be >= AF start");
        Self {
            af_start,
            af_step,
            af_max,
        }
    }

    /// Default parameters: 0.02, 0.02, 0.20
    pub fn default_params() -> Self {
        Self::new(0.02, 0.02, 0.20)
    }
}

impl Indicator for ParabolicSar {
    fn column(&self) -> Column {
        Column::Psar
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < 2 {
            return result;
        }

        if bars[0].high.is_nan()
            || bars[0].low.is_nan()
            || bars[1].high.is_nan()
            || bars[1].low.is_nan()
        {
            return result;
        }

        // Initial direction from the first two bars.
        let mut is_long = bars[1].close >= bars[0].close;
        let mut af = self.af_start;
        let mut ep: f64;
        let mut sar: f64;

        if is_long {
            sar = bars[0].low;
            ep = bars[1].high;
        } else {
            sar = bars[0].high;
            ep = bars[1].low;
        }

        result[1] = sar;

        for i in 2..n {
            if bars[i].high.is_nan() || bars[i].low.is_nan() || bars[i].close.is_nan() {
                result[i] = f64::NAN;
                continue;
            }

            let mut new_sar = sar + af * (ep - sar);

            if is_long {
                // In uptrend: SAR must not be above the two previous lows.
                let prev_low1 = bars[i - 1].low;
                let prev_low2 = bars[i - 2].low;
                if !prev_low1.is_nan() {
                    new_sar = new_sar.min(prev_low1);
                }
                if !prev_low2.is_nan() {
                    new_sar = new_sar.min(prev_low2);
                }

                if bars[i].low < new_sar {
                    // Reverse to short; SAR becomes the previous EP.
                    is_long = false;
                    new_sar = ep;
                    ep = bars[i].low;
                    af = self.af_start;
                } else if bars[i].high > ep {
                    ep = bars[i].high;
                    af = (af + self.af_step).min(self.af_max);
                }
            } else {
                // In downtrend: SAR must not be below the two previous highs.
                let prev_high1 = bars[i - 1].high;
                let prev_high2 = bars[i - 2].high;
                if !prev_high1.is_nan() {
                    new_sar = new_sar.max(prev_high1);
                }
                if !prev_high2.is_nan() {
                    new_sar = new_sar.max(prev_high2);
                }

                if bars[i].high > new_sar {
                    // Reverse to long; SAR becomes the previous EP.
                    is_long = true;
                    new_sar = ep;
                    ep = bars[i].high;
                    af = self.af_start;
                } else if bars[i].low < ep {
                    ep = bars[i].low;
                    af = (af + self.af_step).min(self.af_max);
                }
            }

            sar = new_sar;
            result[i] = sar;
        }

        result
    }
}
