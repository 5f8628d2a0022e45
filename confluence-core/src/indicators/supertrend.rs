//! SuperTrend — ATR-based directional indicator.
//!
//! Inherently sequential/stateful: direction flips between support and
//! resistance based on close vs band comparisons.
//!
//! Two outputs (separate Indicator instances):
//! - Value: the active band — lower band (support) when trending up, upper
//!   band (resistance) when trending down.
//! - Direction: +1 while trending up, -1 while trending down.
//!
//! Lookback: atr_period (same as ATR since it depends on ATR).

use crate::domain::Bar;
use crate::frame::{Column, Indicator};
use crate::indicators::atr::average_true_range;

/// Which SuperTrend series to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertrendOutput {
    Value,
    Direction,
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    output: SupertrendOutput,
}

impl Supertrend {
    pub fn value(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, SupertrendOutput::Value)
    }

    pub fn direction(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, SupertrendOutput::Direction)
    }

    fn new(period: usize, multiplier: f64, output: SupertrendOutput) -> Self {
        assert!(period >= 1, "Supertrend period must be >= 1");
        Self {
            period,
            multiplier,
            output,
        }
    }
}

impl Indicator for Supertrend {
    fn column(&self) -> Column {
        match self.output {
            SupertrendOutput::Value => Column::SuperTrend,
            SupertrendOutput::Direction => Column::SuperTrendDir,
        }
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        let atr = average_true_range(bars, self.period);

        let start = match atr.iter().position(|v| !v.is_nan()) {
            Some(idx) => idx,
            None => return result,
        };

        // Initialize bands at the first ATR-valid bar; start trending up.
        let hl2 = (bars[start].high + bars[start].low) / 2.0;
        let mut upper_band = hl2 + self.multiplier * atr[start];
        let mut lower_band = hl2 - self.multiplier * atr[start];
        let mut trending_up = true;
        result[start] = match self.output {
            SupertrendOutput::Value => lower_band,
            SupertrendOutput::Direction => 1.0,
        };

        for i in (start + 1)..n {
            if atr[i].is_nan()
                || bars[i].close.is_nan()
                || bars[i].high.is_nan()
                || bars[i].low.is_nan()
            {
                result[i] = f64::NAN;
                continue;
            }

            let hl2 = (bars[i].high + bars[i].low) / 2.0;
            let basic_upper = hl2 + self.multiplier * atr[i];
            let basic_lower = hl2 - self.multiplier * atr[i];

            // Upper band: can only decrease (tighten resistance).
            let prev_close = bars[i - 1].close;
            let new_upper = if !prev_close.is_nan() && prev_close <= upper_band {
                basic_upper.min(upper_band)
            } else {
                basic_upper
            };

            // Lower band: can only increase (tighten support).
            let new_lower = if !prev_close.is_nan() && prev_close >= lower_band {
                basic_lower.max(lower_band)
            } else {
                basic_lower
            };

            upper_band = new_upper;
            lower_band = new_lower;

            // Direction flip
            if trending_up && bars[i].close < lower_band {
                trending_up = false;
            } else if !trending_up && bars[i].close > upper_band {
                trending_up = true;
            }

            result[i] = match self.output {
                SupertrendOutput::Value => {
                    if trending_up {
                        lower_band
                    } else {
                        upper_band
                    }
                }
                SupertrendOutput::Direction => {
                    if trending_up {
                        1.0
                    } else {
                        -1.0
                    }
                }
            };
        }

        result
    }
}
