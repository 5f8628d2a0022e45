//! Donchian Channel — highest high / lowest low over a lookback window.
//!
//! Two series (separate Indicator instances):
//! - Upper: max(high[t-period+1..=t])
//! - Lower: min(low[t-period+1..=t])
//!
//! Lookback: period - 1.

use crate::domain::Bar;
use crate::frame::{Column, Indicator};

/// Which band of the Donchian channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonchianBand {
    Upper,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Donchian {
    period: usize,
    band: DonchianBand,
}

impl Donchian {
    pub fn upper(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Upper,
        }
    }

    pub fn lower(period: usize) -> Self {
        assert!(period >= 1, "Donchian period must be >= 1");
        Self {
            period,
            band: DonchianBand::Lower,
        }
    }
}

impl Indicator for Donchian {
    fn column(&self) -> Column {
        match self.band {
            DonchianBand::Upper => Column::DonchianUpper,
            DonchianBand::Lower => Column::DonchianLower,
        }
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        for i in (self.period - 1)..n {
            let window = &bars[i + 1 - self.period..=i];

            match self.band {
                DonchianBand::Upper => {
                    let mut max_val = f64::NEG_INFINITY;
                    let mut has_nan = false;
                    for bar in window {
                        if bar.high.is_nan() {
                            has_nan = true;
                            break;
                        }
                        if bar.high > max_val {
                            max_val = bar.high;
                        }
                    }
                    result[i] = if has_nan { f64::NAN } else { max_val };
                }
                DonchianBand::Lower => {
                    let mut min_val = f64::INFINITY;
                    let mut has_nan = false;
                    for bar in window {
                        if bar.low.is_nan() {
                            has_nan = true;
                            break;
                        }
                        if bar.low < min_val {
                            min_val = bar.low;
                        }
                    }
                    result[i] = if has_nan { f64::NAN } else { min_val };
                }
            }
        }

        result
    }
}
