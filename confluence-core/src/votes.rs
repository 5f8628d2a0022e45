//! Vote resolution — the fixed threshold table applied to the final row.
//!
//! Each voting indicator reads its latest defined value (or the latest
//! close against its latest band/level) and classifies it bullish, bearish,
//! or neutral. The bullish and bearish bands of every rule are disjoint, so
//! no indicator can ever vote both ways in one evaluation.
//!
//! An indicator whose inputs are undefined at the final row (inside its
//! warm-up) contributes `IndicatorSignal::insufficient()`: a neutral vote
//! explicitly flagged in the detail map, never a silent omission.

use crate::domain::{IndicatorKind, IndicatorSignal, Vote};
use crate::frame::{Column, IndicatorFrame};
use std::collections::BTreeMap;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const MFI_OVERSOLD: f64 = 20.0;
pub const MFI_OVERBOUGHT: f64 = 80.0;
pub const STOCH_OVERSOLD: f64 = 20.0;
pub const STOCH_OVERBOUGHT: f64 = 80.0;
pub const CRSI_OVERSOLD: f64 = 30.0;
pub const CRSI_OVERBOUGHT: f64 = 70.0;
pub const CCI_OVERSOLD: f64 = -100.0;
pub const CCI_OVERBOUGHT: f64 = 100.0;
pub const WILLR_OVERSOLD: f64 = -80.0;
pub const WILLR_OVERBOUGHT: f64 = -20.0;
pub const UO_OVERSOLD: f64 = 30.0;
pub const UO_OVERBOUGHT: f64 = 70.0;
/// Minimum trend strength before the directional vote counts at all.
pub const ADX_GATE: f64 = 25.0;

/// Band rule: value at or below the low bound is bullish, at or above the
/// high bound is bearish.
fn band_vote(value: f64, low: f64, high: f64) -> Vote {
    if value <= low {
        Vote::Bullish
    } else if value >= high {
        Vote::Bearish
    } else {
        Vote::Neutral
    }
}

/// Resolve one indicator's vote from the frame's final row.
pub fn resolve(kind: IndicatorKind, frame: &IndicatorFrame, price: f64) -> IndicatorSignal {
    match kind {
        IndicatorKind::Rsi => oscillator(frame, Column::Rsi, RSI_OVERSOLD, RSI_OVERBOUGHT),
        IndicatorKind::Mfi => oscillator(frame, Column::Mfi, MFI_OVERSOLD, MFI_OVERBOUGHT),
        IndicatorKind::StochK => {
            oscillator(frame, Column::StochK, STOCH_OVERSOLD, STOCH_OVERBOUGHT)
        }
        IndicatorKind::StochRsiK => {
            oscillator(frame, Column::StochRsiK, STOCH_OVERSOLD, STOCH_OVERBOUGHT)
        }
        IndicatorKind::Crsi => oscillator(frame, Column::Crsi, CRSI_OVERSOLD, CRSI_OVERBOUGHT),
        IndicatorKind::Cci => oscillator(frame, Column::Cci, CCI_OVERSOLD, CCI_OVERBOUGHT),
        IndicatorKind::WillR => oscillator(frame, Column::WillR, WILLR_OVERSOLD, WILLR_OVERBOUGHT),
        IndicatorKind::UltimateOsc => {
            oscillator(frame, Column::UltimateOsc, UO_OVERSOLD, UO_OVERBOUGHT)
        }
        IndicatorKind::Bollinger => {
            channel(frame, price, Column::BbLower, Column::BbUpper)
        }
        IndicatorKind::Donchian => {
            channel(frame, price, Column::DonchianLower, Column::DonchianUpper)
        }
        IndicatorKind::Cmf => match frame.last(Column::Cmf) {
            None => IndicatorSignal::insufficient(),
            Some(cmf) => {
                let vote = if cmf > 0.0 {
                    Vote::Bullish
                } else if cmf < 0.0 {
                    Vote::Bearish
                } else {
                    Vote::Neutral
                };
                IndicatorSignal::new(cmf, vote)
            }
        },
        IndicatorKind::SuperTrend => match frame.last(Column::SuperTrendDir) {
            None => IndicatorSignal::insufficient(),
            Some(dir) => {
                let vote = if dir == 1.0 {
                    Vote::Bullish
                } else if dir == -1.0 {
                    Vote::Bearish
                } else {
                    Vote::Neutral
                };
                IndicatorSignal::new(dir, vote)
            }
        },
        IndicatorKind::Vwap => level(frame, price, Column::Vwap),
        IndicatorKind::Psar => level(frame, price, Column::Psar),
        IndicatorKind::AdxTrend => {
            let (Some(adx), Some(plus_di), Some(minus_di)) = (
                frame.last(Column::Adx),
                frame.last(Column::PlusDi),
                frame.last(Column::MinusDi),
            ) else {
                return IndicatorSignal::insufficient();
            };
            // Below the gate the trend is too weak to count; a DI tie at
            // or above the gate also contributes nothing.
            let vote = if adx < ADX_GATE {
                Vote::Neutral
            } else if plus_di > minus_di {
                Vote::Bullish
            } else if minus_di > plus_di {
                Vote::Bearish
            } else {
                Vote::Neutral
            };
            IndicatorSignal::new(adx, vote)
        }
    }
}

/// Resolve every requested indicator into the verdict's detail map.
pub fn resolve_votes(
    frame: &IndicatorFrame,
    price: f64,
    kinds: &[IndicatorKind],
) -> BTreeMap<IndicatorKind, IndicatorSignal> {
    kinds
        .iter()
        .map(|&kind| (kind, resolve(kind, frame, price)))
        .collect()
}

fn oscillator(frame: &IndicatorFrame, column: Column, low: f64, high: f64) -> IndicatorSignal {
    match frame.last(column) {
        None => IndicatorSignal::insufficient(),
        Some(value) => IndicatorSignal::new(value, band_vote(value, low, high)),
    }
}

/// Price against a channel: at or beyond the lower band is bullish, at or
/// beyond the upper band is bearish. The lower band is reported as the
/// headline value; both bands stay available in the frame.
fn channel(
    frame: &IndicatorFrame,
    price: f64,
    lower_col: Column,
    upper_col: Column,
) -> IndicatorSignal {
    let (Some(lower), Some(upper)) = (frame.last(lower_col), frame.last(upper_col)) else {
        return IndicatorSignal::insufficient();
    };
    let vote = if price <= lower {
        Vote::Bullish
    } else if price >= upper {
        Vote::Bearish
    } else {
        Vote::Neutral
    };
    IndicatorSignal::new(lower, vote)
}

/// Price against a single level (VWAP, PSAR): above is bullish, below is
/// bearish.
fn level(frame: &IndicatorFrame, price: f64, column: Column) -> IndicatorSignal {
    match frame.last(column) {
        None => IndicatorSignal::insufficient(),
        Some(value) => {
            let vote = if value < price {
                Vote::Bullish
            } else if value > price {
                Vote::Bearish
            } else {
                Vote::Neutral
            };
            IndicatorSignal::new(value, vote)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(pairs: &[(Column, f64)]) -> IndicatorFrame {
        let mut frame = IndicatorFrame::new(1);
        for &(column, value) in pairs {
            frame.insert(column, vec![value]);
        }
        frame
    }

    #[test]
    fn rsi_band_votes() {
        let frame = frame_with(&[(Column::Rsi, 30.0)]);
        assert_eq!(resolve(IndicatorKind::Rsi, &frame, 100.0).vote, Vote::Bullish);

        let frame = frame_with(&[(Column::Rsi, 70.0)]);
        assert_eq!(resolve(IndicatorKind::Rsi, &frame, 100.0).vote, Vote::Bearish);

        let frame = frame_with(&[(Column::Rsi, 50.0)]);
        assert_eq!(resolve(IndicatorKind::Rsi, &frame, 100.0).vote, Vote::Neutral);
    }

    #[test]
    fn willr_band_votes() {
        let frame = frame_with(&[(Column::WillR, -85.0)]);
        assert_eq!(resolve(IndicatorKind::WillR, &frame, 100.0).vote, Vote::Bullish);

        let frame = frame_with(&[(Column::WillR, -10.0)]);
        assert_eq!(resolve(IndicatorKind::WillR, &frame, 100.0).vote, Vote::Bearish);

        let frame = frame_with(&[(Column::WillR, -50.0)]);
        assert_eq!(resolve(IndicatorKind::WillR, &frame, 100.0).vote, Vote::Neutral);
    }

    #[test]
    fn cci_band_votes() {
        let frame = frame_with(&[(Column::Cci, -100.0)]);
        assert_eq!(resolve(IndicatorKind::Cci, &frame, 100.0).vote, Vote::Bullish);

        let frame = frame_with(&[(Column::Cci, 100.0)]);
        assert_eq!(resolve(IndicatorKind::Cci, &frame, 100.0).vote, Vote::Bearish);
    }

    #[test]
    fn bollinger_channel_votes() {
        let frame = frame_with(&[(Column::BbLower, 95.0), (Column::BbUpper, 105.0)]);
        assert_eq!(
            resolve(IndicatorKind::Bollinger, &frame, 94.0).vote,
            Vote::Bullish
        );
        assert_eq!(
            resolve(IndicatorKind::Bollinger, &frame, 106.0).vote,
            Vote::Bearish
        );
        assert_eq!(
            resolve(IndicatorKind::Bollinger, &frame, 100.0).vote,
            Vote::Neutral
        );
        // Headline value is the lower band.
        assert_eq!(
            resolve(IndicatorKind::Bollinger, &frame, 100.0).value,
            Some(95.0)
        );
    }

    #[test]
    fn vwap_and_psar_level_votes() {
        let frame = frame_with(&[(Column::Vwap, 99.0), (Column::Psar, 101.0)]);
        assert_eq!(resolve(IndicatorKind::Vwap, &frame, 100.0).vote, Vote::Bullish);
        assert_eq!(resolve(IndicatorKind::Psar, &frame, 100.0).vote, Vote::Bearish);
    }

    #[test]
    fn supertrend_direction_votes() {
        let frame = frame_with(&[(Column::SuperTrendDir, 1.0)]);
        assert_eq!(
            resolve(IndicatorKind::SuperTrend, &frame, 100.0).vote,
            Vote::Bullish
        );
        let frame = frame_with(&[(Column::SuperTrendDir, -1.0)]);
        assert_eq!(
            resolve(IndicatorKind::SuperTrend, &frame, 100.0).vote,
            Vote::Bearish
        );
    }

    #[test]
    fn cmf_sign_votes() {
        let frame = frame_with(&[(Column::Cmf, 0.2)]);
        assert_eq!(resolve(IndicatorKind::Cmf, &frame, 100.0).vote, Vote::Bullish);
        let frame = frame_with(&[(Column::Cmf, -0.2)]);
        assert_eq!(resolve(IndicatorKind::Cmf, &frame, 100.0).vote, Vote::Bearish);
        let frame = frame_with(&[(Column::Cmf, 0.0)]);
        assert_eq!(resolve(IndicatorKind::Cmf, &frame, 100.0).vote, Vote::Neutral);
    }

    #[test]
    fn adx_gate_suppresses_directional_vote() {
        // Strong +DI lead, but ADX below the gate → no vote.
        let frame = frame_with(&[
            (Column::Adx, 24.9),
            (Column::PlusDi, 40.0),
            (Column::MinusDi, 10.0),
        ]);
        assert_eq!(
            resolve(IndicatorKind::AdxTrend, &frame, 100.0).vote,
            Vote::Neutral
        );
    }

    #[test]
    fn adx_gated_vote_follows_di_lead() {
        let frame = frame_with(&[
            (Column::Adx, 30.0),
            (Column::PlusDi, 40.0),
            (Column::MinusDi, 10.0),
        ]);
        let signal = resolve(IndicatorKind::AdxTrend, &frame, 100.0);
        assert_eq!(signal.vote, Vote::Bullish);
        assert_eq!(signal.value, Some(30.0)); // headline is trend strength

        let frame = frame_with(&[
            (Column::Adx, 30.0),
            (Column::PlusDi, 10.0),
            (Column::MinusDi, 40.0),
        ]);
        assert_eq!(
            resolve(IndicatorKind::AdxTrend, &frame, 100.0).vote,
            Vote::Bearish
        );
    }

    #[test]
    fn adx_di_tie_is_neutral() {
        let frame = frame_with(&[
            (Column::Adx, 30.0),
            (Column::PlusDi, 25.0),
            (Column::MinusDi, 25.0),
        ]);
        assert_eq!(
            resolve(IndicatorKind::AdxTrend, &frame, 100.0).vote,
            Vote::Neutral
        );
    }

    #[test]
    fn undefined_value_flags_insufficient_history() {
        let frame = frame_with(&[(Column::Rsi, f64::NAN)]);
        let signal = resolve(IndicatorKind::Rsi, &frame, 100.0);
        assert_eq!(signal.vote, Vote::Neutral);
        assert!(signal.value.is_none());

        // Missing column behaves the same as a NaN final row.
        let signal = resolve(IndicatorKind::Crsi, &frame, 100.0);
        assert_eq!(signal.vote, Vote::Neutral);
        assert!(signal.value.is_none());
    }

    #[test]
    fn resolve_votes_covers_every_requested_kind() {
        use crate::config::IndicatorPreset;
        let frame = IndicatorFrame::new(1);
        let details = resolve_votes(&frame, 100.0, IndicatorPreset::Full.kinds());
        assert_eq!(details.len(), 15);
        assert!(details.values().all(|s| s.vote == Vote::Neutral));
    }

    #[test]
    fn band_bounds_are_disjoint() {
        // Each rule's bullish bound sits strictly below its bearish bound,
        // so no value can land in both bands.
        assert!(RSI_OVERSOLD < RSI_OVERBOUGHT);
        assert!(MFI_OVERSOLD < MFI_OVERBOUGHT);
        assert!(STOCH_OVERSOLD < STOCH_OVERBOUGHT);
        assert!(CRSI_OVERSOLD < CRSI_OVERBOUGHT);
        assert!(CCI_OVERSOLD < CCI_OVERBOUGHT);
        assert!(WILLR_OVERSOLD < WILLR_OVERBOUGHT);
        assert!(UO_OVERSOLD < UO_OVERBOUGHT);
    }
}
