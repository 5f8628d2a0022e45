//! Verdict — the engine's output record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ternary per-indicator classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    Bullish,
    Bearish,
    Neutral,
}

/// Final trading recommendation.
///
/// Declaration order gives the natural severity ordering, so
/// `Action::Wait < Action::ProbableBuy < Action::StrongBuy` holds via `Ord`
/// and decision-rule monotonicity is directly testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    StrongSell,
    ProbableSell,
    Wait,
    ProbableBuy,
    StrongBuy,
}

/// Identity of one voting indicator.
///
/// This is the key of the verdict's detail map. Multi-column indicators
/// (Bollinger, Donchian, the ADX family) vote once under a single kind even
/// though they occupy several frame columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKind {
    Rsi,
    Mfi,
    StochK,
    StochRsiK,
    Crsi,
    Cci,
    WillR,
    UltimateOsc,
    Bollinger,
    Donchian,
    Cmf,
    SuperTrend,
    Vwap,
    Psar,
    AdxTrend,
}

/// Latest value and vote for one indicator.
///
/// `value: None` means the indicator had insufficient history at the final
/// row; such entries always carry `Vote::Neutral` and are distinguishable
/// from a genuine neutral reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSignal {
    pub value: Option<f64>,
    pub vote: Vote,
}

impl IndicatorSignal {
    pub fn insufficient() -> Self {
        Self {
            value: None,
            vote: Vote::Neutral,
        }
    }

    pub fn new(value: f64, vote: Vote) -> Self {
        Self {
            value: Some(value),
            vote,
        }
    }
}

/// The assembled recommendation: action, scores, exit levels, and the full
/// per-indicator detail map for audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub action: Action,
    pub buy_score: usize,
    pub sell_score: usize,
    pub total_indicators: usize,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    /// blake3 hex digest of the engine configuration that produced this
    /// verdict, for reproducibility.
    pub config_fingerprint: String,
    pub details: BTreeMap<IndicatorKind, IndicatorSignal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_ordering_is_monotonic() {
        assert!(Action::StrongSell < Action::ProbableSell);
        assert!(Action::ProbableSell < Action::Wait);
        assert!(Action::Wait < Action::ProbableBuy);
        assert!(Action::ProbableBuy < Action::StrongBuy);
    }

    #[test]
    fn insufficient_signal_is_neutral() {
        let sig = IndicatorSignal::insufficient();
        assert_eq!(sig.vote, Vote::Neutral);
        assert!(sig.value.is_none());
    }

    #[test]
    fn verdict_serialization_roundtrip() {
        let mut details = BTreeMap::new();
        details.insert(IndicatorKind::Rsi, IndicatorSignal::new(28.0, Vote::Bullish));
        details.insert(IndicatorKind::Crsi, IndicatorSignal::insufficient());
        let verdict = Verdict {
            action: Action::ProbableBuy,
            buy_score: 5,
            sell_score: 0,
            total_indicators: 15,
            entry_price: 2400.0,
            take_profit: 2445.0,
            stop_loss: 2378.0,
            config_fingerprint: "deadbeef".to_string(),
            details,
        };
        let json = serde_json::to_string(&verdict).unwrap();
        let deser: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.action, Action::ProbableBuy);
        assert_eq!(deser.details.len(), 2);
        assert!(deser.details[&IndicatorKind::Crsi].value.is_none());
    }
}
