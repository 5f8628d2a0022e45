//! Confluence aggregation — vote tally and the decision rule.

use crate::config::DecisionThresholds;
use crate::domain::{Action, IndicatorKind, IndicatorSignal, Vote};
use std::collections::BTreeMap;

/// Buy/sell vote counts over one evaluation.
///
/// Invariant: `buy_count + sell_count <= total_indicators` — neutral votes
/// (including insufficient-history entries) count toward neither side, and
/// no indicator can vote both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfluenceTally {
    pub buy_count: usize,
    pub sell_count: usize,
    pub total_indicators: usize,
}

impl ConfluenceTally {
    pub fn from_details(details: &BTreeMap<IndicatorKind, IndicatorSignal>) -> Self {
        let buy_count = details.values().filter(|s| s.vote == Vote::Bullish).count();
        let sell_count = details.values().filter(|s| s.vote == Vote::Bearish).count();
        Self {
            buy_count,
            sell_count,
            total_indicators: details.len(),
        }
    }
}

/// Map a tally to an action.
///
/// Priority order: strong buy, probable buy, strong sell, probable sell,
/// wait. The same cutoffs apply to both sides, so the rule is symmetric
/// and monotonic — raising the buy count with the sell count fixed never
/// downgrades the action.
pub fn decide(tally: &ConfluenceTally, thresholds: &DecisionThresholds) -> Action {
    if tally.buy_count >= thresholds.strong {
        Action::StrongBuy
    } else if tally.buy_count >= thresholds.probable {
        Action::ProbableBuy
    } else if tally.sell_count >= thresholds.strong {
        Action::StrongSell
    } else if tally.sell_count >= thresholds.probable {
        Action::ProbableSell
    } else {
        Action::Wait
    }
}
