//! Engine configuration — the observed deployment variants collapsed into
//! one parameterized value object.
//!
//! Two presets ship: the full 15-indicator battery and the original
//! 8-indicator core. Everything else that differed between the deployed
//! variants (CRSI sub-windows, decision cutoffs, exit offsets) is a field
//! here, not a separate code path.

use crate::domain::IndicatorKind;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Which indicator set votes, and therefore the score denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorPreset {
    /// All 15 voting indicators.
    Full,
    /// The original 8: RSI, MFI, Stochastic %K, Stochastic RSI %K, CRSI,
    /// CCI, Bollinger, ADX-gated trend.
    Core,
}

const FULL_KINDS: [IndicatorKind; 15] = [
    IndicatorKind::Rsi,
    IndicatorKind::Mfi,
    IndicatorKind::StochK,
    IndicatorKind::StochRsiK,
    IndicatorKind::Crsi,
    IndicatorKind::Cci,
    IndicatorKind::WillR,
    IndicatorKind::UltimateOsc,
    IndicatorKind::Bollinger,
    IndicatorKind::Donchian,
    IndicatorKind::Cmf,
    IndicatorKind::SuperTrend,
    IndicatorKind::Vwap,
    IndicatorKind::Psar,
    IndicatorKind::AdxTrend,
];

const CORE_KINDS: [IndicatorKind; 8] = [
    IndicatorKind::Rsi,
    IndicatorKind::Mfi,
    IndicatorKind::StochK,
    IndicatorKind::StochRsiK,
    IndicatorKind::Crsi,
    IndicatorKind::Cci,
    IndicatorKind::Bollinger,
    IndicatorKind::AdxTrend,
];

impl IndicatorPreset {
    pub fn kinds(&self) -> &'static [IndicatorKind] {
        match self {
            IndicatorPreset::Full => &FULL_KINDS,
            IndicatorPreset::Core => &CORE_KINDS,
        }
    }

    pub fn total(&self) -> usize {
        self.kinds().len()
    }
}

/// CRSI sub-window lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsiParams {
    /// RSI period shared by the price and streak sub-signals.
    pub rsi_period: usize,
    /// Rolling window the movement signs are summed over.
    pub streak_window: usize,
    /// Trailing bars the return percentile ranks against.
    pub rank_window: usize,
}

impl Default for CrsiParams {
    fn default() -> Self {
        Self {
            rsi_period: 3,
            streak_window: 2,
            rank_window: 100,
        }
    }
}

/// Score cutoffs for the decision rule, shared verbatim by the buy and
/// sell sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    pub probable: usize,
    pub strong: usize,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            probable: 5,
            strong: 7,
        }
    }
}

/// Fixed-point exit offsets around the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitOffsets {
    pub take_profit: f64,
    pub stop_loss: f64,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceConfig {
    pub preset: IndicatorPreset,
    pub crsi: CrsiParams,
    pub decision: DecisionThresholds,
    pub exits: ExitOffsets,
}

impl ConfluenceConfig {
    /// Full 15-indicator battery, 45-point target / 22-point stop.
    pub fn full() -> Self {
        Self {
            preset: IndicatorPreset::Full,
            crsi: CrsiParams::default(),
            decision: DecisionThresholds::default(),
            exits: ExitOffsets {
                take_profit: 45.0,
                stop_loss: 22.0,
            },
        }
    }

    /// Original 8-indicator core, 45-point target / 18-point stop.
    pub fn core() -> Self {
        Self {
            preset: IndicatorPreset::Core,
            crsi: CrsiParams::default(),
            decision: DecisionThresholds::default(),
            exits: ExitOffsets {
                take_profit: 45.0,
                stop_loss: 18.0,
            },
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.crsi.rsi_period < 1 {
            return Err(EngineError::InvalidConfig(
                "crsi.rsi_period must be >= 1".into(),
            ));
        }
        if self.crsi.streak_window < 1 {
            return Err(EngineError::InvalidConfig(
                "crsi.streak_window must be >= 1".into(),
            ));
        }
        if self.crsi.rank_window < 2 {
            return Err(EngineError::InvalidConfig(
                "crsi.rank_window must be >= 2".into(),
            ));
        }
        if self.decision.probable < 1 {
            return Err(EngineError::InvalidConfig(
                "decision.probable must be >= 1".into(),
            ));
        }
        if self.decision.probable > self.decision.strong {
            return Err(EngineError::InvalidConfig(
                "decision.probable must not exceed decision.strong".into(),
            ));
        }
        if self.decision.strong > self.preset.total() {
            return Err(EngineError::InvalidConfig(format!(
                "decision.strong ({}) exceeds the preset's indicator count ({})",
                self.decision.strong,
                self.preset.total()
            )));
        }
        if !self.exits.take_profit.is_finite() || self.exits.take_profit <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "exits.take_profit must be a positive finite offset".into(),
            ));
        }
        if !self.exits.stop_loss.is_finite() || self.exits.stop_loss <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "exits.stop_loss must be a positive finite offset".into(),
            ));
        }
        Ok(())
    }

    /// blake3 hex digest of the canonical JSON encoding.
    ///
    /// Struct field order is fixed, so serde_json output is deterministic
    /// and the digest identifies the exact configuration of a run.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).expect("ConfluenceConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        Self::full()
    }
}
