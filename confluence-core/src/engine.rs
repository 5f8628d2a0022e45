//! Engine entry point — validation, battery, CRSI, votes, verdict.
//!
//! One synchronous pass per invocation, no shared state: the engine is
//! safe to call concurrently on independent series.

use crate::battery::IndicatorBattery;
use crate::config::ConfluenceConfig;
use crate::confluence::{decide, ConfluenceTally};
use crate::crsi::CrsiCalculator;
use crate::domain::{Series, Verdict};
use crate::error::EngineError;
use crate::frame::IndicatorFrame;
use crate::votes::resolve_votes;

/// Full engine output: the verdict plus the complete indicator frame for
/// external charting.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub verdict: Verdict,
    pub frame: IndicatorFrame,
}

pub struct ConfluenceEngine {
    config: ConfluenceConfig,
    battery: IndicatorBattery,
}

impl ConfluenceEngine {
    pub fn new(config: ConfluenceConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            battery: IndicatorBattery::new(),
        })
    }

    pub fn config(&self) -> &ConfluenceConfig {
        &self.config
    }

    /// Run the full pipeline over one series.
    ///
    /// Fails fast on series shorter than the battery floor. A series long
    /// enough for the battery but short of the CRSI rank window still
    /// produces a verdict — CRSI degrades to a flagged neutral vote.
    pub fn analyze(&self, series: &Series) -> Result<Analysis, EngineError> {
        let mut frame = self.battery.compute(series)?;
        CrsiCalculator::new(self.config.crsi).extend(&mut frame, series.bars());

        let entry_price = series.last().close;
        let details = resolve_votes(&frame, entry_price, self.config.preset.kinds());
        let tally = ConfluenceTally::from_details(&details);
        let action = decide(&tally, &self.config.decision);

        let verdict = Verdict {
            action,
            buy_score: tally.buy_count,
            sell_score: tally.sell_count,
            total_indicators: tally.total_indicators,
            entry_price,
            take_profit: entry_price + self.config.exits.take_profit,
            stop_loss: entry_price - self.config.exits.stop_loss,
            config_fingerprint: self.config.fingerprint(),
            details,
        };

        Ok(Analysis { verdict, frame })
    }
}

impl Default for ConfluenceEngine {
    fn default() -> Self {
        Self {
            config: ConfluenceConfig::full(),
            battery: IndicatorBattery::new(),
        }
    }
}
