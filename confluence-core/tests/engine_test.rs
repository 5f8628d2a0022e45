//! Integration tests for the full analysis pipeline.
//!
//! Scenarios:
//! 1. Deep-oversold series (long decline, with and without a flat tail)
//!    produce a buy-side verdict with strong confluence.
//! 2. A constant +1/bar uptrend turns every trend-following vote bullish
//!    and the directional block contributes no sell votes.
//! 3. CRSI history edge: 99 bars insufficient, 100 bars defined.
//! 4. Malformed input and too-short series fail with typed errors.
//! 5. Long well-formed series define every frame column at the final row.

use chrono::TimeZone;
use confluence_core::config::ConfluenceConfig;
use confluence_core::domain::{Action, Bar, IndicatorKind, Series, SeriesError, Vote};
use confluence_core::engine::ConfluenceEngine;
use confluence_core::error::EngineError;
use confluence_core::frame::Column;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1500.0,
            }
        })
        .collect()
}

fn series_from_closes(closes: &[f64]) -> Series {
    Series::new(bars_from_closes(closes)).unwrap()
}

// ──────────────────────────────────────────────
// 1. Oversold confluence
// ──────────────────────────────────────────────

#[test]
fn deep_decline_yields_buy_verdict() {
    // 150 bars falling 2 points each: every mean-reversion oscillator
    // pins oversold by the final row.
    let closes: Vec<f64> = (0..150).map(|i| 500.0 - 2.0 * i as f64).collect();
    let engine = ConfluenceEngine::default();
    let verdict = engine.analyze(&series_from_closes(&closes)).unwrap().verdict;

    assert!(
        verdict.buy_score >= 5,
        "expected strong buy confluence, got {} ({:?})",
        verdict.buy_score,
        verdict.details
    );
    assert!(
        matches!(verdict.action, Action::ProbableBuy | Action::StrongBuy),
        "expected a buy-side action, got {:?}",
        verdict.action
    );

    // The canonical oversold reads.
    for kind in [IndicatorKind::Rsi, IndicatorKind::Mfi, IndicatorKind::StochK] {
        assert_eq!(
            verdict.details[&kind].vote,
            Vote::Bullish,
            "{kind:?} should read oversold"
        );
    }
}

#[test]
fn decline_then_flat_still_reads_oversold() {
    let mut closes: Vec<f64> = (0..149).map(|i| 500.0 - 2.0 * i as f64).collect();
    closes.push(*closes.last().unwrap()); // flat final bar
    let engine = ConfluenceEngine::default();
    let verdict = engine.analyze(&series_from_closes(&closes)).unwrap().verdict;

    assert!(
        verdict.buy_score >= 5,
        "expected buy confluence after decline-then-flat, got {}",
        verdict.buy_score
    );
    assert!(matches!(
        verdict.action,
        Action::ProbableBuy | Action::StrongBuy
    ));
}

// ──────────────────────────────────────────────
// 2. Monotonic uptrend
// ──────────────────────────────────────────────

#[test]
fn monotonic_uptrend_directional_votes_are_bullish() {
    // Constant +1 unit per bar, constant volume.
    let closes: Vec<f64> = (0..150).map(|i| 100.0 + i as f64).collect();
    let engine = ConfluenceEngine::default();
    let analysis = engine.analyze(&series_from_closes(&closes)).unwrap();
    let verdict = &analysis.verdict;
    let frame = &analysis.frame;
    let price = *closes.last().unwrap();

    // Trend state at the final row.
    let adx = frame.last(Column::Adx).unwrap();
    let plus_di = frame.last(Column::PlusDi).unwrap();
    let minus_di = frame.last(Column::MinusDi).unwrap();
    assert!(adx >= 25.0, "ADX should exceed the gate, got {adx}");
    assert!(plus_di > minus_di, "+DI should lead in an uptrend");
    assert_eq!(frame.last(Column::SuperTrendDir), Some(1.0));
    assert!(frame.last(Column::Vwap).unwrap() < price);
    assert!(frame.last(Column::Psar).unwrap() < price);

    // Every trend/flow-following indicator votes bullish; the directional
    // block contributes no sell votes. (The mean-reversion oscillators
    // legitimately read overbought here — that is what they measure.)
    let directional = [
        IndicatorKind::SuperTrend,
        IndicatorKind::Vwap,
        IndicatorKind::Psar,
        IndicatorKind::AdxTrend,
        IndicatorKind::Cmf,
    ];
    for kind in directional {
        assert_eq!(
            verdict.details[&kind].vote,
            Vote::Bullish,
            "{kind:?} should follow the trend"
        );
    }

    // Net bias never flips to the sell side in a pure uptrend.
    assert!(
        verdict.action >= Action::Wait,
        "uptrend must not produce a sell action, got {:?}",
        verdict.action
    );
}

// ──────────────────────────────────────────────
// 3. CRSI history edge
// ──────────────────────────────────────────────

fn wavy_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.01)
        .collect()
}

#[test]
fn crsi_insufficient_at_99_bars() {
    let engine = ConfluenceEngine::default();
    let verdict = engine
        .analyze(&series_from_closes(&wavy_closes(99)))
        .unwrap()
        .verdict;

    let crsi = &verdict.details[&IndicatorKind::Crsi];
    assert!(crsi.value.is_none(), "CRSI must be flagged insufficient");
    assert_eq!(crsi.vote, Vote::Neutral);
}

#[test]
fn crsi_defined_at_100_bars() {
    let engine = ConfluenceEngine::default();
    let verdict = engine
        .analyze(&series_from_closes(&wavy_closes(100)))
        .unwrap()
        .verdict;

    let crsi = &verdict.details[&IndicatorKind::Crsi];
    assert!(crsi.value.is_some(), "CRSI must be defined with 100 bars");
}

// ──────────────────────────────────────────────
// 4. Failure modes
// ──────────────────────────────────────────────

#[test]
fn short_series_fails_fast() {
    let engine = ConfluenceEngine::default();
    let err = engine
        .analyze(&series_from_closes(&wavy_closes(20)))
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientData { .. }));
}

#[test]
fn malformed_series_is_rejected_at_construction() {
    let mut bars = bars_from_closes(&wavy_closes(50));
    bars[10].timestamp = bars[9].timestamp; // duplicate
    assert_eq!(
        Series::new(bars).unwrap_err(),
        SeriesError::TimestampOrder { index: 10 }
    );

    let mut bars = bars_from_closes(&wavy_closes(50));
    bars[3].close = f64::INFINITY;
    assert!(matches!(
        Series::new(bars).unwrap_err(),
        SeriesError::InvalidBar { index: 3 }
    ));
}

// ──────────────────────────────────────────────
// 5. Frame completeness
// ──────────────────────────────────────────────

#[test]
fn long_series_defines_every_column_at_final_row() {
    let engine = ConfluenceEngine::default();
    let analysis = engine
        .analyze(&series_from_closes(&wavy_closes(160)))
        .unwrap();

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
        Column::Crsi,
    ];
    for column in columns {
        assert!(
            analysis.frame.last(column).is_some(),
            "column {column:?} undefined at final row of a 160-bar series"
        );
    }
}

// ──────────────────────────────────────────────
// 6. Preset variants
// ──────────────────────────────────────────────

#[test]
fn presets_share_the_pipeline_but_not_the_denominator() {
    let closes: Vec<f64> = (0..150).map(|i| 500.0 - 2.0 * i as f64).collect();
    let series = series_from_closes(&closes);

    let full = ConfluenceEngine::new(ConfluenceConfig::full()).unwrap();
    let core = ConfluenceEngine::new(ConfluenceConfig::core()).unwrap();

    let full_verdict = full.analyze(&series).unwrap().verdict;
    let core_verdict = core.analyze(&series).unwrap().verdict;

    assert_eq!(full_verdict.total_indicators, 15);
    assert_eq!(core_verdict.total_indicators, 8);

    // The shared indicators resolve identically under both presets.
    for kind in [IndicatorKind::Rsi, IndicatorKind::Mfi, IndicatorKind::Cci] {
        assert_eq!(
            full_verdict.details[&kind],
            core_verdict.details[&kind],
            "{kind:?} should not depend on the preset"
        );
    }

    // Exit offsets differ between the deployed variants.
    assert!((full_verdict.entry_price - full_verdict.stop_loss - 22.0).abs() < 1e-9);
    assert!((core_verdict.entry_price - core_verdict.stop_loss - 18.0).abs() < 1e-9);
}
