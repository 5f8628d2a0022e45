//! Confluence CLI — analyze OHLCV CSV files with the confluence engine.
//!
//! Commands:
//! - `analyze` — load one or more bar-series CSV files, run the engine on
//!   each (in parallel when several), print a summary or JSON verdicts
//! - `presets` — print the built-in engine presets
//!
//! CSV format: `timestamp,open,high,low,close,volume` with a header row.
//! Timestamps may be epoch seconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS`
//! (taken as UTC).

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use confluence_core::config::ConfluenceConfig;
use confluence_core::domain::{Bar, Series, Verdict, Vote};
use confluence_core::engine::ConfluenceEngine;

#[derive(Parser)]
#[command(
    name = "confluence",
    about = "Confluence CLI — multi-indicator scoring over OHLCV series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze bar-series CSV files and print verdicts.
    Analyze {
        /// CSV files to analyze (timestamp,open,high,low,close,volume).
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to a TOML engine config.
        #[arg(long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Built-in preset: full (15 indicators) or core (8 indicators).
        #[arg(long)]
        preset: Option<String>,

        /// Override the take-profit offset (points above entry).
        #[arg(long)]
        tp: Option<f64>,

        /// Override the stop-loss offset (points below entry).
        #[arg(long)]
        sl: Option<f64>,

        /// Emit verdicts as JSON instead of a text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the built-in engine presets.
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            config,
            preset,
            tp,
            sl,
            json,
        } => {
            let config = resolve_config(config.as_deref(), preset.as_deref(), tp, sl)?;
            cmd_analyze(&files, config, json)
        }
        Commands::Presets => {
            cmd_presets();
            Ok(())
        }
    }
}

// ── Config resolution ────────────────────────────────────────────────

fn resolve_config(
    config_path: Option<&Path>,
    preset: Option<&str>,
    tp: Option<f64>,
    sl: Option<f64>,
) -> Result<ConfluenceConfig> {
    let mut config = if let Some(path) = config_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
    } else {
        match preset {
            None | Some("full") => ConfluenceConfig::full(),
            Some("core") => ConfluenceConfig::core(),
            Some(other) => bail!("unknown preset '{other}' (expected: full, core)"),
        }
    };

    if let Some(tp) = tp {
        config.exits.take_profit = tp;
    }
    if let Some(sl) = sl {
        config.exits.stop_loss = sl;
    }
    Ok(config)
}

// ── analyze ──────────────────────────────────────────────────────────

fn cmd_analyze(files: &[PathBuf], config: ConfluenceConfig, json: bool) -> Result<()> {
    let engine = ConfluenceEngine::new(config)?;

    let results: Vec<(PathBuf, Result<Verdict>)> = files
        .par_iter()
        .map(|path| {
            let verdict = analyze_file(&engine, path);
            (path.clone(), verdict)
        })
        .collect();

    let mut failures = 0usize;
    for (path, result) in results {
        match result {
            Ok(verdict) => {
                if json {
                    println!("{}", serde_json::to_string_pretty(&verdict)?);
                } else {
                    print_summary(&path, &verdict);
                }
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: {err:#}", path.display());
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", files.len());
    }
    Ok(())
}

fn analyze_file(engine: &ConfluenceEngine, path: &Path) -> Result<Verdict> {
    let bars = load_bars(path).with_context(|| format!("loading {}", path.display()))?;
    let series = Series::new(bars).with_context(|| format!("validating {}", path.display()))?;
    let analysis = engine
        .analyze(&series)
        .with_context(|| format!("analyzing {}", path.display()))?;
    Ok(analysis.verdict)
}

fn print_summary(path: &Path, verdict: &Verdict) {
    println!("── {} ──", path.display());
    println!(
        "verdict: {:?}  (buy {}/{}, sell {}/{})",
        verdict.action,
        verdict.buy_score,
        verdict.total_indicators,
        verdict.sell_score,
        verdict.total_indicators
    );
    println!(
        "entry {:.2}  target {:.2}  stop {:.2}",
        verdict.entry_price, verdict.take_profit, verdict.stop_loss
    );
    for (kind, signal) in &verdict.details {
        let vote = match signal.vote {
            Vote::Bullish => "bullish",
            Vote::Bearish => "bearish",
            Vote::Neutral => "neutral",
        };
        match signal.value {
            Some(value) => println!("  {kind:?}: {value:.2} ({vote})"),
            None => println!("  {kind:?}: insufficient history ({vote})"),
        }
    }
    println!("config: {}", verdict.config_fingerprint);
}

// ── presets ──────────────────────────────────────────────────────────

fn cmd_presets() {
    for (name, config) in [
        ("full", ConfluenceConfig::full()),
        ("core", ConfluenceConfig::core()),
    ] {
        println!(
            "{name}: {} indicators, decision {}/{}, tp +{}, sl -{}",
            config.preset.total(),
            config.decision.probable,
            config.decision.strong,
            config.exits.take_profit,
            config.exits.stop_loss
        );
    }
}

// ── CSV ingest ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CsvBar {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();
    for (i, row) in reader.deserialize::<CsvBar>().enumerate() {
        let row = row.with_context(|| format!("row {}", i + 1))?;
        let timestamp = parse_timestamp(&row.timestamp)
            .with_context(|| format!("row {}: bad timestamp '{}'", i + 1, row.timestamp))?;
        bars.push(Bar {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }
    Ok(bars)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(epoch) = raw.parse::<i64>() {
        return DateTime::from_timestamp(epoch, 0)
            .with_context(|| format!("epoch out of range: {epoch}"));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")?;
    Ok(naive.and_utc())
}
