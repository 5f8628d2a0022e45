//! Engine error taxonomy.
//!
//! Fatal failures abort the invocation with a typed error; they never
//! surface as defaulted values that could masquerade as a real signal.
//! Per-indicator warm-up gaps are not errors — they degrade to flagged
//! neutral votes in the verdict's detail map.

use crate::domain::SeriesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Input series failed validation: empty, out-of-order timestamps, or
    /// non-finite/incoherent OHLCV fields.
    #[error("malformed series: {0}")]
    MalformedSeries(#[from] SeriesError),

    /// Series shorter than the battery floor — even the base catalog would
    /// be undefined at the final row.
    #[error("insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Engine configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
