//! Series — validated, ordered bar sequence.
//!
//! All engine entry points take a `Series`, so validation happens exactly
//! once, at construction. A `Series` is never empty and its timestamps are
//! strictly increasing.

use crate::domain::Bar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failure for a candidate bar sequence.
///
/// Fatal: no partial series is ever produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("empty series")]
    Empty,

    #[error("timestamp at bar {index} is not strictly after its predecessor")]
    TimestampOrder { index: usize },

    #[error("bar {index} has non-finite, non-positive, or incoherent OHLCV fields")]
    InvalidBar { index: usize },
}

/// Ordered OHLCV series, strictly increasing by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validate and wrap a bar sequence.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (index, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::InvalidBar { index });
            }
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(SeriesError::TimestampOrder { index });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// A `Series` is never empty; kept for clippy's `len` convention.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Most recent bar. Total: the constructor rejects empty input.
    pub fn last(&self) -> &Bar {
        self.bars.last().expect("Series is never empty")
    }
}

impl TryFrom<Vec<Bar>> for Series {
    type Error = SeriesError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Series::new(bars)
    }
}

impl From<Series> for Vec<Bar> {
    fn from(series: Series) -> Self {
        series.bars
    }
}
