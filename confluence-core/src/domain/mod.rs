//! Domain types: bars, validated series, votes, verdicts.

pub mod bar;
pub mod series;
pub mod verdict;

pub use bar::Bar;
pub use series::{Series, SeriesError};
pub use verdict::{Action, IndicatorKind, IndicatorSignal, Verdict, Vote};
