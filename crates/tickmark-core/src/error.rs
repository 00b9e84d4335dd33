// File: crates/tickmark-core/src/error.rs
// Summary: Error types for boundary validation (bars, events, options).
// The indicator and alignment functions are total and never return these.

use chrono::NaiveDate;
use thiserror::Error;

/// Violations of the bar/series invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("bar {time}: non-finite price")]
    NonFinite { time: NaiveDate },
    #[error("bar {time}: low above min(open, close)")]
    LowAboveBody { time: NaiveDate },
    #[error("bar {time}: high below max(open, close)")]
    HighBelowBody { time: NaiveDate },
    #[error("bars out of order: {prev} is followed by {next}")]
    Unsorted { prev: NaiveDate, next: NaiveDate },
    #[error("duplicate bar date {0}")]
    DuplicateDate(NaiveDate),
}

/// Failures while turning an external payload into bars and events.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid date {value:?}: {source}")]
    Date {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("unknown event category {0:?}")]
    UnknownCategory(String),
    #[error("unknown event sentiment {0:?}")]
    UnknownSentiment(String),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Rejected chart options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("malformed options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{name} period must be positive")]
    ZeroPeriod { name: &'static str },
    #[error("MACD fast length {fast} must be below slow length {slow}")]
    FastNotBelowSlow { fast: usize, slow: usize },
    #[error("RSI guides must satisfy 0 <= oversold < overbought <= 100 (got {oversold}/{overbought})")]
    Guides { oversold: f64, overbought: f64 },
}
