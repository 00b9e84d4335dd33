// File: crates/tickmark-core/src/series.rs
// Summary: Daily OHLCV bar model and the validated, date-ordered bar sequence.
// Notes:
// - Bar fields stay public so callers can build fixtures directly; the
//   checked constructors are what the ingestion boundary uses.
// - Every engine function takes `&[Bar]`; `BarSeries` derefs to it.

use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One trading day. `time` serializes as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Try to construct a bar enforcing OHLC invariants:
    /// all prices finite, l <= min(o,c) and h >= max(o,c).
    pub fn try_new(
        time: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, SeriesError> {
        if ![open, high, low, close].iter().all(|p| p.is_finite()) {
            return Err(SeriesError::NonFinite { time });
        }
        if low > open.min(close) { return Err(SeriesError::LowAboveBody { time }); }
        if high < open.max(close) { return Err(SeriesError::HighBelowBody { time }); }
        Ok(Self { time, open, high, low, close, volume })
    }

    /// Up day in the volume-colouring sense: strictly higher close than open.
    pub fn is_up(&self) -> bool { self.close > self.open }
}

/// Bars sorted strictly ascending by date (no duplicates, no gap filling).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Wrap `bars`, rejecting any out-of-order or repeated date.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for w in bars.windows(2) {
            let (prev, next) = (w[0].time, w[1].time);
            if prev == next { return Err(SeriesError::DuplicateDate(next)); }
            if prev > next { return Err(SeriesError::Unsorted { prev, next }); }
        }
        Ok(Self { bars })
    }

    /// Sort by date first, then validate. Duplicates are still an error.
    pub fn from_unsorted(mut bars: Vec<Bar>) -> Result<Self, SeriesError> {
        bars.sort_by_key(|b| b.time);
        Self::new(bars)
    }
}

impl Deref for BarSeries {
    type Target = [Bar];
    fn deref(&self) -> &[Bar] { &self.bars }
}

impl<'de> Deserialize<'de> for BarSeries {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let bars = Vec::<Bar>::deserialize(de)?;
        BarSeries::new(bars).map_err(serde::de::Error::custom)
    }
}

/// A dated value produced by a single-line indicator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub time: NaiveDate,
    pub value: f64,
}

/// One fully-defined MACD triple.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub time: NaiveDate,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}
