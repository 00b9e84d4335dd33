// File: crates/tickmark-core/src/events.rs
// Summary: News/earnings events, snapping them onto trading bars, and marker derivation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::series::Bar;
use crate::theme::{Rgba, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Earnings,
    Product,
    Macro,
    Policy,
    Management,
    Competition,
    /// Any category string outside the known set (lenient ingestion only).
    Other,
}

impl Category {
    pub const KNOWN: [Category; 6] = [
        Category::Earnings,
        Category::Product,
        Category::Macro,
        Category::Policy,
        Category::Management,
        Category::Competition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Earnings => "Earnings",
            Category::Product => "Product",
            Category::Macro => "Macro",
            Category::Policy => "Policy",
            Category::Management => "Management",
            Category::Competition => "Competition",
            Category::Other => "Other",
        }
    }

    /// Short marker text.
    pub fn label(self) -> &'static str {
        match self {
            Category::Earnings => "E",
            Category::Product => "T",
            Category::Macro => "M",
            Category::Policy => "P",
            Category::Management => "MG",
            Category::Competition => "C",
            Category::Other => "*",
        }
    }
}

impl FromStr for Category {
    type Err = IngestError;
    /// Exact, case-sensitive match against the six known names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::KNOWN
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| IngestError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl FromStr for Sentiment {
    type Err = IngestError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bullish" => Ok(Sentiment::Bullish),
            "bearish" => Ok(Sentiment::Bearish),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(IngestError::UnknownSentiment(other.to_string())),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        })
    }
}

/// An externally supplied event. `date` need not be a trading day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub date: NaiveDate,
    pub headline: String,
    pub category: Category,
    pub sentiment: Sentiment,
    /// Signed percentage text such as `+2.4%`, passed through untouched.
    pub return_1d: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    Circle,
}

/// Annotation pinned to an existing bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub bar_time: NaiveDate,
    pub position: MarkerPosition,
    pub color: Rgba,
    pub shape: MarkerShape,
    pub label: &'static str,
}

impl Marker {
    pub fn for_event(bar: &Bar, event: &Event, theme: &Theme) -> Self {
        let (position, color) = match event.sentiment {
            Sentiment::Bullish => (MarkerPosition::BelowBar, theme.marker_bullish),
            Sentiment::Bearish => (MarkerPosition::AboveBar, theme.marker_bearish),
            Sentiment::Neutral => (MarkerPosition::AboveBar, theme.marker_neutral),
        };
        Self { bar_time: bar.time, position, color, shape: MarkerShape::Circle, label: event.category.label() }
    }
}

/// Bar an event dated `date` attaches to.
///
/// Exact date first, else the latest bar on or before `date` (weekends and
/// holidays snap back), else the first bar when `date` predates the series.
/// `None` only for an empty series. Requires `bars` sorted ascending.
pub fn resolve_bar(bars: &[Bar], date: NaiveDate) -> Option<&Bar> {
    let first = bars.first()?;
    // count of bars with time <= date
    let n = bars.partition_point(|b| b.time <= date);
    Some(if n == 0 { first } else { &bars[n - 1] })
}

/// One marker per event, in event order. Several events may share a bar.
pub fn align(bars: &[Bar], events: &[Event], theme: &Theme) -> Vec<Marker> {
    if bars.is_empty() && !events.is_empty() {
        warn!(events = events.len(), "no bars to attach events to; markers skipped");
        return Vec::new();
    }
    let markers: Vec<Marker> = events
        .iter()
        .filter_map(|ev| resolve_bar(bars, ev.date).map(|bar| Marker::for_event(bar, ev, theme)))
        .collect();
    debug!(events = events.len(), markers = markers.len(), "aligned events");
    markers
}
