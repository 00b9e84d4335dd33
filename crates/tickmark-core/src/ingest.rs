// File: crates/tickmark-core/src/ingest.rs
// Summary: Boundary parsing of the market-data payload into validated bars and typed events.
// Notes:
// - Payload shape: `{ "data": [bar rows], "events": [event rows] }`. Bar rows
//   may carry nulls for non-trading days; those rows are dropped here.
// - Category/sentiment strings are mapped onto the closed enums here and
//   nowhere else.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::events::{Category, Event, Sentiment};
use crate::series::{Bar, BarSeries};

/// Bar row as delivered by the data layer (JSON or CSV).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawBar {
    pub time: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// Event row as delivered by the news layer.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawEvent {
    pub date: String,
    pub headline: String,
    #[serde(rename = "type")]
    pub category: String,
    pub sentiment: String,
    #[serde(rename = "t1Return", default)]
    pub return_1d: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default)]
    data: Vec<RawBar>,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    pub bars: BarSeries,
    pub events: Vec<Event>,
}

/// Accepts `YYYY-MM-DD` or a full ISO-8601 timestamp (date part kept).
pub fn parse_date(value: &str) -> Result<NaiveDate, IngestError> {
    let day = value.split('T').next().unwrap_or(value).trim();
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|source| IngestError::Date { value: value.to_string(), source })
}

/// Build a bar sequence. Rows missing a price, carrying an unreadable date or
/// inconsistent OHLC values are skipped; a missing volume reads as zero. Rows
/// are sorted by date and repeated dates rejected.
pub fn bars_from_rows(rows: Vec<RawBar>) -> Result<BarSeries, IngestError> {
    let total = rows.len();
    let mut bars = Vec::with_capacity(total);
    let mut missing = 0usize;
    let mut invalid = 0usize;
    for row in rows {
        let (Some(open), Some(high), Some(low), Some(close)) = (row.open, row.high, row.low, row.close) else {
            missing += 1;
            continue;
        };
        let bar = parse_date(&row.time)
            .and_then(|time| Bar::try_new(time, open, high, low, close, row.volume.unwrap_or(0)).map_err(IngestError::from));
        match bar {
            Ok(bar) => bars.push(bar),
            Err(e) => {
                debug!(error = %e, "rejected bar row");
                invalid += 1;
            }
        }
    }
    if missing > 0 {
        warn!(dropped = missing, "skipped bar rows with missing prices");
    }
    if invalid > 0 {
        warn!(dropped = invalid, "skipped bar rows with invalid date or prices");
    }
    Ok(BarSeries::from_unsorted(bars)?)
}

/// Type an event row. Lenient mode maps unknown categories to
/// `Category::Other` and unknown sentiments to `Sentiment::Neutral`.
pub fn event_from_row(row: RawEvent, strict: bool) -> Result<Event, IngestError> {
    let date = parse_date(&row.date)?;
    let category = match row.category.parse::<Category>() {
        Ok(c) => c,
        Err(e) if strict => return Err(e),
        Err(_) => {
            debug!(category = %row.category, "unrecognised event category");
            Category::Other
        }
    };
    let sentiment = match row.sentiment.parse::<Sentiment>() {
        Ok(s) => s,
        Err(e) if strict => return Err(e),
        Err(_) => {
            debug!(sentiment = %row.sentiment, "unrecognised event sentiment");
            Sentiment::Neutral
        }
    };
    Ok(Event { date, headline: row.headline, category, sentiment, return_1d: row.return_1d })
}

/// Type every event row. In strict mode the first bad row fails the batch;
/// otherwise rows with an unreadable date are skipped.
pub fn events_from_rows(rows: Vec<RawEvent>, strict: bool) -> Result<Vec<Event>, IngestError> {
    if strict {
        return rows.into_iter().map(|r| event_from_row(r, true)).collect();
    }
    let total = rows.len();
    let events: Vec<Event> = rows
        .into_iter()
        .filter_map(|r| match event_from_row(r, false) {
            Ok(ev) => Some(ev),
            Err(e) => {
                debug!(error = %e, "rejected event row");
                None
            }
        })
        .collect();
    if events.len() < total {
        warn!(dropped = total - events.len(), "skipped event rows with invalid dates");
    }
    Ok(events)
}

/// Parse a JSON array of event rows.
pub fn parse_events(json: &str, strict: bool) -> Result<Vec<Event>, IngestError> {
    let rows: Vec<RawEvent> = serde_json::from_str(json)?;
    events_from_rows(rows, strict)
}

/// Parse a full `{ data, events }` payload.
pub fn parse_payload(json: &str, strict: bool) -> Result<Payload, IngestError> {
    let raw: RawPayload = serde_json::from_str(json)?;
    let bars = bars_from_rows(raw.data)?;
    let events = events_from_rows(raw.events, strict)?;
    debug!(bars = bars.len(), events = events.len(), "parsed payload");
    Ok(Payload { bars, events })
}
