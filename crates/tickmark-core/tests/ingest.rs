// File: crates/tickmark-core/tests/ingest.rs
// Purpose: Boundary parsing of the `{ data, events }` payload, options and typed errors.

use chrono::NaiveDate;
use tickmark_core::ingest::{parse_date, parse_events, parse_payload};
use tickmark_core::{Category, IngestError, Sentiment, SeriesError};

fn d(s: &str) -> NaiveDate { s.parse().unwrap() }

const PAYLOAD: &str = r#"{
  "data": [
    { "time": "2024-05-02", "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.8, "volume": 1200 },
    { "time": "2024-05-01", "open": 9.8, "high": 10.2, "low": 9.6, "close": 10.0, "volume": 900 },
    { "time": "2024-05-03", "open": null, "high": null, "low": null, "close": null, "volume": null },
    { "time": "2024-05-06T13:30:00.000Z", "open": 10.8, "high": 11.4, "low": 10.6, "close": 11.2, "volume": null }
  ],
  "events": [
    { "date": "2024-05-04", "headline": "Guidance raised", "type": "Earnings", "sentiment": "bullish", "t1Return": "+1.9%" },
    { "date": "2024-05-01", "headline": "Rumour mill", "type": "Gossip", "sentiment": "mixed" }
  ]
}"#;

#[test]
fn payload_drops_null_days_and_sorts() {
    let p = parse_payload(PAYLOAD, false).unwrap();
    let times: Vec<_> = p.bars.iter().map(|b| b.time).collect();
    assert_eq!(times, [d("2024-05-01"), d("2024-05-02"), d("2024-05-06")]);
    assert_eq!(p.bars[2].volume, 0);
    assert_eq!(p.bars[1].volume, 1200);
}

#[test]
fn lenient_events_map_unknown_values() {
    let p = parse_payload(PAYLOAD, false).unwrap();
    assert_eq!(p.events.len(), 2);
    assert_eq!(p.events[0].category, Category::Earnings);
    assert_eq!(p.events[0].sentiment, Sentiment::Bullish);
    assert_eq!(p.events[0].return_1d.as_deref(), Some("+1.9%"));
    assert_eq!(p.events[1].category, Category::Other);
    assert_eq!(p.events[1].sentiment, Sentiment::Neutral);
    assert_eq!(p.events[1].return_1d, None);
}

#[test]
fn strict_events_reject_unknown_values() {
    match parse_payload(PAYLOAD, true) {
        Err(IngestError::UnknownCategory(c)) => assert_eq!(c, "Gossip"),
        other => panic!("expected unknown category, got {other:?}"),
    }
    let json = r#"[{ "date": "2024-05-01", "headline": "x", "type": "Macro", "sentiment": "Bullish" }]"#;
    assert!(matches!(parse_events(json, true), Err(IngestError::UnknownSentiment(_))));
}

#[test]
fn duplicate_dates_are_rejected() {
    let json = r#"{ "data": [
        { "time": "2024-05-01", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1 },
        { "time": "2024-05-01", "open": 2, "high": 2, "low": 2, "close": 2, "volume": 1 }
    ] }"#;
    assert!(matches!(
        parse_payload(json, false),
        Err(IngestError::Series(SeriesError::DuplicateDate(t))) if t == d("2024-05-01")
    ));
}

#[test]
fn inconsistent_bar_rows_are_skipped() {
    // high a rounding error below close, then an unreadable date
    let json = r#"{ "data": [
        { "time": "2024-05-01", "open": 1.7, "high": 1.75, "low": 1.65, "close": 1.72, "volume": 10 },
        { "time": "2024-05-02", "open": 1.72, "high": 1.7999999, "low": 1.7, "close": 1.8, "volume": 10 },
        { "time": "Invalid Date", "open": 1.8, "high": 1.9, "low": 1.7, "close": 1.85, "volume": 10 },
        { "time": "2024-05-03", "open": 1.8, "high": 1.9, "low": 1.75, "close": 1.85, "volume": 10 }
    ] }"#;
    let p = parse_payload(json, false).unwrap();
    let times: Vec<_> = p.bars.iter().map(|b| b.time).collect();
    assert_eq!(times, [d("2024-05-01"), d("2024-05-03")]);
}

#[test]
fn unreadable_event_dates_are_skipped_unless_strict() {
    let json = r#"{
      "data": [
        { "time": "2024-05-01", "open": 9.8, "high": 10.2, "low": 9.6, "close": 10.0, "volume": 900 },
        { "time": "2024-05-02", "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.8, "volume": 1200 }
      ],
      "events": [
        { "date": "2024-05-02", "headline": "Guidance raised", "type": "Earnings", "sentiment": "bullish" },
        { "date": "Invalid Date", "headline": "Undated", "type": "Macro", "sentiment": "bearish" }
      ]
    }"#;
    let p = parse_payload(json, false).unwrap();
    assert_eq!(p.bars.len(), 2);
    assert_eq!(p.events.len(), 1);
    assert_eq!(p.events[0].headline, "Guidance raised");

    match parse_payload(json, true) {
        Err(IngestError::Date { value, .. }) => assert_eq!(value, "Invalid Date"),
        other => panic!("expected date error, got {other:?}"),
    }
}

#[test]
fn dates_accept_timestamps_and_reject_garbage() {
    assert_eq!(parse_date("2024-05-06").unwrap(), d("2024-05-06"));
    assert_eq!(parse_date("2024-05-06T23:59:59Z").unwrap(), d("2024-05-06"));
    assert!(matches!(parse_date("05/06/2024"), Err(IngestError::Date { .. })));
    assert!(matches!(parse_payload("{ not json", false), Err(IngestError::Json(_))));
}

#[test]
fn missing_sections_are_empty() {
    let p = parse_payload("{}", false).unwrap();
    assert!(p.bars.is_empty() && p.events.is_empty());
}
