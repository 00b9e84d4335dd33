// File: crates/tickmark-demo/src/main.rs
// Summary: Demo loads daily bars (CSV or JSON payload) plus events and options, builds the
// chart frame and writes it as JSON; optionally answers a crosshair/click query for one date.
//
// Usage:
//   tickmark-demo <bars.csv|payload.json> [--events events.json] [--options options.json]
//                 [--out frame.json] [--ma] [--macd] [--rsi] [--at YYYY-MM-DD]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tickmark_core::ingest::{self, RawBar};
use tickmark_core::{Chart, ChartOptions, CrosshairMove, Tooltip};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    input: PathBuf,
    events: Option<PathBuf>,
    options: Option<PathBuf>,
    out: Option<PathBuf>,
    ma: bool,
    macd: bool,
    rsi: bool,
    at: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut options = match &args.options {
        Some(p) => ChartOptions::load(p).with_context(|| format!("failed to load options '{}'", p.display()))?,
        None => ChartOptions::default(),
    };
    options.active.show_ma |= args.ma;
    options.active.show_macd |= args.macd;
    options.active.show_rsi |= args.rsi;

    let (path, used_alt) = resolve_path(&args.input)?;
    println!("Using input file: {}", path.display());
    if used_alt {
        println!("  (extension swapped between .csv/.cvs)");
    }

    let mut payload = if is_json(&path) {
        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        ingest::parse_payload(&text, options.strict_events)
            .with_context(|| format!("failed to parse payload '{}'", path.display()))?
    } else {
        let rows = load_bar_rows(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        ingest::Payload { bars: ingest::bars_from_rows(rows)?, events: Vec::new() }
    };
    if let Some(p) = &args.events {
        let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
        payload.events.extend(ingest::parse_events(&text, options.strict_events)?);
    }

    println!("Loaded {} bars, {} events", payload.bars.len(), payload.events.len());
    if payload.bars.is_empty() {
        anyhow::bail!("no bars loaded; check headers/delimiter.");
    }

    let chart = Chart::from_payload(payload, options);
    let frame = chart.frame();
    info!(
        events = chart.events().len(),
        theme = %chart.options().theme,
        markers = frame.markers.len(),
        panes = frame.panes.panes.len(),
        "frame ready"
    );

    let out = args.out.clone().unwrap_or_else(|| out_name_with(&path, "frame"));
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&out).with_context(|| format!("creating {}", out.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &frame)?;
    println!("Wrote {}", out.display());

    if let Some(at) = &args.at {
        let time = ingest::parse_date(at)?;
        match chart.select(time) {
            Some(bar) => println!("Bar {}: O {:.2} H {:.2} L {:.2} C {:.2} V {}", bar.time, bar.open, bar.high, bar.low, bar.close, bar.volume),
            None => println!("No trading bar on {time}"),
        }
        // Pretend the pointer sits inside a 1x1 surface so only the date matters.
        let mv = CrosshairMove { time: Some(time), point: Some((0.0, 0.0)) };
        match chart.tooltips().on_crosshair_move(&mv, 1.0, 1.0) {
            Tooltip::Event { event, .. } => println!(
                "Tooltip: [{}] {} ({}){}",
                event.category,
                event.headline,
                event.sentiment,
                event.return_1d.as_deref().map(|r| format!(" T+1: {r}")).unwrap_or_default()
            ),
            Tooltip::None => println!("No tooltip on {time}"),
        }
    }

    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    let mut input = None;
    while let Some(a) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} expects a value"));
        match a.as_str() {
            "--events" => args.events = Some(PathBuf::from(value("--events")?)),
            "--options" => args.options = Some(PathBuf::from(value("--options")?)),
            "--out" => args.out = Some(PathBuf::from(value("--out")?)),
            "--at" => args.at = Some(value("--at")?),
            "--ma" => args.ma = true,
            "--macd" => args.macd = true,
            "--rsi" => args.rsi = true,
            flag if flag.starts_with("--") => anyhow::bail!("unknown flag {flag}"),
            other => input = Some(PathBuf::from(other)),
        }
    }
    args.input = input.context("usage: tickmark-demo <bars.csv|payload.json> [--events FILE] [--options FILE] [--out FILE] [--ma] [--macd] [--rsi] [--at DATE]")?;
    Ok(args)
}

fn is_json(p: &Path) -> bool {
    p.extension().is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(p: &Path) -> Result<(PathBuf, bool)> {
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Produce output file name like target/out/<stem>_<suffix>.json
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("{stem}_{suffix}.json"))
}

/// Load a daily OHLCV CSV into raw rows; blank cells become missing values.
fn load_bar_rows(path: &Path) -> Result<Vec<RawBar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "date", "timestamp", "datetime"]).context("no time/date column")?;
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);
    let i_volume = idx(&["volume", "v", "vol"]);

    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        println!("Warning: Could not find one of open/high/low/close columns.");
    }

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let cell = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).filter(|s| !s.is_empty());
        let price = |i: Option<usize>| cell(i).and_then(|s| s.parse::<f64>().ok());
        out.push(RawBar {
            time: rec.get(i_time).unwrap_or_default().to_string(),
            open: price(i_open),
            high: price(i_high),
            low: price(i_low),
            close: price(i_close),
            volume: cell(i_volume).and_then(|s| s.parse::<f64>().ok()).map(|v| v.max(0.0).round() as u64),
        });
    }
    Ok(out)
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Result<Args> { parse_args(v.iter().map(|s| s.to_string())) }

    #[test]
    fn parses_flags_in_any_order() {
        let a = args(&["--rsi", "bars.csv", "--events", "ev.json", "--at", "2024-03-01"]).unwrap();
        assert_eq!(a.input, PathBuf::from("bars.csv"));
        assert_eq!(a.events, Some(PathBuf::from("ev.json")));
        assert_eq!(a.at.as_deref(), Some("2024-03-01"));
        assert!(a.rsi && !a.macd && !a.ma);
    }

    #[test]
    fn rejects_missing_input_and_unknown_flags() {
        assert!(args(&["--macd"]).is_err());
        assert!(args(&["bars.csv", "--bogus"]).is_err());
        assert!(args(&["bars.csv", "--out"]).is_err());
    }

    #[test]
    fn swaps_csv_extension() {
        assert_eq!(swap_ext(Path::new("a.cvs")), Some(PathBuf::from("a.csv")));
        assert_eq!(swap_ext(Path::new("a.json")), None);
    }
}
