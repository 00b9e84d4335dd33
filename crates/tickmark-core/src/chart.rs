// File: crates/tickmark-core/src/chart.rs
// Summary: Chart inputs and the pure frame builder that derives every plotted series,
// marker and pane margin in one pass.
//
// A `ChartFrame` is an immutable, serializable description. Whatever draws it
// owns the only mutable state (the surface); rebuilding on input change is
// just another call to `Chart::frame`.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::events::{align, Event, Marker};
use crate::indicators::Indicator;
use crate::ingest::Payload;
use crate::layout::{plan_panes, PanePlan};
use crate::options::ChartOptions;
use crate::series::{Bar, BarSeries, IndicatorPoint, MacdPoint};
use crate::theme::{Rgba, Theme};
use crate::tooltip::{select_bar, TooltipResolver};

#[derive(Clone, Debug, Default)]
pub struct Chart {
    bars: BarSeries,
    events: Vec<Event>,
    options: ChartOptions,
}

impl Chart {
    pub fn new(bars: BarSeries) -> Self {
        Self { bars, events: Vec::new(), options: ChartOptions::default() }
    }

    pub fn from_payload(payload: Payload, options: ChartOptions) -> Self {
        Self { bars: payload.bars, events: payload.events, options }
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn bars(&self) -> &[Bar] { &self.bars }
    pub fn events(&self) -> &[Event] { &self.events }
    pub fn options(&self) -> &ChartOptions { &self.options }

    /// Tooltip lookups against the current bars and events.
    pub fn tooltips(&self) -> TooltipResolver<'_> {
        TooltipResolver::new(&self.bars, &self.events, self.options.tooltip_match)
    }

    /// Bar under a click, exact date only.
    pub fn select(&self, time: NaiveDate) -> Option<&Bar> { select_bar(&self.bars, time) }

    /// Compute every derived series for the current inputs and options.
    pub fn frame(&self) -> ChartFrame {
        let opts = &self.options;
        let theme = opts.theme();
        let bars: &[Bar] = &self.bars;
        let panes = plan_panes(opts.active);

        let moving_averages = if opts.active.show_ma {
            opts.moving_averages()
                .enumerate()
                .map(|(i, sma)| LineSeries {
                    id: format!("{}{}", sma.id(), sma.period),
                    color: theme.ma_color(i),
                    points: sma.compute(bars),
                })
                .collect()
        } else {
            Vec::new()
        };

        let macd = opts.active.show_macd.then(|| MacdFrame::new(opts.macd.compute(bars), &theme));
        let rsi = opts.active.show_rsi.then(|| RsiFrame {
            line: LineSeries { id: opts.rsi.id().to_string(), color: theme.rsi_line, points: opts.rsi.compute(bars) },
            guides: guide_lines(bars, opts, &theme),
        });

        let frame = ChartFrame {
            price: PriceFrame {
                bars: bars.to_vec(),
                up_color: theme.candle_up,
                down_color: theme.candle_down,
                scale_margins: panes.price_scale_margins(),
            },
            volume: bars
                .iter()
                .map(|b| HistogramBar { time: b.time, value: b.volume as f64, color: theme.volume_color(b.is_up()) })
                .collect(),
            moving_averages,
            macd,
            rsi,
            markers: align(bars, &self.events, &theme),
            panes,
        };
        debug!(
            bars = bars.len(),
            overlays = frame.moving_averages.len(),
            macd = frame.macd.as_ref().map_or(0, |m| m.points.len()),
            rsi = frame.rsi.as_ref().map_or(0, |r| r.line.points.len()),
            markers = frame.markers.len(),
            "built chart frame"
        );
        frame
    }
}

fn guide_lines(bars: &[Bar], opts: &ChartOptions, theme: &Theme) -> Vec<GuideLine> {
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else { return Vec::new(); };
    [opts.rsi_guides.overbought, opts.rsi_guides.oversold]
        .into_iter()
        .map(|level| GuideLine { level, color: theme.rsi_guide, from: first.time, to: last.time })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartFrame {
    pub price: PriceFrame,
    pub volume: Vec<HistogramBar>,
    pub moving_averages: Vec<LineSeries>,
    pub macd: Option<MacdFrame>,
    pub rsi: Option<RsiFrame>,
    pub markers: Vec<Marker>,
    pub panes: PanePlan,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceFrame {
    pub bars: Vec<Bar>,
    pub up_color: Rgba,
    pub down_color: Rgba,
    /// (top, bottom) scale margins for the candlestick series.
    pub scale_margins: (f64, f64),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineSeries {
    pub id: String,
    pub color: Rgba,
    pub points: Vec<IndicatorPoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBar {
    pub time: NaiveDate,
    pub value: f64,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MacdFrame {
    pub points: Vec<MacdPoint>,
    pub histogram: Vec<HistogramBar>,
    pub line_color: Rgba,
    pub signal_color: Rgba,
}

impl MacdFrame {
    fn new(points: Vec<MacdPoint>, theme: &Theme) -> Self {
        let histogram = points
            .iter()
            .map(|p| HistogramBar { time: p.time, value: p.histogram, color: theme.histogram_color(p.histogram) })
            .collect();
        Self { points, histogram, line_color: theme.macd_line, signal_color: theme.signal_line }
    }
}

/// Constant horizontal level spanning the bar range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GuideLine {
    pub level: f64,
    pub color: Rgba,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RsiFrame {
    pub line: LineSeries,
    pub guides: Vec<GuideLine>,
}
