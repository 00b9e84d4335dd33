// File: crates/tickmark-core/src/lib.rs
// Summary: Core library entry point; indicator engine, event alignment, pane layout and chart frames.

pub mod chart;
pub mod error;
pub mod events;
pub mod indicators;
pub mod ingest;
pub mod layout;
pub mod options;
pub mod series;
pub mod theme;
pub mod tooltip;

pub use chart::{Chart, ChartFrame};
pub use error::{IngestError, OptionsError, SeriesError};
pub use events::{align, resolve_bar, Category, Event, Marker, MarkerPosition, Sentiment};
pub use indicators::{macd, rsi, sma, Indicator, Macd, Rsi, Sma};
pub use layout::{plan_panes, ActiveIndicators, PaneId, PaneMargins, PanePlan};
pub use options::ChartOptions;
pub use series::{Bar, BarSeries, IndicatorPoint, MacdPoint};
pub use theme::{Rgba, Theme};
pub use tooltip::{select_bar, CrosshairMove, Tooltip, TooltipMatch, TooltipResolver};
