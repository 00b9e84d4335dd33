// File: crates/tickmark-core/src/options.rs
// Summary: Chart options (indicator parameters, active panes, theme, tooltip mode).
// Every field has a default, so an empty JSON object is a valid options file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::indicators::{Macd, Rsi, Sma};
use crate::layout::ActiveIndicators;
use crate::theme::{self, Theme};
use crate::tooltip::TooltipMatch;

/// Horizontal reference levels drawn across the RSI pane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiGuides {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiGuides {
    fn default() -> Self { Self { overbought: 70.0, oversold: 30.0 } }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// One SMA overlay per period, drawn when `active.show_ma` is set.
    pub ma_periods: Vec<usize>,
    pub macd: Macd,
    pub rsi: Rsi,
    pub rsi_guides: RsiGuides,
    pub active: ActiveIndicators,
    /// Theme preset name; unknown names fall back to dark.
    pub theme: String,
    pub tooltip_match: TooltipMatch,
    /// Reject events with unknown category/sentiment instead of mapping them.
    pub strict_events: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20],
            macd: Macd::default(),
            rsi: Rsi::default(),
            rsi_guides: RsiGuides::default(),
            active: ActiveIndicators::default(),
            theme: "dark".to_string(),
            tooltip_match: TooltipMatch::default(),
            strict_events: false,
        }
    }
}

impl ChartOptions {
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.ma_periods.contains(&0) { return Err(OptionsError::ZeroPeriod { name: "moving average" }); }
        if self.rsi.period == 0 { return Err(OptionsError::ZeroPeriod { name: "RSI" }); }
        let Macd { fast, slow, signal } = self.macd;
        if fast == 0 || slow == 0 || signal == 0 { return Err(OptionsError::ZeroPeriod { name: "MACD" }); }
        if fast >= slow { return Err(OptionsError::FastNotBelowSlow { fast, slow }); }
        let RsiGuides { overbought, oversold } = self.rsi_guides;
        if !(0.0 <= oversold && oversold < overbought && overbought <= 100.0) {
            return Err(OptionsError::Guides { oversold, overbought });
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme { theme::find(&self.theme) }

    pub fn moving_averages(&self) -> impl Iterator<Item = Sma> + '_ {
        self.ma_periods.iter().map(|&period| Sma { period })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let opts = ChartOptions::from_json_str("{}").unwrap();
        assert_eq!(opts, ChartOptions::default());
        assert_eq!(opts.macd, Macd { fast: 12, slow: 26, signal: 9 });
        assert_eq!(opts.rsi.period, 14);
    }

    #[test]
    fn partial_overrides() {
        let opts = ChartOptions::from_json_str(
            r#"{ "active": { "show_rsi": true }, "macd": { "signal": 5 }, "tooltip_match": "snapped_bar" }"#,
        )
        .unwrap();
        assert!(opts.active.show_rsi && !opts.active.show_macd);
        assert_eq!(opts.macd, Macd { fast: 12, slow: 26, signal: 5 });
        assert_eq!(opts.tooltip_match, TooltipMatch::SnappedBar);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(
            ChartOptions::from_json_str(r#"{ "macd": { "fast": 26, "slow": 12 } }"#),
            Err(OptionsError::FastNotBelowSlow { fast: 26, slow: 12 })
        ));
        assert!(matches!(
            ChartOptions::from_json_str(r#"{ "ma_periods": [5, 0] }"#),
            Err(OptionsError::ZeroPeriod { .. })
        ));
        assert!(matches!(
            ChartOptions::from_json_str(r#"{ "rsi_guides": { "overbought": 20 } }"#),
            Err(OptionsError::Guides { .. })
        ));
    }
}
