// File: crates/tickmark-core/src/layout.rs
// Summary: Vertical pane partitioning for price, volume, MACD and RSI.
//
// A single canvas is shared top-to-bottom as Price -> Volume -> (MACD) -> (RSI).
// Margins are fractions of the canvas height measured from the top and the
// bottom edge respectively, as scale-margin options expect them.

use serde::{Deserialize, Serialize};

/// Which optional indicators are switched on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveIndicators {
    /// Moving averages overlay the price pane and take no space.
    pub show_ma: bool,
    pub show_macd: bool,
    pub show_rsi: bool,
}

impl ActiveIndicators {
    pub const fn sub_charts(&self) -> usize { self.show_macd as usize + self.show_rsi as usize }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneId {
    Price,
    Volume,
    Macd,
    Rsi,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PaneMargins {
    pub pane: PaneId,
    pub top: f64,
    pub bottom: f64,
}

impl PaneMargins {
    const fn new(pane: PaneId, top: f64, bottom: f64) -> Self { Self { pane, top, bottom } }

    /// Occupied band as (start, end) fractions from the top edge.
    pub fn band(&self) -> (f64, f64) { (self.top, 1.0 - self.bottom) }
}

/// Price scale padding above the highest candle.
pub const PRICE_SCALE_TOP: f64 = 0.1;
/// Extra gap kept between the candles and the volume band.
pub const PRICE_SCALE_GAP: f64 = 0.05;

/// Pane assignments ordered top to bottom. Only active panes are present.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PanePlan {
    pub panes: Vec<PaneMargins>,
}

impl PanePlan {
    pub fn get(&self, pane: PaneId) -> Option<&PaneMargins> {
        self.panes.iter().find(|m| m.pane == pane)
    }

    /// Scale margins for the candlestick series: the price band padded by
    /// `PRICE_SCALE_TOP` above and `PRICE_SCALE_GAP` below.
    pub fn price_scale_margins(&self) -> (f64, f64) {
        let bottom = self.get(PaneId::Price).map_or(0.0, |m| m.bottom);
        (PRICE_SCALE_TOP, bottom + PRICE_SCALE_GAP)
    }
}

/// Allocate vertical space for the active panes.
pub fn plan_panes(active: ActiveIndicators) -> PanePlan {
    use PaneId::*;
    let panes = match (active.show_macd, active.show_rsi) {
        (false, false) => vec![
            PaneMargins::new(Price, 0.0, 0.2),
            PaneMargins::new(Volume, 0.8, 0.0),
        ],
        (true, false) => vec![
            PaneMargins::new(Price, 0.0, 0.4),
            PaneMargins::new(Volume, 0.6, 0.2),
            PaneMargins::new(Macd, 0.8, 0.0),
        ],
        (false, true) => vec![
            PaneMargins::new(Price, 0.0, 0.4),
            PaneMargins::new(Volume, 0.6, 0.2),
            PaneMargins::new(Rsi, 0.8, 0.0),
        ],
        (true, true) => vec![
            PaneMargins::new(Price, 0.0, 0.5),
            PaneMargins::new(Volume, 0.5, 0.3),
            PaneMargins::new(Macd, 0.7, 0.15),
            PaneMargins::new(Rsi, 0.85, 0.0),
        ],
    };
    PanePlan { panes }
}
