// File: crates/tickmark-core/src/tooltip.rs
// Summary: Pointer queries from the drawing surface: crosshair tooltips and click selection.
// Notes:
// - By default tooltips match an event's raw date, while markers sit on the
//   snapped bar. An event dated on a weekend therefore draws a marker on
//   Friday but never shows a tooltip there. `TooltipMatch::SnappedBar`
//   resolves both through the aligner instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::events::{resolve_bar, Event};
use crate::series::Bar;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipMatch {
    /// Cursor bar date must equal the event's own date.
    #[default]
    RawDate,
    /// Cursor bar date must equal the bar the event's marker is drawn on.
    SnappedBar,
}

/// Crosshair notification, in surface pixels. Either part may be missing
/// when the pointer leaves the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrosshairMove {
    pub time: Option<NaiveDate>,
    pub point: Option<(f64, f64)>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tooltip<'a> {
    None,
    Event { event: &'a Event, x: f64, y: f64 },
}

impl Tooltip<'_> {
    pub fn is_visible(&self) -> bool { matches!(self, Tooltip::Event { .. }) }
}

/// Answers "which event is under the cursor" for one (bars, events) pair.
#[derive(Clone, Debug)]
pub struct TooltipResolver<'a> {
    events: &'a [Event],
    keys: Vec<Option<NaiveDate>>,
}

impl<'a> TooltipResolver<'a> {
    pub fn new(bars: &[Bar], events: &'a [Event], mode: TooltipMatch) -> Self {
        let keys = events
            .iter()
            .map(|ev| match mode {
                TooltipMatch::RawDate => Some(ev.date),
                TooltipMatch::SnappedBar => resolve_bar(bars, ev.date).map(|b| b.time),
            })
            .collect();
        Self { events, keys }
    }

    /// First event, in input order, keyed to `time`.
    pub fn resolve(&self, time: NaiveDate) -> Option<&'a Event> {
        self.keys
            .iter()
            .position(|k| *k == Some(time))
            .map(|i| &self.events[i])
    }

    /// Full crosshair handling: a pointer outside the `width` x `height`
    /// surface, or a move without time or point, hides the tooltip.
    pub fn on_crosshair_move(&self, mv: &CrosshairMove, width: f64, height: f64) -> Tooltip<'a> {
        let (Some(time), Some((x, y))) = (mv.time, mv.point) else { return Tooltip::None; };
        if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
            return Tooltip::None;
        }
        match self.resolve(time) {
            Some(event) => Tooltip::Event { event, x, y },
            None => Tooltip::None,
        }
    }
}

/// Bar under a click. Exact date only; clicks never snap.
pub fn select_bar(bars: &[Bar], time: NaiveDate) -> Option<&Bar> {
    bars.binary_search_by_key(&time, |b| b.time).ok().map(|i| &bars[i])
}
