// File: crates/tickmark-core/src/indicators.rs
// Summary: Indicator engine (SMA, EMA, MACD, RSI) over daily bars, plus the
// `Indicator` trait the chart frame uses to treat configurations uniformly.
//
// Every function is pure and allocation-only. Insufficient input yields an
// empty series; the warm-up prefix is dropped, never padded.

use serde::{Deserialize, Serialize};

use crate::series::{Bar, IndicatorPoint, MacdPoint};

/// Indicator transforms a bar sequence into a derived, date-keyed series.
pub trait Indicator {
    type Output;
    fn id(&self) -> &'static str;
    /// Number of leading bars that never receive an output point.
    fn warm_up(&self) -> usize;
    fn compute(&self, bars: &[Bar]) -> Vec<Self::Output>;
}

/// Simple moving average of closes over `period` bars.
pub fn sma(bars: &[Bar], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || bars.len() < period { return Vec::new(); }
    bars.windows(period)
        .map(|w| IndicatorPoint {
            time: w[period - 1].time,
            value: w.iter().rev().map(|b| b.close).sum::<f64>() / period as f64,
        })
        .collect()
}

/// Exponential moving average over raw values, index-aligned with `values`.
///
/// Entry `period - 1` holds the seed (the plain mean of the first `period`
/// values); later entries follow `ema = (v - ema) * k + ema` with
/// `k = 2 / (period + 1)`. Entries before the seed are `None`, as is every
/// entry when fewer than `period` values are supplied.
pub(crate) fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period { return out; }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(ema);
    for (slot, &v) in out[period..].iter_mut().zip(&values[period..]) {
        ema = (v - ema) * k + ema;
        *slot = Some(ema);
    }
    out
}

/// MACD line, signal line and histogram.
///
/// The signal EMA warms up from the first defined MACD value, not from the
/// start of the bar sequence. Only fully-defined triples are emitted, so the
/// first `max(fast, slow) + signal - 2` bars are trimmed.
pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> Vec<MacdPoint> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);

    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    let Some(start) = line.iter().position(Option::is_some) else { return Vec::new(); };
    // Both EMAs stay defined once seeded, so the tail is dense.
    let valid: Vec<f64> = line[start..].iter().flatten().copied().collect();
    let signal_line = ema(&valid, signal);

    valid
        .iter()
        .zip(&signal_line)
        .enumerate()
        .filter_map(|(offset, (&m, s))| {
            let s = (*s)?;
            Some(MacdPoint { time: bars[start + offset].time, macd: m, signal: s, histogram: m - s })
        })
        .collect()
}

/// Relative Strength Index with Wilder smoothing.
///
/// Seeds average gain/loss with plain means over the first `period` deltas,
/// then applies `avg = (avg * (period - 1) + current) / period`. A zero
/// average loss reads as exactly 100. The first point sits on bar `period`.
pub fn rsi(bars: &[Bar], period: usize) -> Vec<IndicatorPoint> {
    if period == 0 || bars.len() < period + 1 { return Vec::new(); }

    let deltas: Vec<f64> = bars.windows(2).map(|w| w[1].close - w[0].close).collect();
    let split = |d: f64| if d > 0.0 { (d, 0.0) } else { (0.0, -d) };

    let (gain, loss) = deltas[..period]
        .iter()
        .map(|&d| split(d))
        .fold((0.0, 0.0), |(g, l), (cg, cl)| (g + cg, l + cl));
    let p = period as f64;
    let mut avg_gain = gain / p;
    let mut avg_loss = loss / p;

    let mut out = Vec::with_capacity(bars.len() - period);
    out.push(IndicatorPoint { time: bars[period].time, value: rsi_value(avg_gain, avg_loss) });

    for (i, &d) in deltas.iter().enumerate().skip(period) {
        let (cg, cl) = split(d);
        avg_gain = (avg_gain * (p - 1.0) + cg) / p;
        avg_loss = (avg_loss * (p - 1.0) + cl) / p;
        // deltas[i] ends on bar i + 1
        out.push(IndicatorPoint { time: bars[i + 1].time, value: rsi_value(avg_gain, avg_loss) });
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 { return 100.0; }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sma {
    pub period: usize,
}

impl Indicator for Sma {
    type Output = IndicatorPoint;
    fn id(&self) -> &'static str { "sma" }
    fn warm_up(&self) -> usize { self.period.saturating_sub(1) }
    fn compute(&self, bars: &[Bar]) -> Vec<IndicatorPoint> { sma(bars, self.period) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for Macd {
    fn default() -> Self { Self { fast: 12, slow: 26, signal: 9 } }
}

impl Indicator for Macd {
    type Output = MacdPoint;
    fn id(&self) -> &'static str { "macd" }
    fn warm_up(&self) -> usize { (self.fast.max(self.slow) + self.signal).saturating_sub(2) }
    fn compute(&self, bars: &[Bar]) -> Vec<MacdPoint> { macd(bars, self.fast, self.slow, self.signal) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rsi {
    pub period: usize,
}

impl Default for Rsi {
    fn default() -> Self { Self { period: 14 } }
}

impl Indicator for Rsi {
    type Output = IndicatorPoint;
    fn id(&self) -> &'static str { "rsi" }
    fn warm_up(&self) -> usize { self.period }
    fn compute(&self, bars: &[Bar]) -> Vec<IndicatorPoint> { rsi(bars, self.period) }
}
