//! Technical indicator engine
//!
//! Derives MA20, MA50, RSI(14), MACD(12, 26) and its 9-period signal line from
//! the closing prices of a [`PriceSeries`]. Raw points are never modified.

use ta::Next;
use ta::indicators::{ExponentialMovingAverage, SimpleMovingAverage};

use crate::error::{Result, StockError};
use crate::model::{IndicatorSet, PriceSeries};

pub const MA_SHORT_WINDOW: usize = 20;
pub const MA_LONG_WINDOW: usize = 50;
pub const RSI_WINDOW: usize = 14;
pub const MACD_FAST_SPAN: usize = 12;
pub const MACD_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;

/// Attach the derived columns to `series`
pub fn compute_indicators(series: PriceSeries) -> Result<PriceSeries> {
    let closes = series.closes();

    let (macd, signal) = macd(&closes)?;
    let indicators = IndicatorSet {
        ma20: sma(&closes, MA_SHORT_WINDOW)?,
        ma50: sma(&closes, MA_LONG_WINDOW)?,
        rsi: rsi(&closes, RSI_WINDOW),
        macd: macd.into_iter().map(Some).collect(),
        signal: signal.into_iter().map(Some).collect(),
        volume: series
            .points()
            .iter()
            .map(|p| p.volume.unwrap_or(0))
            .collect(),
    };

    series.with_indicators(indicators)
}

/// Simple moving average; `None` until `window` values are available
pub fn sma(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    let mut sma = SimpleMovingAverage::new(window)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let mean = sma.next(v);
            (i + 1 >= window).then_some(mean)
        })
        .collect())
}

// Exact per-window sums so a window without losses is exactly zero
fn window_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    for (i, w) in values.windows(window).enumerate() {
        out[i + window - 1] = Some(w.iter().sum::<f64>() / window as f64);
    }
    out
}

/// Relative Strength Index from simple rolling means of gains and losses
///
/// The first change has no predecessor and counts as zero gain and zero loss.
/// A window with losses of zero saturates at 100; a window with no movement
/// at all is undefined.
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let deltas: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|w| w[1] - w[0]))
        .take(closes.len())
        .collect();

    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    window_mean(&gains, window)
        .into_iter()
        .zip(window_mean(&losses, window))
        .map(|(gain, loss)| match (gain, loss) {
            (Some(gain), Some(loss)) => rsi_value(gain, loss),
            _ => None,
        })
        .collect()
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        // gain/loss is +inf, or 0/0 when nothing moved
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Exponential moving average seeded with the first value
///
/// Uses α = 2 / (span + 1) with no bias adjustment, so it is defined from the
/// first observation onward.
pub fn ema(values: &[f64], span: usize) -> Result<Vec<f64>> {
    let mut ema = ExponentialMovingAverage::new(span)
        .map_err(|e| StockError::IndicatorError(e.to_string()))?;
    Ok(values.iter().map(|&v| ema.next(v)).collect())
}

/// MACD line and its signal line
pub fn macd(closes: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let fast = ema(closes, MACD_FAST_SPAN)?;
    let slow = ema(closes, MACD_SLOW_SPAN)?;
    let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema(&line, MACD_SIGNAL_SPAN)?;
    Ok((line, signal))
}

/// Interpret an RSI value
pub fn interpret_rsi(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "Overbought - potential sell signal"
    } else if rsi < 30.0 {
        "Oversold - potential buy signal"
    } else {
        "Neutral"
    }
}
