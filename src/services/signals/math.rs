//! Shared rolling-window and smoothing primitives.
//!
//! All functions return a sequence aligned to the input, with `None` wherever
//! the lookback is not yet satisfied. Entries before an indicator's minimum
//! lookback are absent, never zero, so a too-short series surfaces as an
//! abstaining indicator instead of a silent NaN.

use crate::types::Candle;

/// Lift a plain slice into the aligned `Option` representation.
pub fn lift(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|v| Some(*v)).collect()
}

/// Latest present value of an aligned sequence.
pub fn latest(values: &[Option<f64>]) -> Option<f64> {
    values.last().copied().flatten()
}

/// Exponentially weighted moving average.
///
/// Recursive form seeded at the first present value; leading `None`s are
/// skipped and output only appears once `min_periods` observations have been
/// folded in. Callers pick the convention via `alpha`: span EMA uses
/// 2/(n+1), Wilder smoothing uses 1/n. The two must not be interchanged.
pub fn ewm(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let mut state: Option<f64> = None;
    let mut count = 0usize;

    for (i, v) in values.iter().enumerate() {
        if let Some(x) = v {
            state = Some(match state {
                Some(prev) => alpha * x + (1.0 - alpha) * prev,
                None => *x,
            });
            count += 1;
            if count >= min_periods {
                out[i] = state;
            }
        }
    }

    out
}

/// Span-convention EMA: alpha = 2 / (span + 1), first value after `span`
/// observations.
pub fn ema(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    ewm(values, 2.0 / (span as f64 + 1.0), span)
}

/// Wilder smoothing: alpha = 1 / period, first value after `period`
/// observations.
pub fn wilder(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    ewm(values, 1.0 / period as f64, period)
}

/// Apply `fold` over each full window of `window` present values.
/// Windows touching a `None` produce `None`.
fn rolling<F>(values: &[Option<f64>], window: usize, fold: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut buf = Vec::with_capacity(window);
    for i in (window - 1)..values.len() {
        buf.clear();
        let mut complete = true;
        for v in &values[i + 1 - window..=i] {
            match v {
                Some(x) => buf.push(*x),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            out[i] = Some(fold(&buf));
        }
    }

    out
}

/// Simple moving average over a full window.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling sum over a full window.
pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().sum::<f64>())
}

/// Rolling maximum over a full window.
pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().fold(f64::MIN, |a, b| a.max(*b)))
}

/// Rolling minimum over a full window.
pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().fold(f64::MAX, |a, b| a.min(*b)))
}

/// Rolling population standard deviation over a full window.
pub fn rolling_stdev_pop(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let variance = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / w.len() as f64;
        variance.sqrt()
    })
}

/// True range per candle: max(high - low, |high - prevClose|, |low - prevClose|).
/// The first candle has no previous close and uses high - low.
pub fn true_ranges(candles: &[Candle]) -> Vec<Option<f64>> {
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let tr = if i == 0 {
                c.high - c.low
            } else {
                let prev_close = candles[i - 1].close;
                (c.high - c.low)
                    .max((c.high - prev_close).abs())
                    .max((c.low - prev_close).abs())
            };
            Some(tr)
        })
        .collect()
}
