//! Candle normalization.
//!
//! Shapes a raw supplier series into the canonical form the indicator
//! library expects: four numeric columns indexed by strictly increasing
//! epoch-millisecond timestamps, aggregated up to the requested timeframe
//! when the supplier only serves a smaller native interval.

use crate::error::{Result, SignalError};
use crate::types::{Candle, RawCandle, Timeframe};
use chrono::Utc;
use tracing::debug;

/// Normalize a raw series for the requested timeframe.
///
/// Rows missing close, high, or low are dropped (a missing open falls back
/// to the close); timezone-aware timestamps are collapsed to their UTC
/// instant; out-of-order or duplicate timestamps are discarded. Non-native
/// timeframes are bucket-aggregated from the native interval, dropping the
/// incomplete trailing bucket. Fails with `InsufficientData` when fewer
/// than `min_candles` remain. Pure: the input is consumed, nothing else is
/// touched.
pub fn normalize(
    raw: Vec<RawCandle>,
    timeframe: Timeframe,
    min_candles: usize,
) -> Result<Vec<Candle>> {
    let mut candles: Vec<Candle> = raw
        .into_iter()
        .filter_map(|r| {
            let close = r.close?;
            let high = r.high?;
            let low = r.low?;
            Some(Candle {
                time: r.time.with_timezone(&Utc).timestamp_millis(),
                open: r.open.unwrap_or(close),
                high,
                low,
                close,
                volume: r.volume,
            })
        })
        .collect();

    candles.sort_by_key(|c| c.time);
    candles.dedup_by_key(|c| c.time);

    let factor = timeframe.aggregate_factor();
    if factor > 1 {
        candles = aggregate(&candles, timeframe, factor);
    }

    if candles.len() < min_candles {
        debug!(
            "series too short after cleaning: {} of {} required",
            candles.len(),
            min_candles
        );
        return Err(SignalError::InsufficientData {
            got: candles.len(),
            need: min_candles,
        });
    }

    Ok(candles)
}

/// Aggregate native-interval candles into buckets of the target timeframe:
/// open = first, high = max, low = min, close = last, volume = sum.
fn aggregate(candles: &[Candle], timeframe: Timeframe, factor: usize) -> Vec<Candle> {
    let bucket_ms = timeframe.millis();
    let mut buckets: Vec<(Candle, usize)> = Vec::with_capacity(candles.len() / factor + 1);

    for c in candles {
        let bucket_time = c.time - c.time.rem_euclid(bucket_ms);
        match buckets.last_mut() {
            Some((last, count)) if last.time == bucket_time => {
                last.high = last.high.max(c.high);
                last.low = last.low.min(c.low);
                last.close = c.close;
                last.volume = match (last.volume, c.volume) {
                    (Some(a), Some(b)) => Some(a + b),
                    (a, b) => a.or(b),
                };
                *count += 1;
            }
            _ => {
                buckets.push((
                    Candle {
                        time: bucket_time,
                        ..*c
                    },
                    1,
                ));
            }
        }
    }

    // The in-progress trailing bucket would misrepresent its interval.
    if let Some((_, count)) = buckets.last() {
        if *count < factor {
            buckets.pop();
        }
    }

    buckets.into_iter().map(|(c, _)| c).collect()
}
