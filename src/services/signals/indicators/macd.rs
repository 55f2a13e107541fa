//! MACD (Moving Average Convergence Divergence) indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// MACD indicator.
///
/// Line = EMA(fast) - EMA(slow), signal = EMA(signal) of the line,
/// histogram = line - signal. All three use span EMAs (alpha = 2/(span+1)).
/// Tagged on the histogram:
/// - above zero: buy-leaning
/// - below zero: sell-leaning
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    /// Histogram series aligned to the closes.
    fn histogram(&self, closes: &[Option<f64>]) -> Vec<Option<f64>> {
        let fast = math::ema(closes, self.fast);
        let slow = math::ema(closes, self.slow);

        let line: Vec<Option<f64>> = fast
            .iter()
            .zip(slow.iter())
            .map(|(f, s)| match (f, s) {
                (Some(f), Some(s)) => Some(f - s),
                _ => None,
            })
            .collect();

        let signal = math::ema(&line, self.signal);

        line.iter()
            .zip(signal.iter())
            .map(|(l, s)| match (l, s) {
                (Some(l), Some(s)) => Some(l - s),
                _ => None,
            })
            .collect()
    }

    fn tag(histogram: f64) -> SignalTag {
        if histogram > 0.0 {
            SignalTag::Buy
        } else if histogram < 0.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        "macd"
    }

    fn name(&self) -> &str {
        "MACD(12,26)"
    }

    fn min_periods(&self) -> usize {
        self.slow + self.signal - 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let closes: Vec<Option<f64>> = candles.iter().map(|c| Some(c.close)).collect();
        let value = math::latest(&self.histogram(&closes))?;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
