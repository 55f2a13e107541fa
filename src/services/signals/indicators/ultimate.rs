//! Ultimate Oscillator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Ultimate Oscillator: buying pressure over true range, averaged across
/// three lookback windows weighted 4:2:1 and normalized to sum 7.
///
/// - 70 or above: overbought
/// - 30 or below: oversold
pub struct UltimateOscillator {
    short: usize,
    medium: usize,
    long: usize,
}

impl Default for UltimateOscillator {
    fn default() -> Self {
        Self {
            short: 7,
            medium: 14,
            long: 28,
        }
    }
}

impl UltimateOscillator {
    pub fn new(short: usize, medium: usize, long: usize) -> Self {
        Self { short, medium, long }
    }

    fn tag(value: f64) -> SignalTag {
        if value >= 70.0 {
            SignalTag::Overbought
        } else if value <= 30.0 {
            SignalTag::Oversold
        } else {
            SignalTag::Neutral
        }
    }

    /// Buying-pressure / true-range ratio over one window.
    fn window_ratio(
        bp: &[Option<f64>],
        tr: &[Option<f64>],
        window: usize,
    ) -> Option<f64> {
        let bp_sum = math::latest(&math::rolling_sum(bp, window))?;
        let tr_sum = math::latest(&math::rolling_sum(tr, window))?;
        if tr_sum > 0.0 {
            Some(bp_sum / tr_sum)
        } else {
            None
        }
    }
}

impl Indicator for UltimateOscillator {
    fn id(&self) -> &str {
        "ultimate"
    }

    fn name(&self) -> &str {
        "Ultimate Oscillator"
    }

    fn min_periods(&self) -> usize {
        self.long
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        // Buying pressure and true range against the previous close; the
        // first candle falls back to its own low/high.
        let bp: Vec<Option<f64>> = candles
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let floor = if i == 0 {
                    c.low
                } else {
                    c.low.min(candles[i - 1].close)
                };
                Some(c.close - floor)
            })
            .collect();
        let tr: Vec<Option<f64>> = candles
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let (floor, ceil) = if i == 0 {
                    (c.low, c.high)
                } else {
                    let prev = candles[i - 1].close;
                    (c.low.min(prev), c.high.max(prev))
                };
                Some(ceil - floor)
            })
            .collect();

        let a1 = Self::window_ratio(&bp, &tr, self.short)?;
        let a2 = Self::window_ratio(&bp, &tr, self.medium)?;
        let a3 = Self::window_ratio(&bp, &tr, self.long)?;

        let value = 100.0 * (4.0 * a1 + 2.0 * a2 + a3) / 7.0;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
