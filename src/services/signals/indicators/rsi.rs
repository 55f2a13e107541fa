//! Relative Strength Index (RSI) indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// RSI (Relative Strength Index) indicator.
///
/// Wilder-smoothed ratio of average gains to average losses, 0-100:
/// - 30 or below: oversold, buy-leaning
/// - 70 or above: overbought, sell-leaning
///
/// A streak with no losses is defined as RSI 100, not NaN, so an extreme
/// trend still reaches the classifier as an extreme.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// RSI series aligned to the input closes. Shared with StochRSI.
    pub(crate) fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut gains = vec![None; closes.len()];
        let mut losses = vec![None; closes.len()];
        for i in 1..closes.len() {
            let change = closes[i] - closes[i - 1];
            gains[i] = Some(change.max(0.0));
            losses[i] = Some((-change).max(0.0));
        }

        let avg_gain = math::wilder(&gains, period);
        let avg_loss = math::wilder(&losses, period);

        avg_gain
            .iter()
            .zip(avg_loss.iter())
            .map(|(g, l)| match (g, l) {
                (Some(g), Some(l)) => {
                    if *l == 0.0 {
                        Some(100.0)
                    } else {
                        Some(100.0 - 100.0 / (1.0 + g / l))
                    }
                }
                _ => None,
            })
            .collect()
    }

    fn tag(value: f64) -> SignalTag {
        if value <= 30.0 {
            SignalTag::Buy
        } else if value >= 70.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn name(&self) -> &str {
        "RSI(14)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let value = math::latest(&Self::rsi_series(&closes, self.period))?;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
