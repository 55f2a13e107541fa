//! Highs/Lows oscillator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Highs/Lows oscillator: the close located within the lookback high/low
/// range, 0-100. Unlike the stochastic, an extreme here reads as trend
/// confirmation rather than exhaustion:
/// - 80 or above: buy-leaning
/// - 20 or below: sell-leaning
pub struct HighsLows {
    period: usize,
}

impl Default for HighsLows {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl HighsLows {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(value: f64) -> SignalTag {
        if value >= 80.0 {
            SignalTag::Buy
        } else if value <= 20.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for HighsLows {
    fn id(&self) -> &str {
        "highs_lows"
    }

    fn name(&self) -> &str {
        "Highs/Lows(14)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let highs: Vec<Option<f64>> = candles.iter().map(|c| Some(c.high)).collect();
        let lows: Vec<Option<f64>> = candles.iter().map(|c| Some(c.low)).collect();

        let hh = math::latest(&math::rolling_max(&highs, self.period))?;
        let ll = math::latest(&math::rolling_min(&lows, self.period))?;
        if hh <= ll {
            return None;
        }

        let close = candles.last()?.close;
        let value = (close - ll) / (hh - ll) * 100.0;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
