//! Stochastic RSI indicator.

use crate::services::signals::indicators::{Rsi, Stochastic};
use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// StochRSI: the stochastic %K formula applied to the RSI series instead of
/// price, scaled to 0-100.
///
/// - 80 or above: overbought
/// - 20 or below: oversold
///
/// When RSI is pinned flat (e.g. a loss-free streak holding RSI at 100) the
/// window has zero range and the indicator abstains.
pub struct StochRsi {
    period: usize,
}

impl Default for StochRsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl StochRsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(value: f64) -> SignalTag {
        if value >= 80.0 {
            SignalTag::Overbought
        } else if value <= 20.0 {
            SignalTag::Oversold
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for StochRsi {
    fn id(&self) -> &str {
        "stochrsi"
    }

    fn name(&self) -> &str {
        "STOCHRSI(14)"
    }

    fn min_periods(&self) -> usize {
        // One RSI warmup plus a full stochastic window over RSI values.
        self.period * 2
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let rsi = Rsi::rsi_series(&closes, self.period);
        let k = Stochastic::percent_k(&rsi, &rsi, &rsi, self.period);
        let value = math::latest(&k)?;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
