//! Williams %R indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Williams %R: where the close sits below the highest high of the
/// lookback window, on a 0 to -100 scale.
///
/// - -20 or above: overbought
/// - -80 or below: oversold
pub struct WilliamsR {
    period: usize,
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(value: f64) -> SignalTag {
        if value >= -20.0 {
            SignalTag::Overbought
        } else if value <= -80.0 {
            SignalTag::Oversold
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for WilliamsR {
    fn id(&self) -> &str {
        "williams_r"
    }

    fn name(&self) -> &str {
        "Williams %R"
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
        let value = (hh - close) / (hh - ll) * -100.0;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
