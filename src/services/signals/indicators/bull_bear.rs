//! Bull/Bear Power indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Bull/Bear Power: high minus EMA (bull) and low minus EMA (bear), both
/// against a span EMA of the close.
///
/// - both components positive: buy-leaning (bears cannot push below the mean)
/// - both components negative: sell-leaning
/// - mixed: neutral
///
/// The reported value is bull minus bear.
pub struct BullBearPower {
    period: usize,
}

impl Default for BullBearPower {
    fn default() -> Self {
        Self { period: 13 }
    }
}

impl BullBearPower {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(bull: f64, bear: f64) -> SignalTag {
        if bull > 0.0 && bear > 0.0 {
            SignalTag::Buy
        } else if bull < 0.0 && bear < 0.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for BullBearPower {
    fn id(&self) -> &str {
        "bull_bear"
    }

    fn name(&self) -> &str {
        "Bull/Bear Power(13)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let closes: Vec<Option<f64>> = candles.iter().map(|c| Some(c.close)).collect();
        let ema = math::latest(&math::ema(&closes, self.period))?;
        let last = candles.last()?;

        let bull = last.high - ema;
        let bear = last.low - ema;
        Some(make_reading(
            self.name(),
            bull - bear,
            Self::tag(bull, bear),
        ))
    }
}
