//! Average True Range (ATR) indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// ATR: Wilder-smoothed true range.
///
/// ATR describes how much the instrument moves, not where it is going, so
/// it never votes. The tag compares ATR to the last close:
/// - below 1% of price: low volatility
/// - 1% of price or more: high volatility
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(atr: f64, close: f64) -> SignalTag {
        let ratio = atr / close.max(1e-9) * 100.0;
        if ratio < 1.0 {
            SignalTag::LowVolatility
        } else {
            SignalTag::HighVolatility
        }
    }
}

impl Indicator for Atr {
    fn id(&self) -> &str {
        "atr"
    }

    fn name(&self) -> &str {
        "ATR(14)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let atr = math::latest(&math::wilder(&math::true_ranges(candles), self.period))?;
        let close = candles.last()?.close;
        Some(make_reading(self.name(), atr, Self::tag(atr, close)))
    }
}
