//! Rate of Change (ROC) indicator.

use crate::services::signals::{make_reading, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// ROC: percentage change of the close against the close `period` candles
/// ago. Positive means buy-leaning, negative sell-leaning.
pub struct Roc {
    period: usize,
}

impl Default for Roc {
    fn default() -> Self {
        Self { period: 12 }
    }
}

impl Roc {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(value: f64) -> SignalTag {
        if value > 0.0 {
            SignalTag::Buy
        } else if value < 0.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for Roc {
    fn id(&self) -> &str {
        "roc"
    }

    fn name(&self) -> &str {
        "ROC(12)"
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        if candles.len() <= self.period {
            return None;
        }
        let close = candles.last()?.close;
        let past = candles[candles.len() - 1 - self.period].close;
        if past == 0.0 {
            return None;
        }
        let value = (close / past - 1.0) * 100.0;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
