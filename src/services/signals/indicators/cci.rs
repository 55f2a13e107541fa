//! Commodity Channel Index (CCI) indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// CCI: typical-price deviation from its SMA, scaled by 0.015 times the
/// rolling mean absolute deviation.
///
/// The deviation series measures each bar's typical price against the SMA
/// at that bar, and the MAD is a rolling mean over those deviations (the
/// reference convention, not the textbook in-window MAD).
///
/// - 100 or above: buy-leaning
/// - -100 or below: sell-leaning
pub struct Cci {
    period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Cci {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(value: f64) -> SignalTag {
        if value >= 100.0 {
            SignalTag::Buy
        } else if value <= -100.0 {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for Cci {
    fn id(&self) -> &str {
        "cci"
    }

    fn name(&self) -> &str {
        "CCI(14)"
    }

    fn min_periods(&self) -> usize {
        self.period * 2 - 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let tp: Vec<Option<f64>> = candles
            .iter()
            .map(|c| Some((c.high + c.low + c.close) / 3.0))
            .collect();

        let ma = math::rolling_mean(&tp, self.period);
        let deviation: Vec<Option<f64>> = tp
            .iter()
            .zip(ma.iter())
            .map(|(t, m)| match (t, m) {
                (Some(t), Some(m)) => Some((t - m).abs()),
                _ => None,
            })
            .collect();
        let mad = math::rolling_mean(&deviation, self.period);

        let last = candles.len().checked_sub(1)?;
        let (tp, ma, mad) = match (tp[last], ma[last], mad[last]) {
            (Some(t), Some(m), Some(d)) if d > 0.0 => (t, m, d),
            _ => return None,
        };

        let value = (tp - ma) / (0.015 * mad);
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
