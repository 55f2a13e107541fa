//! Stochastic oscillator (%K/%D).

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Stochastic oscillator.
///
/// %K locates the close within the high/low range of the lookback window,
/// %D is an SMA of %K. Tagged on %K:
/// - 80 or above: overbought
/// - 20 or below: oversold
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 9,
            d_period: 6,
        }
    }
}

impl Stochastic {
    pub fn new(k_period: usize, d_period: usize) -> Self {
        Self { k_period, d_period }
    }

    /// %K series. A flat window (highest high == lowest low) yields None.
    pub(crate) fn percent_k(
        highs: &[Option<f64>],
        lows: &[Option<f64>],
        closes: &[Option<f64>],
        period: usize,
    ) -> Vec<Option<f64>> {
        let hh = math::rolling_max(highs, period);
        let ll = math::rolling_min(lows, period);

        closes
            .iter()
            .enumerate()
            .map(|(i, c)| match (c, hh[i], ll[i]) {
                (Some(c), Some(hh), Some(ll)) if hh > ll => Some((c - ll) / (hh - ll) * 100.0),
                _ => None,
            })
            .collect()
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

impl Indicator for Stochastic {
    fn id(&self) -> &str {
        "stoch"
    }

    fn name(&self) -> &str {
        "STOCH(9,6)"
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let highs: Vec<Option<f64>> = candles.iter().map(|c| Some(c.high)).collect();
        let lows: Vec<Option<f64>> = candles.iter().map(|c| Some(c.low)).collect();
        let closes: Vec<Option<f64>> = candles.iter().map(|c| Some(c.close)).collect();

        let k = Self::percent_k(&highs, &lows, &closes, self.k_period);
        // %D is computed for completeness of the lookback requirement; the
        // tag follows %K like the reference thresholds.
        let d = math::rolling_mean(&k, self.d_period);
        math::latest(&d)?;

        let value = math::latest(&k)?;
        Some(make_reading(self.name(), value, Self::tag(value)))
    }
}
