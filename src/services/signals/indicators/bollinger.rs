//! Bollinger Bands indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// Bollinger Bands.
///
/// Middle band is an SMA of the close; the band width is `k` population
/// standard deviations to each side. The reported value is %B (the close
/// located within the bands, as a percentage).
///
/// Like ATR this is a volatility readout and never votes: the tag compares
/// the total band width to the middle band, with 4% as the cut between low
/// and high volatility.
pub struct BollingerBands {
    period: usize,
    k: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self { period: 20, k: 2.0 }
    }
}

impl BollingerBands {
    pub fn new(period: usize, k: f64) -> Self {
        Self { period, k }
    }

    /// Latest (lower, middle, upper) bands.
    pub(crate) fn bands(&self, closes: &[Option<f64>]) -> Option<(f64, f64, f64)> {
        let middle = math::latest(&math::rolling_mean(closes, self.period))?;
        let stdev = math::latest(&math::rolling_stdev_pop(closes, self.period))?;
        let width = self.k * stdev;
        Some((middle - width, middle, middle + width))
    }

    fn tag(lower: f64, middle: f64, upper: f64) -> SignalTag {
        let width_pct = (upper - lower) / middle.max(1e-9) * 100.0;
        if width_pct < 4.0 {
            SignalTag::LowVolatility
        } else {
            SignalTag::HighVolatility
        }
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &str {
        "bollinger"
    }

    fn name(&self) -> &str {
        "Bollinger(20,2)"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        let closes: Vec<Option<f64>> = candles.iter().map(|c| Some(c.close)).collect();
        let (lower, middle, upper) = self.bands(&closes)?;

        let close = candles.last()?.close;
        let percent_b = if upper > lower {
            (close - lower) / (upper - lower) * 100.0
        } else {
            50.0
        };

        Some(make_reading(
            self.name(),
            percent_b,
            Self::tag(lower, middle, upper),
        ))
    }
}
