//! Average Directional Index (ADX) indicator.

use crate::services::signals::{make_reading, math, Indicator};
use crate::types::{Candle, IndicatorReading, SignalTag};

/// ADX (Average Directional Index) with +DI/-DI for direction.
///
/// Directional movement is the clipped high/low step (+DM = max(0, high
/// step), -DM = max(0, -low step)); +DI/-DI divide the Wilder-smoothed DM
/// by the Wilder-smoothed true range, DX measures their spread and ADX is
/// Wilder-smoothed DX. Tag rule:
/// - ADX 25 or above with +DI > -DI: buy-leaning
/// - ADX 25 or above with +DI < -DI: sell-leaning
/// - otherwise: neutral (no trend worth following)
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    fn tag(adx: f64, plus_di: f64, minus_di: f64) -> SignalTag {
        if adx >= 25.0 && plus_di > minus_di {
            SignalTag::Buy
        } else if adx >= 25.0 && plus_di < minus_di {
            SignalTag::Sell
        } else {
            SignalTag::Neutral
        }
    }
}

impl Indicator for Adx {
    fn id(&self) -> &str {
        "adx"
    }

    fn name(&self) -> &str {
        "ADX(14)"
    }

    fn min_periods(&self) -> usize {
        self.period * 2
    }

    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading> {
        if candles.len() < 2 {
            return None;
        }

        let mut plus_dm = vec![None; candles.len()];
        let mut minus_dm = vec![None; candles.len()];
        for i in 1..candles.len() {
            plus_dm[i] = Some((candles[i].high - candles[i - 1].high).max(0.0));
            minus_dm[i] = Some((candles[i - 1].low - candles[i].low).max(0.0));
        }

        let atr = math::wilder(&math::true_ranges(candles), self.period);
        let smoothed_plus = math::wilder(&plus_dm, self.period);
        let smoothed_minus = math::wilder(&minus_dm, self.period);

        let di = |dm: &[Option<f64>], i: usize| -> Option<f64> {
            match (dm[i], atr[i]) {
                (Some(dm), Some(atr)) if atr > 0.0 => Some(100.0 * dm / atr),
                _ => None,
            }
        };

        let dx: Vec<Option<f64>> = (0..candles.len())
            .map(|i| {
                let plus = di(&smoothed_plus, i)?;
                let minus = di(&smoothed_minus, i)?;
                let sum = plus + minus;
                if sum > 0.0 {
                    Some(100.0 * (plus - minus).abs() / sum)
                } else {
                    Some(0.0)
                }
            })
            .collect();

        let adx = math::latest(&math::wilder(&dx, self.period))?;
        let last = candles.len() - 1;
        let plus_di = di(&smoothed_plus, last)?;
        let minus_di = di(&smoothed_minus, last)?;

        Some(make_reading(
            self.name(),
            adx,
            Self::tag(adx, plus_di, minus_di),
        ))
    }
}
