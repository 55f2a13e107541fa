//! Indicator library and verdict aggregation.
//!
//! Each indicator is a pure function of a normalized candle series: it
//! computes its latest value and classifies it with a fixed-threshold tag.
//! Indicators whose lookback is not satisfied abstain (`None`) and are
//! excluded from the vote tally entirely.

pub mod indicators;
pub mod math;
pub mod verdict;

use crate::types::{Candle, IndicatorReading, SignalTag};

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this indicator.
    fn id(&self) -> &str;

    /// Human-readable name, including parameters.
    fn name(&self) -> &str;

    /// Minimum number of candle periods required for a value.
    fn min_periods(&self) -> usize;

    /// Compute the latest value and tag from a normalized series.
    /// Returns None when the lookback is not satisfied or the input is
    /// degenerate (flat window, zero range); the indicator then abstains.
    fn evaluate(&self, candles: &[Candle]) -> Option<IndicatorReading>;
}

/// Helper to create an IndicatorReading.
pub fn make_reading(name: &str, value: f64, tag: SignalTag) -> IndicatorReading {
    IndicatorReading {
        name: name.to_string(),
        value,
        tag,
    }
}
