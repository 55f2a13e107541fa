//! Core data types shared across the crate.

mod candle;
mod signals;

pub use candle::{Candle, RawCandle, Timeframe};
pub use signals::{Announcement, IndicatorReading, SignalTag, Verdict};
