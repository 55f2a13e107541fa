use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Candle timeframe for an evaluation.
///
/// The supplier is only expected to serve the native intervals; 4-hour
/// series are aggregated from hourly candles by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    FiveMinute,
    FifteenMinute,
    ThirtyMinute,
    OneHour,
    FourHour,
}

impl Timeframe {
    /// Parse from a compact label ("5m", "15m", "30m", "1h", "4h").
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "5m" => Some(Self::FiveMinute),
            "15m" => Some(Self::FifteenMinute),
            "30m" => Some(Self::ThirtyMinute),
            "1h" | "60m" => Some(Self::OneHour),
            "4h" => Some(Self::FourHour),
            _ => None,
        }
    }

    /// Compact display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FiveMinute => "5m",
            Self::FifteenMinute => "15m",
            Self::ThirtyMinute => "30m",
            Self::OneHour => "1h",
            Self::FourHour => "4h",
        }
    }

    /// Bucket duration in minutes.
    pub fn minutes(&self) -> i64 {
        match self {
            Self::FiveMinute => 5,
            Self::FifteenMinute => 15,
            Self::ThirtyMinute => 30,
            Self::OneHour => 60,
            Self::FourHour => 240,
        }
    }

    /// Bucket duration in milliseconds.
    pub fn millis(&self) -> i64 {
        self.minutes() * 60_000
    }

    /// The interval to request from the supplier. Four-hour data is built
    /// from hourly candles; every other timeframe is served natively.
    pub fn native(&self) -> Timeframe {
        match self {
            Self::FourHour => Self::OneHour,
            other => *other,
        }
    }

    /// Number of native candles per bucket of this timeframe.
    pub fn aggregate_factor(&self) -> usize {
        (self.minutes() / self.native().minutes()) as usize
    }
}

/// A candle row as delivered by the supplier.
///
/// Timestamps keep their zone offset until normalization; OHLCV fields may
/// be absent and incomplete rows are dropped by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandle {
    pub time: DateTime<FixedOffset>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// A normalized OHLC(V) candle.
///
/// Time is the epoch-millisecond instant (zone stripped); the normalizer
/// guarantees strictly increasing times within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}
