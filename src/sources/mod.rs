//! Candle suppliers.

pub mod http;

pub use http::HttpCandleSupplier;

use crate::error::Result;
use crate::types::{RawCandle, Timeframe};

/// A source of raw candle series.
///
/// Implementations fetch the most recent candles for an instrument at the
/// supplier's native interval; callers normalize and aggregate afterwards.
pub trait CandleSupplier: Send + Sync {
    /// Fetch recent candles for one instrument at one timeframe, newest
    /// last. Order and completeness are not guaranteed.
    fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> impl std::future::Future<Output = Result<Vec<RawCandle>>> + Send;
}
