//! HTTP candle supplier.

use super::CandleSupplier;
use crate::error::{Result, SignalError};
use crate::types::{RawCandle, Timeframe};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// A single candle row as served by the HTTP API. Epoch milliseconds plus
/// OHLCV columns, any of which the venue may omit.
#[derive(Debug, Deserialize)]
struct ApiCandle {
    time: i64,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

/// Fetches candle series over HTTP from a JSON endpoint.
pub struct HttpCandleSupplier {
    client: reqwest::Client,
    base_url: String,
    limit: usize,
}

impl HttpCandleSupplier {
    pub fn new(base_url: String, limit: usize) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("vigil/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url,
            limit,
        }
    }
}

impl CandleSupplier for HttpCandleSupplier {
    async fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<RawCandle>> {
        let url = format!(
            "{}?symbol={}&interval={}&limit={}",
            self.base_url,
            instrument,
            timeframe.label(),
            self.limit
        );
        debug!("fetching candles: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SignalError::SupplierUnavailable(format!(
                "{} returned {} for {}",
                self.base_url,
                response.status(),
                instrument
            )));
        }

        let rows: Vec<ApiCandle> = response.json().await?;
        debug!("received {} rows for {}/{}", rows.len(), instrument, timeframe.label());

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                let time = Utc.timestamp_millis_opt(r.time).single()?.fixed_offset();
                Some(RawCandle {
                    time,
                    open: r.open,
                    high: r.high,
                    low: r.low,
                    close: r.close,
                    volume: r.volume,
                })
            })
            .collect())
    }
}
