use crate::error::{Result, SignalError};
use crate::types::Timeframe;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SYMBOLS: &str = "BTC-USD,ETH-USD,SOL-USD,XRP-USD,EURUSD=X,GBPUSD=X,GC=F,CL=F";
const DEFAULT_TIMEFRAMES: &str = "5m,15m,30m,1h,4h";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instruments to evaluate each cycle.
    pub instruments: Vec<String>,
    /// Timeframes the scheduler may invoke.
    pub timeframes: Vec<Timeframe>,
    /// Cooldown between announcements carrying the same debounce key.
    pub cooldown: Duration,
    /// Minimum candles required after cleaning.
    pub min_candles: usize,
    /// Path for the debounce state snapshot.
    pub state_file: PathBuf,
    /// Base URL of the candle supplier API.
    pub candle_api_url: Option<String>,
    /// Webhook URL announcements are delivered to.
    pub webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// An empty instrument or timeframe list is a setup error; everything
    /// else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let instruments: Vec<String> = env::var("SYMBOLS")
            .unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if instruments.is_empty() {
            return Err(SignalError::Setup("no instruments configured".into()));
        }

        let raw_timeframes = env::var("TIMEFRAMES").unwrap_or_else(|_| DEFAULT_TIMEFRAMES.to_string());
        let mut timeframes = Vec::new();
        for part in raw_timeframes.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match Timeframe::from_label(part) {
                Some(tf) => timeframes.push(tf),
                None => {
                    return Err(SignalError::Setup(format!("unknown timeframe: {}", part)));
                }
            }
        }
        if timeframes.is_empty() {
            return Err(SignalError::Setup("no timeframes configured".into()));
        }

        let cooldown_min: u64 = env::var("DEBOUNCE_MIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let min_candles: usize = env::var("MIN_CANDLES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let state_file = env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("state.json"));

        Ok(Self {
            instruments,
            timeframes,
            cooldown: Duration::from_secs(cooldown_min * 60),
            min_candles,
            state_file,
            candle_api_url: env::var("CANDLE_API_URL").ok(),
            webhook_url: env::var("WEBHOOK_URL").ok(),
        })
    }
}
