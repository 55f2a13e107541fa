//! End-to-end pipeline tests with in-memory supplier and sink.

use chrono::{TimeZone, Utc};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vigil::services::{DebounceGate, Evaluator, Outcome};
use vigil::sink::AnnouncementSink;
use vigil::sources::CandleSupplier;
use vigil::types::{Announcement, RawCandle, Timeframe, Verdict};
use vigil::{Config, Result, SignalError};

const HOUR_MS: i64 = 3_600_000;
const BASE_MS: i64 = 1_700_006_400_000;
const COOLDOWN: Duration = Duration::from_secs(3600);

fn raw_candle(index: usize, base: f64, spread_up: f64, spread_down: f64, step: f64) -> RawCandle {
    let level = base + index as f64 * step;
    RawCandle {
        time: Utc
            .timestamp_millis_opt(BASE_MS + index as i64 * HOUR_MS)
            .unwrap()
            .fixed_offset(),
        open: Some(level),
        high: Some(level + spread_up),
        low: Some(level - spread_down),
        close: Some(level + spread_up - spread_down),
        volume: Some(1000.0),
    }
}

fn uptrend_series(count: usize) -> Vec<RawCandle> {
    (0..count).map(|i| raw_candle(i, 100.0, 2.0, 1.0, 1.5)).collect()
}

fn downtrend_series(count: usize) -> Vec<RawCandle> {
    (0..count).map(|i| raw_candle(i, 200.0, 1.0, 2.0, -1.5)).collect()
}

#[derive(Clone)]
struct MockSupplier {
    series: Arc<Mutex<HashMap<String, Vec<RawCandle>>>>,
    fail_for: Arc<Mutex<Vec<String>>>,
    requested: Arc<Mutex<Vec<(String, Timeframe)>>>,
}

impl MockSupplier {
    fn new() -> Self {
        Self {
            series: Arc::new(Mutex::new(HashMap::new())),
            fail_for: Arc::new(Mutex::new(Vec::new())),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn serve(&self, instrument: &str, candles: Vec<RawCandle>) {
        self.series
            .lock()
            .unwrap()
            .insert(instrument.to_string(), candles);
    }

    fn fail_instrument(&self, instrument: &str) {
        self.fail_for.lock().unwrap().push(instrument.to_string());
    }
}

impl CandleSupplier for MockSupplier {
    async fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<RawCandle>> {
        self.requested
            .lock()
            .unwrap()
            .push((instrument.to_string(), timeframe));
        if self.fail_for.lock().unwrap().iter().any(|i| i == instrument) {
            return Err(SignalError::SupplierUnavailable(format!(
                "no data for {instrument}"
            )));
        }
        Ok(self
            .series
            .lock()
            .unwrap()
            .get(instrument)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone)]
struct RecordingSink {
    delivered: Arc<Mutex<Vec<Announcement>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    fn delivered(&self) -> Vec<Announcement> {
        self.delivered.lock().unwrap().clone()
    }
}

impl AnnouncementSink for RecordingSink {
    async fn deliver(&self, announcement: &Announcement) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SignalError::DeliveryFailed("sink offline".into()));
        }
        self.delivered.lock().unwrap().push(announcement.clone());
        Ok(())
    }
}

fn test_config(instruments: &[&str]) -> Arc<Config> {
    Arc::new(Config {
        instruments: instruments.iter().map(|s| s.to_string()).collect(),
        timeframes: vec![Timeframe::OneHour, Timeframe::FourHour],
        cooldown: COOLDOWN,
        min_candles: 60,
        state_file: PathBuf::from("state.json"),
        candle_api_url: None,
        webhook_url: None,
    })
}

fn build_evaluator(
    supplier: &MockSupplier,
    sink: &RecordingSink,
    instruments: &[&str],
) -> Evaluator<MockSupplier, RecordingSink> {
    let gate = Arc::new(DebounceGate::new(COOLDOWN.as_millis() as i64));
    Evaluator::new(
        supplier.clone(),
        sink.clone(),
        gate,
        test_config(instruments),
    )
}

#[tokio::test]
async fn test_uptrend_produces_buy_verdict() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let outcome = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap();

    let announcement = match outcome {
        Outcome::Announced(a) => a,
        other => panic!("expected announcement, got {other:?}"),
    };

    // A steady climb splits the roster: trend and momentum confirmation
    // vote buy while the bounded oscillators are pinned overbought.
    assert_eq!(announcement.verdict, Verdict::Buy);
    assert_eq!(announcement.buy_votes, 5);
    assert_eq!(announcement.sell_votes, 3);

    let rsi = announcement
        .readings
        .iter()
        .find(|r| r.name.starts_with("RSI"))
        .unwrap();
    assert!(rsi.value > 70.0);

    let macd = announcement
        .readings
        .iter()
        .find(|r| r.name.starts_with("MACD"))
        .unwrap();
    assert!(macd.value > 0.0);

    let last_close = 100.0 + 59.0 * 1.5 + 1.0;
    assert!((announcement.reference_price - last_close).abs() < 1e-9);
    assert_eq!(sink.delivered().len(), 1);
}

#[tokio::test]
async fn test_downtrend_produces_sell_verdict() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", downtrend_series(60));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let outcome = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap();

    match outcome {
        Outcome::Announced(a) => {
            assert_eq!(a.verdict, Verdict::Sell);
            assert_eq!(a.sell_votes, 5);
            assert_eq!(a.buy_votes, 3);
        }
        other => panic!("expected announcement, got {other:?}"),
    }
}

#[tokio::test]
async fn test_repeat_verdict_is_suppressed_within_cooldown() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let first = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap();
    assert!(matches!(first, Outcome::Announced(_)));

    let second = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS + 60_000)
        .await
        .unwrap();
    assert!(matches!(second, Outcome::Suppressed(_)));
    assert_eq!(sink.delivered().len(), 1);

    // Past the cooldown the same verdict announces again.
    let third = evaluator
        .evaluate_pair(
            "BTC-USD",
            Timeframe::OneHour,
            BASE_MS + COOLDOWN.as_millis() as i64,
        )
        .await
        .unwrap();
    assert!(matches!(third, Outcome::Announced(_)));
    assert_eq!(sink.delivered().len(), 2);
}

#[tokio::test]
async fn test_failed_delivery_leaves_gate_open_for_retry() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    let sink = RecordingSink::new();
    sink.fail.store(true, Ordering::SeqCst);
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let err = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap_err();
    assert!(matches!(err, SignalError::DeliveryFailed(_)));
    assert!(sink.delivered().is_empty());

    // Next cycle succeeds without waiting out the cooldown.
    sink.fail.store(false, Ordering::SeqCst);
    let retry = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS + 60_000)
        .await
        .unwrap();
    assert!(matches!(retry, Outcome::Announced(_)));
    assert_eq!(sink.delivered().len(), 1);
}

#[tokio::test]
async fn test_concurrent_evaluations_admit_one_announcement() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let outcomes = join_all(
        (0..8).map(|_| evaluator.evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)),
    )
    .await;

    let announced = outcomes
        .iter()
        .filter(|o| matches!(o, Ok(Outcome::Announced(_))))
        .count();
    assert_eq!(announced, 1);
    assert_eq!(sink.delivered().len(), 1);
}

#[tokio::test]
async fn test_short_series_is_skipped() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(30));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let err = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SignalError::InsufficientData { got: 30, need: 60 }
    ));
    assert!(sink.delivered().is_empty());
}

#[tokio::test]
async fn test_one_supplier_failure_does_not_block_the_pass() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    supplier.serve("SOL-USD", downtrend_series(60));
    supplier.fail_instrument("ETH-USD");
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD", "ETH-USD", "SOL-USD"]);

    let stats = evaluator.run_timeframe(Timeframe::OneHour).await;
    assert_eq!(stats.announced, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.suppressed, 0);
    assert_eq!(sink.delivered().len(), 2);
}

#[tokio::test]
async fn test_four_hour_pass_fetches_hourly() {
    // 240 hourly candles aggregate to 60 four-hour buckets.
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(240));
    let sink = RecordingSink::new();
    let evaluator = build_evaluator(&supplier, &sink, &["BTC-USD"]);

    let outcome = evaluator
        .evaluate_pair("BTC-USD", Timeframe::FourHour, BASE_MS)
        .await
        .unwrap();

    let requested = supplier.requested.lock().unwrap().clone();
    assert_eq!(requested, vec![("BTC-USD".to_string(), Timeframe::OneHour)]);

    match outcome {
        Outcome::Announced(a) => {
            assert_eq!(a.timeframe, Timeframe::FourHour);
            // The wider buckets push the Ultimate Oscillator overbought,
            // narrowing the margin to +1.
            assert_eq!(a.buy_votes, 5);
            assert_eq!(a.sell_votes, 4);
            assert_eq!(a.verdict, Verdict::Neutral);
        }
        other => panic!("expected announcement, got {other:?}"),
    }
}

#[tokio::test]
async fn test_restored_snapshot_keeps_suppressing() {
    let supplier = MockSupplier::new();
    supplier.serve("BTC-USD", uptrend_series(60));
    let sink = RecordingSink::new();

    let gate = Arc::new(DebounceGate::new(COOLDOWN.as_millis() as i64));
    let evaluator = Evaluator::new(
        supplier.clone(),
        sink.clone(),
        Arc::clone(&gate),
        test_config(&["BTC-USD"]),
    );
    let first = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS)
        .await
        .unwrap();
    assert!(matches!(first, Outcome::Announced(_)));

    // A fresh gate seeded from the snapshot suppresses the repeat.
    let restored = Arc::new(DebounceGate::new(COOLDOWN.as_millis() as i64));
    restored.load_snapshot(gate.snapshot());
    let evaluator = Evaluator::new(
        supplier.clone(),
        sink.clone(),
        restored,
        test_config(&["BTC-USD"]),
    );
    let second = evaluator
        .evaluate_pair("BTC-USD", Timeframe::OneHour, BASE_MS + 60_000)
        .await
        .unwrap();
    assert!(matches!(second, Outcome::Suppressed(_)));
    assert_eq!(sink.delivered().len(), 1);
}
