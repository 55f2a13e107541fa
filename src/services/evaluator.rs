//! Evaluation orchestrator.
//!
//! Drives one (instrument, timeframe) pair through the full pipeline:
//! fetch, normalize, evaluate the indicator roster, aggregate the verdict,
//! then pass the result through the debounce gate to the sink.

use crate::config::Config;
use crate::error::Result;
use crate::services::debounce::{debounce_key, DebounceGate};
use crate::services::normalizer;
use crate::services::signals::indicators::all_indicators;
use crate::services::signals::{verdict, Indicator};
use crate::sink::AnnouncementSink;
use crate::sources::CandleSupplier;
use crate::types::{Announcement, IndicatorReading, Timeframe};
use chrono::Utc;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What happened to one evaluated pair.
#[derive(Debug)]
pub enum Outcome {
    /// The announcement cleared the gate and was delivered.
    Announced(Announcement),
    /// The verdict repeated inside its cooldown window; the key is returned
    /// for logging.
    Suppressed(String),
}

/// Counters for one timeframe pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub announced: usize,
    pub suppressed: usize,
    pub skipped: usize,
}

pub struct Evaluator<S, K> {
    supplier: S,
    sink: K,
    gate: Arc<DebounceGate>,
    config: Arc<Config>,
    indicators: Vec<Box<dyn Indicator>>,
}

impl<S: CandleSupplier, K: AnnouncementSink> Evaluator<S, K> {
    pub fn new(supplier: S, sink: K, gate: Arc<DebounceGate>, config: Arc<Config>) -> Self {
        Self {
            supplier,
            sink,
            gate,
            config,
            indicators: all_indicators(),
        }
    }

    /// Evaluate one pair and, if the verdict is fresh, announce it.
    ///
    /// The gate is only written after the sink confirms delivery, so a
    /// failed send stays eligible for the next cycle.
    pub async fn evaluate_pair(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        now_ms: i64,
    ) -> Result<Outcome> {
        // Non-native timeframes are fetched at the supplier's native
        // interval and aggregated during normalization.
        let raw = self
            .supplier
            .fetch_candles(instrument, timeframe.native())
            .await?;
        let candles = normalizer::normalize(raw, timeframe, self.config.min_candles)?;

        let readings: Vec<IndicatorReading> = self
            .indicators
            .iter()
            .filter(|i| candles.len() >= i.min_periods())
            .filter_map(|i| i.evaluate(&candles))
            .collect();

        let (verdict, buy_votes, sell_votes) = verdict::aggregate(&readings);
        let reference_price = candles.last().map(|c| c.close).unwrap_or_default();

        let announcement = Announcement {
            id: Uuid::new_v4(),
            instrument: instrument.to_string(),
            timeframe,
            verdict,
            buy_votes,
            sell_votes,
            readings,
            reference_price,
            evaluated_at: now_ms,
        };

        let key = debounce_key(instrument, timeframe.label(), verdict.label());

        // Serialize check-then-record per key so concurrent evaluations of
        // the same pair admit exactly one announcement.
        let lock = self.gate.key_lock(&key);
        let _guard = lock.lock().await;

        if !self.gate.may_announce(&key, now_ms) {
            debug!("suppressed {} inside cooldown", key);
            return Ok(Outcome::Suppressed(key));
        }

        self.sink.deliver(&announcement).await?;
        self.gate.record_announcement(&key, now_ms);

        info!(
            "announced {} for {}/{} ({} buy / {} sell)",
            verdict.label(),
            instrument,
            timeframe.label(),
            buy_votes,
            sell_votes
        );
        Ok(Outcome::Announced(announcement))
    }

    /// Evaluate every configured instrument at one timeframe concurrently.
    ///
    /// Pair failures are logged and counted as skipped without aborting the
    /// rest of the pass.
    pub async fn run_timeframe(&self, timeframe: Timeframe) -> CycleStats {
        let now_ms = Utc::now().timestamp_millis();

        let results = join_all(
            self.config
                .instruments
                .iter()
                .map(|instrument| self.evaluate_pair(instrument, timeframe, now_ms)),
        )
        .await;

        let mut stats = CycleStats::default();
        for (instrument, result) in self.config.instruments.iter().zip(results) {
            match result {
                Ok(Outcome::Announced(_)) => stats.announced += 1,
                Ok(Outcome::Suppressed(_)) => stats.suppressed += 1,
                Err(e) => {
                    warn!("{}/{} skipped: {}", instrument, timeframe.label(), e);
                    stats.skipped += 1;
                }
            }
        }

        info!(
            "{} pass: {} announced, {} suppressed, {} skipped",
            timeframe.label(),
            stats.announced,
            stats.suppressed,
            stats.skipped
        );
        stats
    }
}
