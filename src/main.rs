use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vigil::services::{DebounceGate, Evaluator};
use vigil::sink::WebhookSink;
use vigil::sources::HttpCandleSupplier;
use vigil::types::Timeframe;
use vigil::{Config, SignalError};

/// Candles requested per fetch; leaves aggregation headroom above the
/// 60-candle minimum for resampled timeframes.
const FETCH_LIMIT: usize = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vigil=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env()?);

    let candle_api_url = config
        .candle_api_url
        .clone()
        .ok_or_else(|| SignalError::Setup("CANDLE_API_URL not set".into()))?;
    let webhook_url = config
        .webhook_url
        .clone()
        .ok_or_else(|| SignalError::Setup("WEBHOOK_URL not set".into()))?;

    let gate = Arc::new(DebounceGate::restore(
        &config.state_file,
        config.cooldown.as_millis() as i64,
    ));

    // An optional timeframe argument restricts the pass; scheduling across
    // passes is left to the invoker (cron or similar).
    let timeframes: Vec<Timeframe> = match std::env::args().nth(1) {
        Some(label) => {
            let tf = Timeframe::from_label(&label)
                .ok_or_else(|| SignalError::Setup(format!("unknown timeframe: {}", label)))?;
            vec![tf]
        }
        None => config.timeframes.clone(),
    };

    info!(
        "evaluating {} instruments across {} timeframes",
        config.instruments.len(),
        timeframes.len()
    );

    let evaluator = Evaluator::new(
        HttpCandleSupplier::new(candle_api_url, FETCH_LIMIT),
        WebhookSink::new(webhook_url),
        Arc::clone(&gate),
        Arc::clone(&config),
    );

    for timeframe in timeframes {
        evaluator.run_timeframe(timeframe).await;
    }

    gate.persist(&config.state_file)?;
    Ok(())
}
