use crate::types::Timeframe;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categorical tag assigned to an indicator's latest value.
///
/// Buy/Oversold count toward the buy tally, Sell/Overbought toward the sell
/// tally. Neutral and the volatility tags never vote. An indicator that
/// cannot produce a value abstains entirely (no reading, no tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalTag {
    Buy,
    Sell,
    Neutral,
    Overbought,
    Oversold,
    HighVolatility,
    LowVolatility,
}

impl SignalTag {
    /// Get display label for this tag.
    pub fn label(&self) -> &'static str {
        match self {
            SignalTag::Buy => "Buy",
            SignalTag::Sell => "Sell",
            SignalTag::Neutral => "Neutral",
            SignalTag::Overbought => "Overbought",
            SignalTag::Oversold => "Oversold",
            SignalTag::HighVolatility => "High Volatility",
            SignalTag::LowVolatility => "Low Volatility",
        }
    }

    /// Vote contribution: +1 buy, -1 sell, 0 abstain-from-tally.
    pub fn vote(&self) -> i32 {
        match self {
            SignalTag::Buy | SignalTag::Oversold => 1,
            SignalTag::Sell | SignalTag::Overbought => -1,
            _ => 0,
        }
    }
}

/// Composite directional verdict for one (instrument, timeframe) evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Verdict {
    /// Derive the verdict from buy/sell vote counts.
    ///
    /// Margin cut points are fixed: >= +4 StrongBuy, +2..+3 Buy,
    /// <= -4 StrongSell, -3..-2 Sell, otherwise Neutral. Abstaining
    /// indicators do not shift the margin.
    pub fn from_votes(buy_votes: u32, sell_votes: u32) -> Self {
        let margin = buy_votes as i64 - sell_votes as i64;
        if margin >= 4 {
            Verdict::StrongBuy
        } else if margin >= 2 {
            Verdict::Buy
        } else if margin <= -4 {
            Verdict::StrongSell
        } else if margin <= -2 {
            Verdict::Sell
        } else {
            Verdict::Neutral
        }
    }

    /// Get display label for this verdict.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongBuy => "Strong Buy",
            Verdict::Buy => "Buy",
            Verdict::Neutral => "Neutral",
            Verdict::Sell => "Sell",
            Verdict::StrongSell => "Strong Sell",
        }
    }
}

/// Latest value and tag from a single indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorReading {
    /// Indicator name (e.g., "RSI(14)", "MACD(12,26)").
    pub name: String,
    /// Latest numeric value.
    pub value: f64,
    /// Categorical tag for the latest value.
    pub tag: SignalTag,
}

/// Announcement payload for one evaluated (instrument, timeframe) pair.
///
/// Formatting and delivery are the sink's concern; the orchestrator only
/// records the announcement in the debounce gate after the sink confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Unique announcement ID.
    pub id: Uuid,
    /// Instrument this evaluation is for.
    pub instrument: String,
    /// Timeframe the candles were evaluated at.
    pub timeframe: Timeframe,
    /// Composite directional verdict.
    pub verdict: Verdict,
    /// Number of indicators voting buy.
    pub buy_votes: u32,
    /// Number of indicators voting sell.
    pub sell_votes: u32,
    /// Per-indicator latest values and tags, in evaluation order.
    pub readings: Vec<IndicatorReading>,
    /// Last close of the evaluated series.
    pub reference_price: f64,
    /// Unix timestamp (milliseconds) when evaluated.
    pub evaluated_at: i64,
}

impl Announcement {
    /// Number of indicators that produced a value but voted neither way.
    pub fn neutral_count(&self) -> u32 {
        self.readings.len() as u32 - self.buy_votes - self.sell_votes
    }
}
