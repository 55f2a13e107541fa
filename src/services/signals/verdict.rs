//! Vote tally and composite verdict.

use crate::types::{IndicatorReading, Verdict};

/// Tally buy and sell votes over a set of readings.
///
/// Only readings present in the slice participate; indicators that
/// abstained never reach this point, so the margin is independent of how
/// many indicators lacked history.
pub fn tally(readings: &[IndicatorReading]) -> (u32, u32) {
    let mut buy_votes = 0u32;
    let mut sell_votes = 0u32;
    for reading in readings {
        match reading.tag.vote() {
            1 => buy_votes += 1,
            -1 => sell_votes += 1,
            _ => {}
        }
    }
    (buy_votes, sell_votes)
}

/// Aggregate readings into a composite verdict with its vote counts.
pub fn aggregate(readings: &[IndicatorReading]) -> (Verdict, u32, u32) {
    let (buy_votes, sell_votes) = tally(readings);
    (Verdict::from_votes(buy_votes, sell_votes), buy_votes, sell_votes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::make_reading;
    use crate::types::SignalTag;

    fn readings(tags: &[SignalTag]) -> Vec<IndicatorReading> {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| make_reading(&format!("IND{}", i), 0.0, *tag))
            .collect()
    }

    #[test]
    fn test_strong_buy_at_margin_four() {
        let r = readings(&[
            SignalTag::Buy,
            SignalTag::Buy,
            SignalTag::Oversold,
            SignalTag::Buy,
            SignalTag::Buy,
        ]);
        let (verdict, buy, sell) = aggregate(&r);
        assert_eq!(verdict, Verdict::StrongBuy);
        assert_eq!((buy, sell), (5, 0));
    }

    #[test]
    fn test_buy_at_margin_two() {
        let r = readings(&[SignalTag::Buy, SignalTag::Buy]);
        assert_eq!(aggregate(&r).0, Verdict::Buy);
    }

    #[test]
    fn test_tie_is_neutral() {
        let r = readings(&[SignalTag::Buy, SignalTag::Sell, SignalTag::Neutral]);
        assert_eq!(aggregate(&r).0, Verdict::Neutral);
    }

    #[test]
    fn test_strong_sell() {
        let r = readings(&[
            SignalTag::Sell,
            SignalTag::Overbought,
            SignalTag::Sell,
            SignalTag::Sell,
            SignalTag::Sell,
        ]);
        assert_eq!(aggregate(&r).0, Verdict::StrongSell);
    }

    #[test]
    fn test_volatility_tags_do_not_vote() {
        let r = readings(&[
            SignalTag::Buy,
            SignalTag::Buy,
            SignalTag::HighVolatility,
            SignalTag::LowVolatility,
        ]);
        let (verdict, buy, sell) = aggregate(&r);
        assert_eq!((buy, sell), (2, 0));
        assert_eq!(verdict, Verdict::Buy);
    }

    #[test]
    fn test_empty_readings_neutral() {
        assert_eq!(aggregate(&[]).0, Verdict::Neutral);
    }
}
