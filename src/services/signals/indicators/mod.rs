//! Technical indicator implementations.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod bull_bear;
pub mod cci;
pub mod highs_lows;
pub mod macd;
pub mod roc;
pub mod rsi;
pub mod stoch_rsi;
pub mod stochastic;
pub mod ultimate;
pub mod williams_r;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use bull_bear::BullBearPower;
pub use cci::Cci;
pub use highs_lows::HighsLows;
pub use macd::Macd;
pub use roc::Roc;
pub use rsi::Rsi;
pub use stoch_rsi::StochRsi;
pub use stochastic::Stochastic;
pub use ultimate::UltimateOscillator;
pub use williams_r::WilliamsR;

use super::Indicator;

/// The evaluation roster, in announcement order.
pub fn all_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        // Momentum
        Box::new(Rsi::default()),
        Box::new(Stochastic::default()),
        Box::new(StochRsi::default()),
        // Trend
        Box::new(Macd::default()),
        Box::new(Adx::default()),
        Box::new(WilliamsR::default()),
        Box::new(Cci::default()),
        // Volatility (never votes)
        Box::new(Atr::default()),
        Box::new(BollingerBands::default()),
        // Breadth / momentum confirmation
        Box::new(HighsLows::default()),
        Box::new(UltimateOscillator::default()),
        Box::new(Roc::default()),
        Box::new(BullBearPower::default()),
    ]
}
