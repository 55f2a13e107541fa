use thiserror::Error;

/// Application error types.
///
/// Per-pair failures (`InsufficientData`, `SupplierUnavailable`,
/// `DeliveryFailed`) are isolated by the orchestrator and never abort a
/// batch; only `Setup` is reported upward from the binary.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("insufficient data: {got} candles after cleaning, need {need}")]
    InsufficientData { got: usize, need: usize },

    #[error("supplier unavailable: {0}")]
    SupplierUnavailable(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("setup error: {0}")]
    Setup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, SignalError>;
