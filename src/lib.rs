//! Vigil - multi-instrument technical signal engine.
//!
//! Fetches candle series for a configured set of instruments and
//! timeframes, runs a fixed roster of technical indicators over each,
//! aggregates the per-indicator tags into a composite verdict, and
//! announces verdicts through a sink with per-key debouncing.

pub mod config;
pub mod error;
pub mod services;
pub mod sink;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::{Result, SignalError};
pub use services::{CycleStats, DebounceGate, Evaluator, Outcome};
pub use sink::AnnouncementSink;
pub use sources::CandleSupplier;
