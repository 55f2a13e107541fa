pub mod debounce;
pub mod evaluator;
pub mod normalizer;
pub mod signals;

pub use debounce::DebounceGate;
pub use evaluator::{CycleStats, Evaluator, Outcome};
