//! Saving vs. borrowing strategy comparison and rate-grid sweeps

mod evaluator;
mod sweep;

pub use evaluator::{StrategyEvaluator, StrategyParams, StrategyComparison, StrategyBreakdown};
pub use sweep::{SweepEngine, SweepConfig, SweepMatrix, SweepOutcome, InflationSweep, CellPrecision};
