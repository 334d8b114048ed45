//! Amortization System - Monthly compound-growth and loan simulations
//!
//! This library provides:
//! - Annual to monthly rate and inflation conversion
//! - Compound growth under contributions and inflation
//! - Loan amortization schedules and affordability
//! - Saving vs. borrow-and-invest strategy comparison
//! - Parallel sweeps over return/credit/inflation grids

pub mod error;
pub mod rates;
pub mod projection;
pub mod strategy;
pub mod scenario;
pub mod config;
pub mod report;

// Re-export commonly used types
pub use error::{SimError, SimResult};
pub use rates::{RateSpec, InflationSpec, DeflatorSchedule};
pub use projection::{simulate_growth, amortize_loan, affordable_capital, GrowthParams, LoanParams};
pub use strategy::{StrategyEvaluator, StrategyParams, SweepEngine, SweepConfig};
pub use scenario::ScenarioRunner;
