//! Batch runner for strategy comparisons
//!
//! Loads comparison scenarios from CSV and evaluates them in one pass.

use std::path::Path;

use csv::Reader;
use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::error::SimResult;
use crate::strategy::{StrategyComparison, StrategyEvaluator, StrategyParams};

/// Raw CSV row: `payment,months,return_rate,credit_rate[,inflation_rate]`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    payment: f64,
    months: u32,
    return_rate: f64,
    credit_rate: f64,
    #[serde(default)]
    inflation_rate: f64,
}

impl From<CsvRow> for StrategyParams {
    fn from(row: CsvRow) -> Self {
        StrategyParams {
            monthly_payment: row.payment,
            months: row.months,
            annual_return: row.return_rate,
            annual_credit_rate: row.credit_rate,
            annual_inflation: row.inflation_rate,
        }
    }
}

/// Load scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> SimResult<Vec<StrategyParams>> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> SimResult<Vec<StrategyParams>> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> SimResult<Vec<StrategyParams>> {
    let mut scenarios = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into());
    }
    Ok(scenarios)
}

/// One evaluated scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub params: StrategyParams,
    pub comparison: StrategyComparison,
}

/// Evaluates many scenarios with one evaluator
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    evaluator: StrategyEvaluator,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self {
            evaluator: StrategyEvaluator::new(),
        }
    }

    /// Evaluate a single scenario
    pub fn run(&self, params: &StrategyParams) -> SimResult<ScenarioResult> {
        Ok(ScenarioResult {
            params: params.clone(),
            comparison: self.evaluator.evaluate(params)?,
        })
    }

    /// Evaluate scenarios, results in input order; the first failure aborts
    pub fn run_batch(&self, scenarios: &[StrategyParams]) -> SimResult<Vec<ScenarioResult>> {
        info!("Running batch of {} scenarios", scenarios.len());

        #[cfg(feature = "parallel")]
        let results: SimResult<Vec<ScenarioResult>> = scenarios.par_iter().map(|p| self.run(p)).collect();

        #[cfg(not(feature = "parallel"))]
        let results: SimResult<Vec<ScenarioResult>> = scenarios.iter().map(|p| self.run(p)).collect();

        results
    }
}
