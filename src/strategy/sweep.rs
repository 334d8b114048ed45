//! Strategy comparison over return × credit × inflation grids
//!
//! Every cell is an independent [`StrategyEvaluator`] run. Cells are evaluated
//! in parallel when the `parallel` feature is enabled and written back into
//! preallocated matrices by index, so the result never depends on completion
//! order and a cancelled sweep leaves untouched cells as `NaN`.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::evaluator::{StrategyComparison, StrategyEvaluator, StrategyParams};
use crate::error::{ensure_finite, ensure_months, SimError, SimResult};
use crate::rates::{InflationSpec, RateSpec};

/// How cell values are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellPrecision {
    /// Truncated toward zero to whole currency units
    #[default]
    Truncated,
    /// Full floating-point precision; rounding is left to presentation
    Full,
}

impl CellPrecision {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            CellPrecision::Truncated => value.trunc(),
            CellPrecision::Full => value,
        }
    }
}

/// Sweep definition: one payment and horizon, three rate axes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub monthly_payment: f64,
    pub months: u32,
    /// Matrix rows
    pub return_rates: Vec<f64>,
    /// Matrix columns
    pub credit_rates: Vec<f64>,
    /// One matrix triple per entry
    pub inflation_rates: Vec<f64>,
    #[serde(default)]
    pub precision: CellPrecision,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            monthly_payment: 1000.0,
            months: 120,
            return_rates: vec![0.0, 0.03, 0.05, 0.08, 0.10],
            credit_rates: vec![0.001, 0.01, 0.02, 0.03, 0.04, 0.05],
            inflation_rates: vec![0.0, 0.01, 0.02, 0.03, 0.05, 0.08, 0.10],
            precision: CellPrecision::Truncated,
        }
    }
}

impl SweepConfig {
    /// Fail fast on empty axes and invalid rates before any cell runs
    pub fn validate(&self) -> SimResult<()> {
        ensure_months("sweep horizon", self.months)?;
        ensure_finite("monthly payment", self.monthly_payment)?;

        for (name, axis) in [
            ("return rates", &self.return_rates),
            ("credit rates", &self.credit_rates),
            ("inflation rates", &self.inflation_rates),
        ] {
            if axis.is_empty() {
                return Err(SimError::invalid_argument(format!(
                    "sweep needs at least one value in {}",
                    name
                )));
            }
        }

        for &rate in &self.return_rates {
            RateSpec::named("annual return", rate)?;
        }
        for &rate in &self.credit_rates {
            RateSpec::named("annual credit rate", rate)?;
        }
        for &rate in &self.inflation_rates {
            InflationSpec::new(rate)?;
        }
        Ok(())
    }

    /// Number of evaluator runs in a full sweep
    pub fn total_cells(&self) -> usize {
        self.return_rates.len() * self.credit_rates.len() * self.inflation_rates.len()
    }
}

/// Dense row-major grid: rows are return rates, columns are credit rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMatrix {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<f64>,
}

impl SweepMatrix {
    /// Matrix with every cell unfilled (`NaN`)
    pub fn unfilled(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![f64::NAN; rows * cols],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.cols + col] = value;
    }

    /// Cells of one row; empty when the row is out of range or the
    /// matrix holds fewer values than `rows * cols`
    pub fn row(&self, row: usize) -> &[f64] {
        if row >= self.rows {
            return &[];
        }
        self.values
            .get(row * self.cols..(row + 1) * self.cols)
            .unwrap_or(&[])
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Whether every cell has been written
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_nan())
    }

    /// Smallest and largest filled values
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The three matrices produced for one inflation rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationSweep {
    pub annual_inflation: f64,
    /// net benefit borrowing − net benefit saving
    pub advantage: SweepMatrix,
    pub net_benefit_borrowing: SweepMatrix,
    pub benefit_saving: SweepMatrix,
}

impl InflationSweep {
    fn unfilled(annual_inflation: f64, rows: usize, cols: usize) -> Self {
        Self {
            annual_inflation,
            advantage: SweepMatrix::unfilled(rows, cols),
            net_benefit_borrowing: SweepMatrix::unfilled(rows, cols),
            benefit_saving: SweepMatrix::unfilled(rows, cols),
        }
    }

    fn fill(&mut self, row: usize, col: usize, cmp: &StrategyComparison, precision: CellPrecision) {
        self.advantage.set(row, col, precision.apply(cmp.advantage()));
        self.net_benefit_borrowing
            .set(row, col, precision.apply(cmp.net_benefit_borrowing));
        self.benefit_saving
            .set(row, col, precision.apply(cmp.net_benefit_saving));
    }
}

/// Result of a possibly-cancelled sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub slices: Vec<InflationSweep>,
    pub completed_cells: usize,
    pub total_cells: usize,
}

impl SweepOutcome {
    pub fn is_complete(&self) -> bool {
        self.completed_cells == self.total_cells
    }
}

#[derive(Debug, Clone, Copy)]
struct CellIndex {
    inflation: usize,
    ret: usize,
    credit: usize,
}

/// Runs the evaluator over every grid cell
#[derive(Debug, Clone)]
pub struct SweepEngine {
    config: SweepConfig,
    evaluator: StrategyEvaluator,
}

impl SweepEngine {
    pub fn new(config: SweepConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator: StrategyEvaluator::new(),
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Run the full sweep
    pub fn run(&self) -> SimResult<Vec<InflationSweep>> {
        let never = AtomicBool::new(false);
        Ok(self.run_with_cancel(&never)?.slices)
    }

    /// Run the sweep, checking `cancel` before each cell
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> SimResult<SweepOutcome> {
        self.run_until(|| cancel.load(Ordering::Relaxed))
    }

    /// Run the sweep, skipping every cell for which `should_stop` returns true
    ///
    /// `should_stop` is called exactly once per cell, just before it would be
    /// evaluated, possibly from several worker threads.
    pub fn run_until<F>(&self, should_stop: F) -> SimResult<SweepOutcome>
    where
        F: Fn() -> bool + Sync,
    {
        let cfg = &self.config;
        let rows = cfg.return_rates.len();
        let cols = cfg.credit_rates.len();

        let cells: Vec<CellIndex> = (0..cfg.inflation_rates.len())
            .flat_map(|inflation| {
                (0..rows).flat_map(move |ret| {
                    (0..cols).map(move |credit| CellIndex { inflation, ret, credit })
                })
            })
            .collect();

        info!(
            "Sweeping {} cells ({} returns x {} credits x {} inflations)",
            cells.len(),
            rows,
            cols,
            cfg.inflation_rates.len()
        );

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Option<SimResult<StrategyComparison>>> = cells
            .par_iter()
            .map(|cell| self.evaluate_cell(cell, &should_stop))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Option<SimResult<StrategyComparison>>> = cells
            .iter()
            .map(|cell| self.evaluate_cell(cell, &should_stop))
            .collect();

        let mut slices: Vec<InflationSweep> = cfg
            .inflation_rates
            .iter()
            .map(|&inflation| InflationSweep::unfilled(inflation, rows, cols))
            .collect();

        let mut completed_cells = 0;
        for (cell, outcome) in cells.iter().zip(outcomes) {
            if let Some(result) = outcome {
                let comparison = result?;
                slices[cell.inflation].fill(cell.ret, cell.credit, &comparison, cfg.precision);
                completed_cells += 1;
            }
        }

        let total_cells = cells.len();
        if completed_cells < total_cells {
            warn!(
                "Sweep cancelled after {} of {} cells",
                completed_cells, total_cells
            );
        } else {
            info!("Sweep complete: {} cells", total_cells);
        }

        Ok(SweepOutcome {
            slices,
            completed_cells,
            total_cells,
        })
    }

    fn evaluate_cell<F>(&self, cell: &CellIndex, should_stop: &F) -> Option<SimResult<StrategyComparison>>
    where
        F: Fn() -> bool + Sync,
    {
        if should_stop() {
            return None;
        }
        let cfg = &self.config;
        let params = StrategyParams {
            monthly_payment: cfg.monthly_payment,
            months: cfg.months,
            annual_return: cfg.return_rates[cell.ret],
            annual_credit_rate: cfg.credit_rates[cell.credit],
            annual_inflation: cfg.inflation_rates[cell.inflation],
        };
        Some(self.evaluator.evaluate(&params))
    }
}
