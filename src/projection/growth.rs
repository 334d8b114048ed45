//! Compound growth under monthly contributions and inflation

use serde::{Deserialize, Serialize};

use super::state::GrowthState;
use crate::error::{ensure_finite, ensure_months, SimResult};
use crate::rates::{InflationSpec, RateSpec};

/// Inputs for a compound-growth simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Annual return rate (0.06 = 6%)
    pub annual_return: f64,

    /// Capital invested at month 0
    pub initial_capital: f64,

    /// Nominal amount added every month, including month 0
    pub monthly_contribution: f64,

    /// Number of simulated months (at least 1)
    pub months: u32,

    /// Annual inflation rate
    #[serde(default)]
    pub annual_inflation: f64,
}

impl GrowthParams {
    /// Lump sum invested once, no contributions, no inflation
    pub fn lump_sum(annual_return: f64, initial_capital: f64, months: u32) -> Self {
        Self {
            annual_return,
            initial_capital,
            monthly_contribution: 0.0,
            months,
            annual_inflation: 0.0,
        }
    }

    /// Regular monthly saving from zero, no inflation
    pub fn regular_saving(annual_return: f64, monthly_contribution: f64, months: u32) -> Self {
        Self {
            annual_return,
            initial_capital: 0.0,
            monthly_contribution,
            months,
            annual_inflation: 0.0,
        }
    }

    pub fn with_inflation(mut self, annual_inflation: f64) -> Self {
        self.annual_inflation = annual_inflation;
        self
    }

    fn validate(&self) -> SimResult<()> {
        ensure_months("growth simulation length", self.months)?;
        ensure_finite("initial capital", self.initial_capital)?;
        ensure_finite("monthly contribution", self.monthly_contribution)
    }
}

/// Month-aligned output of a compound-growth simulation
///
/// All amounts are in present-value (inflation-deflated) terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundGrowthResult {
    /// Capital per month (initial capital plus deflated contributions)
    pub capital: Vec<f64>,

    /// Cumulative interest per month
    pub interest: Vec<f64>,

    /// Month labels `0..N`
    pub months: Vec<u32>,

    /// Each month's contribution in today's money
    pub deflated_contributions: Vec<f64>,

    /// Final capital minus (initial capital + sum of deflated contributions)
    pub inflation_variation: f64,
}

impl CompoundGrowthResult {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn final_capital(&self) -> f64 {
        self.capital.last().copied().unwrap_or(0.0)
    }

    pub fn final_interest(&self) -> f64 {
        self.interest.last().copied().unwrap_or(0.0)
    }

    /// Capital plus cumulative interest at the last month
    pub fn final_value(&self) -> f64 {
        self.final_capital() + self.final_interest()
    }

    /// Capital plus cumulative interest for every month
    pub fn values(&self) -> Vec<f64> {
        self.capital
            .iter()
            .zip(&self.interest)
            .map(|(c, i)| c + i)
            .collect()
    }

    pub fn summary(&self, params: &GrowthParams) -> GrowthSummary {
        let n = self.interest.len();
        let last_month_interest = if n >= 2 {
            self.interest[n - 1] - self.interest[n - 2]
        } else {
            self.final_interest()
        };

        GrowthSummary {
            total_months: n as u32,
            final_capital: self.final_capital(),
            final_interest: self.final_interest(),
            final_value: self.final_value(),
            last_month_interest,
            deflated_contributions: self.deflated_contributions.iter().sum(),
            nominal_contributions: params.initial_capital
                + params.monthly_contribution * n as f64,
            inflation_variation: self.inflation_variation,
        }
    }
}

/// Headline figures of a growth simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthSummary {
    pub total_months: u32,
    pub final_capital: f64,
    pub final_interest: f64,
    pub final_value: f64,
    pub last_month_interest: f64,
    /// Sum of contributions in today's money (excludes initial capital)
    pub deflated_contributions: f64,
    /// Initial capital plus undeflated contributions
    pub nominal_contributions: f64,
    pub inflation_variation: f64,
}

/// Run a compound-growth simulation month by month
pub fn simulate_growth(params: &GrowthParams) -> SimResult<CompoundGrowthResult> {
    params.validate()?;
    let rate = RateSpec::named("annual return", params.annual_return)?;
    let inflation = InflationSpec::new(params.annual_inflation)?;

    let n = params.months as usize;
    let mut capital = Vec::with_capacity(n);
    let mut interest = Vec::with_capacity(n);
    let mut deflated_contributions = Vec::with_capacity(n);

    let mut state = GrowthState::opening(
        params.initial_capital,
        params.monthly_contribution,
        inflation.monthly_factor,
    );

    loop {
        capital.push(state.capital);
        interest.push(state.interest);
        deflated_contributions.push(state.contribution);

        if state.month + 1 >= params.months {
            break;
        }
        state.advance(rate.monthly, inflation.monthly_factor);
    }

    let contributed: f64 = deflated_contributions.iter().sum();
    let inflation_variation = state.capital - (params.initial_capital + contributed);

    Ok(CompoundGrowthResult {
        capital,
        interest,
        months: (0..params.months).collect(),
        deflated_contributions,
        inflation_variation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_lump_sum_matches_compound_interest() {
        let params = GrowthParams::lump_sum(0.06, 10_000.0, 120);
        let result = simulate_growth(&params).unwrap();
        let monthly = RateSpec::growth(0.06).unwrap().monthly;

        for (k, value) in result.values().iter().enumerate() {
            let expected = 10_000.0 * (1.0 + monthly).powi(k as i32);
            assert_relative_eq!(*value, expected, max_relative = 1e-9);
        }

        // Capital never moves without contributions or inflation
        assert!(result.capital.iter().all(|c| (*c - 10_000.0).abs() < 1e-9));
        assert_abs_diff_eq!(result.inflation_variation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ten_year_lump_sum_scenario() {
        let params = GrowthParams::lump_sum(0.06, 10_000.0, 120);
        let result = simulate_growth(&params).unwrap();

        let target = 10_000.0 * 1.06_f64.powi(10);
        assert!(((result.final_value() - target) / target).abs() < 0.01);
        assert_eq!(result.len(), 120);
        assert_eq!(result.months[0], 0);
        assert_eq!(result.months[119], 119);
    }

    #[test]
    fn test_regular_saving_without_inflation() {
        let params = GrowthParams::regular_saving(0.0, 1000.0, 12);
        let result = simulate_growth(&params).unwrap();

        assert_relative_eq!(result.final_capital(), 12_000.0);
        assert_relative_eq!(result.final_interest(), 0.0);
        assert_abs_diff_eq!(result.inflation_variation, 0.0, epsilon = 1e-9);
        assert!(result.deflated_contributions.iter().all(|c| *c == 1000.0));
    }

    #[test]
    fn test_inflation_erodes_capital() {
        let params = GrowthParams::regular_saving(0.05, 1000.0, 120).with_inflation(0.03);
        let result = simulate_growth(&params).unwrap();

        // Deflated contributions shrink month after month
        assert!(result
            .deflated_contributions
            .windows(2)
            .all(|w| w[1] < w[0]));

        let factor = InflationSpec::new(0.03).unwrap().monthly_factor;
        assert_relative_eq!(
            result.deflated_contributions[119],
            1000.0 / factor.powi(120),
            max_relative = 1e-10
        );

        // Past contributions keep losing value after they are made
        assert!(result.inflation_variation < 0.0);

        let baseline = simulate_growth(&GrowthParams::regular_saving(0.05, 1000.0, 120)).unwrap();
        assert!(result.final_value() < baseline.final_value());
    }

    #[test]
    fn test_single_month() {
        let params = GrowthParams {
            annual_return: 0.08,
            initial_capital: 500.0,
            monthly_contribution: 100.0,
            months: 1,
            annual_inflation: 0.0,
        };
        let result = simulate_growth(&params).unwrap();

        assert_eq!(result.len(), 1);
        assert_relative_eq!(result.capital[0], 600.0);
        assert_relative_eq!(result.interest[0], 0.0);

        let summary = result.summary(&params);
        assert_eq!(summary.total_months, 1);
        assert_relative_eq!(summary.nominal_contributions, 600.0);
    }

    #[test]
    fn test_summary_last_month_interest() {
        let params = GrowthParams::lump_sum(0.12, 1000.0, 24);
        let result = simulate_growth(&params).unwrap();
        let summary = result.summary(&params);

        assert_relative_eq!(
            summary.last_month_interest,
            result.interest[23] - result.interest[22]
        );
        assert_relative_eq!(summary.final_value, result.final_value());
    }

    #[test]
    fn test_invalid_inputs() {
        let zero_months = GrowthParams::lump_sum(0.05, 1000.0, 0);
        assert!(matches!(
            simulate_growth(&zero_months),
            Err(SimError::InvalidArgument { .. })
        ));

        let bad_rate = GrowthParams::lump_sum(-1.2, 1000.0, 12);
        assert!(matches!(
            simulate_growth(&bad_rate),
            Err(SimError::InvalidRate { .. })
        ));

        let bad_inflation = GrowthParams::lump_sum(0.05, 1000.0, 12).with_inflation(-1.0);
        assert!(simulate_growth(&bad_inflation).is_err());

        let nan_capital = GrowthParams::lump_sum(0.05, f64::NAN, 12);
        assert!(simulate_growth(&nan_capital).is_err());
    }
}
