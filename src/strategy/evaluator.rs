//! Regular saving vs. borrow-and-invest comparison
//!
//! Strategy 1 invests a fixed payment every month from zero.
//! Strategy 2 borrows the lump sum that the same payment repays over the
//! same term, invests it at month 0, and repays the loan.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_months, SimResult};
use crate::projection::{
    affordable_capital, amortize_loan, simulate_growth, CompoundGrowthResult, GrowthParams,
    LoanAmortizationResult, LoanParams,
};

/// Inputs for one strategy comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Monthly effort: saved in strategy 1, loan installment in strategy 2
    pub monthly_payment: f64,

    /// Horizon of both the investment and the loan
    pub months: u32,

    /// Annual return of the investment
    pub annual_return: f64,

    /// Annual credit rate of the loan
    pub annual_credit_rate: f64,

    /// Annual inflation applied to both strategies
    #[serde(default)]
    pub annual_inflation: f64,
}

impl StrategyParams {
    fn validate(&self) -> SimResult<()> {
        ensure_months("strategy horizon", self.months)?;
        ensure_finite("monthly payment", self.monthly_payment)
    }
}

/// Headline outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    /// Lump sum borrowed and invested in strategy 2
    pub borrowed_capital: f64,

    /// Interest earned plus inflation variation, strategy 1
    pub net_benefit_saving: f64,

    /// Interest earned minus credit cost plus inflation variation, strategy 2
    pub net_benefit_borrowing: f64,
}

impl StrategyComparison {
    /// How much better borrowing does than saving
    pub fn advantage(&self) -> f64 {
        self.net_benefit_borrowing - self.net_benefit_saving
    }
}

/// Every intermediate simulation behind a comparison, for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBreakdown {
    pub params: StrategyParams,
    pub comparison: StrategyComparison,
    pub saving: CompoundGrowthResult,
    pub loan: LoanAmortizationResult,
    pub borrowed_investment: CompoundGrowthResult,
}

/// Runs the four-step comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyEvaluator;

impl StrategyEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Compare both strategies, returning only the headline figures
    pub fn evaluate(&self, params: &StrategyParams) -> SimResult<StrategyComparison> {
        self.evaluate_detailed(params).map(|b| b.comparison)
    }

    /// Compare both strategies, keeping every intermediate result
    pub fn evaluate_detailed(&self, params: &StrategyParams) -> SimResult<StrategyBreakdown> {
        params.validate()?;

        // Strategy 1: save the payment every month
        let saving = simulate_growth(&GrowthParams {
            annual_return: params.annual_return,
            initial_capital: 0.0,
            monthly_contribution: params.monthly_payment,
            months: params.months,
            annual_inflation: params.annual_inflation,
        })?;

        // Size the loan the same payment can carry
        let borrowed_capital =
            affordable_capital(params.monthly_payment, params.annual_credit_rate, params.months)?;

        let loan = amortize_loan(&LoanParams {
            principal: borrowed_capital,
            installments: params.months,
            annual_rate: params.annual_credit_rate,
            annual_inflation: params.annual_inflation,
        })?;

        // Strategy 2: invest the borrowed lump sum once
        let borrowed_investment = simulate_growth(&GrowthParams {
            annual_return: params.annual_return,
            initial_capital: borrowed_capital,
            monthly_contribution: 0.0,
            months: params.months,
            annual_inflation: params.annual_inflation,
        })?;

        let net_benefit_saving = saving.final_interest() + saving.inflation_variation;
        let net_benefit_borrowing = borrowed_investment.final_interest() - loan.total_interest
            + borrowed_investment.inflation_variation;

        let comparison = StrategyComparison {
            borrowed_capital,
            net_benefit_saving,
            net_benefit_borrowing,
        };

        debug!(
            "strategy return={:.4} credit={:.4} inflation={:.4}: saving={:.2} borrowing={:.2}",
            params.annual_return,
            params.annual_credit_rate,
            params.annual_inflation,
            net_benefit_saving,
            net_benefit_borrowing,
        );

        Ok(StrategyBreakdown {
            params: params.clone(),
            comparison,
            saving,
            loan,
            borrowed_investment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn params(annual_return: f64, credit: f64, inflation: f64) -> StrategyParams {
        StrategyParams {
            monthly_payment: 1000.0,
            months: 120,
            annual_return,
            annual_credit_rate: credit,
            annual_inflation: inflation,
        }
    }

    #[test]
    fn test_borrowed_capital_matches_affordability() {
        let comparison = StrategyEvaluator::new()
            .evaluate(&params(0.05, 0.03, 0.0))
            .unwrap();
        let expected = affordable_capital(1000.0, 0.03, 120).unwrap();
        assert_relative_eq!(comparison.borrowed_capital, expected);
    }

    #[test]
    fn test_zero_return_zero_inflation() {
        let comparison = StrategyEvaluator::new()
            .evaluate(&params(0.0, 0.02, 0.0))
            .unwrap();

        // Saving earns nothing; borrowing only pays interest
        assert_abs_diff_eq!(comparison.net_benefit_saving, 0.0, epsilon = 1e-9);
        assert!(comparison.net_benefit_borrowing < 0.0);
        assert!(comparison.advantage() < 0.0);
    }

    #[test]
    fn test_cheap_credit_and_high_return_favours_borrowing() {
        let comparison = StrategyEvaluator::new()
            .evaluate(&params(0.08, 0.01, 0.0))
            .unwrap();
        assert!(comparison.net_benefit_saving > 0.0);
        assert!(comparison.advantage() > 0.0);
    }

    #[test]
    fn test_benefits_match_breakdown() {
        let breakdown = StrategyEvaluator::new()
            .evaluate_detailed(&params(0.05, 0.02, 0.02))
            .unwrap();

        let expected_saving =
            breakdown.saving.final_interest() + breakdown.saving.inflation_variation;
        let expected_borrowing = breakdown.borrowed_investment.final_interest()
            - breakdown.loan.total_interest
            + breakdown.borrowed_investment.inflation_variation;

        assert_relative_eq!(breakdown.comparison.net_benefit_saving, expected_saving);
        assert_relative_eq!(breakdown.comparison.net_benefit_borrowing, expected_borrowing);
        assert_eq!(breakdown.loan.len(), 120);
        assert_relative_eq!(breakdown.loan.first_payment, 1000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_credit_rate_is_supported() {
        let comparison = StrategyEvaluator::new()
            .evaluate(&params(0.05, 0.0, 0.0))
            .unwrap();
        assert_relative_eq!(comparison.borrowed_capital, 120_000.0);
    }

    #[test]
    fn test_invalid_params() {
        let evaluator = StrategyEvaluator::new();
        let mut bad = params(0.05, 0.02, 0.0);
        bad.months = 0;
        assert!(matches!(
            evaluator.evaluate(&bad),
            Err(SimError::InvalidArgument { .. })
        ));

        assert!(matches!(
            evaluator.evaluate(&params(0.05, -1.0, 0.0)),
            Err(SimError::InvalidRate { .. })
        ));
    }
}
