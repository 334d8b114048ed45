//! Fixed-term amortizing loan with optional inflation deflation

use serde::{Deserialize, Serialize};

use super::affordability::annuity_factor_or_linear;
use super::state::LoanState;
use crate::error::{ensure_finite, ensure_months, SimResult};
use crate::rates::{InflationSpec, RateSpec};

/// Inputs for a loan amortization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParams {
    /// Amount borrowed
    pub principal: f64,

    /// Number of monthly installments (at least 1)
    pub installments: u32,

    /// Annual credit rate
    pub annual_rate: f64,

    /// Annual inflation rate
    #[serde(default)]
    pub annual_inflation: f64,
}

impl LoanParams {
    pub fn new(principal: f64, installments: u32, annual_rate: f64) -> Self {
        Self {
            principal,
            installments,
            annual_rate,
            annual_inflation: 0.0,
        }
    }

    pub fn with_inflation(mut self, annual_inflation: f64) -> Self {
        self.annual_inflation = annual_inflation;
        self
    }
}

/// Month-aligned amortization schedule
///
/// Under inflation, amounts are in present-value terms and each month's
/// payment is recomputed against the deflated balance over the remaining term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAmortizationResult {
    /// Nominal fixed installment over the full term, ignoring inflation
    pub first_payment: f64,

    /// Sum of monthly interest
    pub total_interest: f64,

    /// Payment recomputed each month; equals `first_payment` throughout when
    /// there is no inflation
    pub payments: Vec<f64>,

    /// Principal repaid each month
    pub principal_repaid: Vec<f64>,

    /// Balance remaining after each month's installment
    pub remaining_balance: Vec<f64>,

    /// Interest paid each month
    pub interest_paid: Vec<f64>,

    /// Month labels `0..N-1`, aligned with the growth series
    pub months: Vec<u32>,
}

impl LoanAmortizationResult {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn final_balance(&self) -> f64 {
        self.remaining_balance.last().copied().unwrap_or(0.0)
    }

    pub fn summary(&self, params: &LoanParams) -> LoanSummary {
        LoanSummary {
            principal: params.principal,
            installments: params.installments,
            installment: self.first_payment,
            total_interest: self.total_interest,
            total_repaid: params.principal + self.total_interest,
        }
    }
}

/// Headline figures of a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: f64,
    pub installments: u32,
    pub installment: f64,
    pub total_interest: f64,
    pub total_repaid: f64,
}

/// Fixed installment repaying `balance` over `remaining` months
fn installment(balance: f64, rate: &RateSpec, remaining: u32) -> SimResult<f64> {
    Ok(balance / annuity_factor_or_linear(rate, remaining)?)
}

/// Amortize a loan installment by installment
pub fn amortize_loan(params: &LoanParams) -> SimResult<LoanAmortizationResult> {
    ensure_months("number of installments", params.installments)?;
    ensure_finite("principal", params.principal)?;
    let rate = RateSpec::named("annual credit rate", params.annual_rate)?;
    let inflation = InflationSpec::new(params.annual_inflation)?;

    let n = params.installments as usize;
    let first_payment = installment(params.principal, &rate, params.installments)?;

    let mut payments = Vec::with_capacity(n);
    let mut principal_repaid = Vec::with_capacity(n);
    let mut remaining_balance = Vec::with_capacity(n);
    let mut interest_paid = Vec::with_capacity(n);

    let mut state = LoanState::opening(params.principal);
    for month in 0..params.installments {
        let remaining = params.installments - month;
        let payment = installment(state.balance, &rate, remaining)?;
        let paid = state.pay(payment, rate.monthly, inflation.monthly_factor);

        payments.push(paid.payment);
        principal_repaid.push(paid.principal);
        remaining_balance.push(paid.balance);
        interest_paid.push(paid.interest);
    }

    Ok(LoanAmortizationResult {
        first_payment,
        total_interest: state.total_interest,
        payments,
        principal_repaid,
        remaining_balance,
        interest_paid,
        months: (0..params.installments).collect(),
    })
}
