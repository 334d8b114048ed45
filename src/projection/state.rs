//! Running state for the monthly recurrences
//!
//! Each state holds only the previous month's values; month k is derived
//! from month k-1 plus that month's contribution or payment.

/// State of a compound-growth simulation, in present-value terms
#[derive(Debug, Clone)]
pub struct GrowthState {
    /// Current month (0-indexed)
    pub month: u32,

    /// Deflated capital (initial capital plus deflated contributions)
    pub capital: f64,

    /// Deflated cumulative interest
    pub interest: f64,

    /// This month's contribution after cumulative deflation
    pub contribution: f64,
}

impl GrowthState {
    /// Month 0: initial capital and the first contribution, both deflated once
    pub fn opening(
        initial_capital: f64,
        nominal_contribution: f64,
        inflation_factor: f64,
    ) -> Self {
        let contribution = nominal_contribution / inflation_factor;
        Self {
            month: 0,
            capital: initial_capital / inflation_factor + contribution,
            interest: 0.0,
            contribution,
        }
    }

    /// Advance to the next month
    ///
    /// Interest accrues on capital plus prior interest at the monthly rate,
    /// then everything carried over loses one month of purchasing power.
    pub fn advance(&mut self, monthly_rate: f64, inflation_factor: f64) {
        self.month += 1;
        self.contribution /= inflation_factor;

        let accrued = (self.capital + self.interest) * monthly_rate;
        self.interest = (self.interest + accrued) / inflation_factor;
        self.capital = self.capital / inflation_factor + self.contribution;
    }

    /// Capital plus cumulative interest
    pub fn value(&self) -> f64 {
        self.capital + self.interest
    }
}

/// State of an amortizing loan between installments
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Installments already paid
    pub installments_paid: u32,

    /// Remaining balance (deflated under inflation)
    pub balance: f64,

    /// Interest paid so far
    pub total_interest: f64,
}

/// One installment's breakdown
#[derive(Debug, Clone, Copy)]
pub struct Installment {
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl LoanState {
    pub fn opening(principal: f64) -> Self {
        Self {
            installments_paid: 0,
            balance: principal,
            total_interest: 0.0,
        }
    }

    /// Pay one installment
    ///
    /// `payment` is recomputed by the caller against the current balance over
    /// the remaining term.
    pub fn pay(&mut self, payment: f64, monthly_rate: f64, inflation_factor: f64) -> Installment {
        let interest = self.balance * monthly_rate / inflation_factor;
        let principal = payment - interest;

        self.balance = self.balance / inflation_factor - principal;
        self.total_interest += interest;
        self.installments_paid += 1;

        Installment {
            payment,
            interest,
            principal,
            balance: self.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_state_without_inflation() {
        let mut state = GrowthState::opening(1000.0, 100.0, 1.0);
        assert_relative_eq!(state.capital, 1100.0);
        assert_relative_eq!(state.interest, 0.0);

        state.advance(0.01, 1.0);
        assert_eq!(state.month, 1);
        assert_relative_eq!(state.interest, 11.0);
        assert_relative_eq!(state.capital, 1200.0);
        assert_relative_eq!(state.value(), 1211.0);
    }

    #[test]
    fn test_growth_state_contribution_deflates_each_month() {
        let factor = 1.01;
        let mut state = GrowthState::opening(0.0, 100.0, factor);
        assert_relative_eq!(state.contribution, 100.0 / factor);

        state.advance(0.0, factor);
        assert_relative_eq!(state.contribution, 100.0 / factor.powi(2), max_relative = 1e-12);
    }

    #[test]
    fn test_loan_state_payment_split() {
        let mut state = LoanState::opening(1000.0);
        let installment = state.pay(110.0, 0.01, 1.0);

        assert_relative_eq!(installment.interest, 10.0);
        assert_relative_eq!(installment.principal, 100.0);
        assert_relative_eq!(installment.balance, 900.0);
        assert_eq!(state.installments_paid, 1);
        assert_relative_eq!(state.total_interest, 10.0);
    }
}
