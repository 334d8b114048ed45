//! Monthly recurrences: compound growth, loan amortization, affordability

mod state;
mod growth;
mod loan;
mod affordability;

pub use state::{GrowthState, LoanState, Installment};
pub use growth::{simulate_growth, GrowthParams, CompoundGrowthResult, GrowthSummary};
pub use loan::{amortize_loan, LoanParams, LoanAmortizationResult, LoanSummary};
pub use affordability::{affordable_capital, annuity_factor, annuity_factor_or_linear};
