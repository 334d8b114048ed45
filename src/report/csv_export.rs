//! CSV export of series and sweep matrices for external charting

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::error::SimResult;
use crate::projection::{CompoundGrowthResult, LoanAmortizationResult};
use crate::strategy::{InflationSweep, SweepConfig};

#[derive(Serialize)]
struct GrowthCsvRow {
    month: u32,
    capital: f64,
    interest: f64,
    value: f64,
    deflated_contribution: f64,
}

#[derive(Serialize)]
struct LoanCsvRow {
    month: u32,
    payment: f64,
    principal_repaid: f64,
    interest_paid: f64,
    remaining_balance: f64,
}

/// Long format: one line per (inflation, return, credit) cell
#[derive(Serialize)]
struct SweepCsvRow {
    inflation_rate: f64,
    return_rate: f64,
    credit_rate: f64,
    benefit_saving: f64,
    net_benefit_borrowing: f64,
    advantage: f64,
}

/// Write the month-by-month growth series
pub fn write_growth_csv<W: Write>(writer: W, result: &CompoundGrowthResult) -> SimResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for (k, month) in result.months.iter().enumerate() {
        wtr.serialize(GrowthCsvRow {
            month: *month,
            capital: result.capital[k],
            interest: result.interest[k],
            value: result.capital[k] + result.interest[k],
            deflated_contribution: result.deflated_contributions[k],
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the amortization schedule
pub fn write_loan_csv<W: Write>(writer: W, result: &LoanAmortizationResult) -> SimResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for (k, month) in result.months.iter().enumerate() {
        wtr.serialize(LoanCsvRow {
            month: *month,
            payment: result.payments[k],
            principal_repaid: result.principal_repaid[k],
            interest_paid: result.interest_paid[k],
            remaining_balance: result.remaining_balance[k],
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every filled sweep cell
pub fn write_sweep_csv<W: Write>(
    writer: W,
    config: &SweepConfig,
    slices: &[InflationSweep],
) -> SimResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for slice in slices {
        for (i, &return_rate) in config.return_rates.iter().enumerate() {
            for (j, &credit_rate) in config.credit_rates.iter().enumerate() {
                let advantage = slice.advantage.get(i, j).unwrap_or(f64::NAN);
                if advantage.is_nan() {
                    continue;
                }
                wtr.serialize(SweepCsvRow {
                    inflation_rate: slice.annual_inflation,
                    return_rate,
                    credit_rate,
                    benefit_saving: slice.benefit_saving.get(i, j).unwrap_or(f64::NAN),
                    net_benefit_borrowing: slice.net_benefit_borrowing.get(i, j).unwrap_or(f64::NAN),
                    advantage,
                })?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{amortize_loan, simulate_growth, GrowthParams, LoanParams};
    use crate::strategy::{CellPrecision, SweepEngine};

    #[test]
    fn test_growth_csv() {
        let result = simulate_growth(&GrowthParams::regular_saving(0.05, 100.0, 6)).unwrap();
        let mut buf = Vec::new();
        write_growth_csv(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "month,capital,interest,value,deflated_contribution");
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("0,100.0,0.0,100.0,100.0"));
    }

    #[test]
    fn test_loan_csv() {
        let result = amortize_loan(&LoanParams::new(1200.0, 12, 0.0)).unwrap();
        let mut buf = Vec::new();
        write_loan_csv(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[1].starts_with("0,100.0,100.0,0.0,1100.0"));
        assert!(lines[12].starts_with("11,"));
    }

    #[test]
    fn test_sweep_csv_has_one_line_per_cell() {
        let config = SweepConfig {
            monthly_payment: 100.0,
            months: 12,
            return_rates: vec![0.02, 0.05],
            credit_rates: vec![0.01, 0.02, 0.03],
            inflation_rates: vec![0.0],
            precision: CellPrecision::Truncated,
        };
        let slices = SweepEngine::new(config.clone()).unwrap().run().unwrap();

        let mut buf = Vec::new();
        write_sweep_csv(&mut buf, &config, &slices).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1 + 6);
    }
}
