//! Plain-text reports for simulation results

use std::fmt::{self, Write};

use crate::projection::{CompoundGrowthResult, GrowthParams, LoanAmortizationResult, LoanParams};
use crate::strategy::{InflationSweep, StrategyBreakdown, SweepConfig, SweepMatrix};

fn pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Run a writer over a fresh buffer; formatting into a `String` cannot fail
fn render<F>(write: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    write(&mut out).map(|()| out).unwrap_or_default()
}

/// Report of a compound-growth simulation
pub fn growth_report(params: &GrowthParams, result: &CompoundGrowthResult) -> String {
    let s = result.summary(params);
    render(|out| {
        writeln!(out, "Initial capital:                        {:.2}", params.initial_capital)?;
        writeln!(out, "Average annual return:                  {}", pct(params.annual_return))?;
        writeln!(out, "Average annual inflation:               {}", pct(params.annual_inflation))?;
        writeln!(out, "Capital in today's money:               {:.2}", s.final_capital)?;
        writeln!(out, "Contributions in today's money:         {:.2}", s.deflated_contributions)?;
        writeln!(out, "Contributions without inflation:        {:.2}", s.nominal_contributions)?;
        writeln!(out, "Capital variation (incl. contributions): {:.2}", s.inflation_variation)?;
        writeln!(out, "Cumulative interest:                    {:.2}", s.final_interest)?;
        writeln!(out, "Interest earned in the last month:      {:.2}", s.last_month_interest)?;
        writeln!(out, "Final amount in today's money:          {:.2}", s.final_value)
    })
}

/// Report of a loan amortization
pub fn loan_report(params: &LoanParams, result: &LoanAmortizationResult) -> String {
    let s = result.summary(params);
    render(|out| {
        writeln!(out, "Amount borrowed:        {:.2}", s.principal)?;
        writeln!(out, "Installments:           {}", s.installments)?;
        writeln!(out, "Annual interest rate:   {}", pct(params.annual_rate))?;
        writeln!(out, "Annual inflation:       {}", pct(params.annual_inflation))?;
        writeln!(out, "Monthly installment:    {:.2}", s.installment)?;
        if let Some(last) = result.payments.last() {
            if (last - s.installment).abs() > 1e-6 {
                writeln!(out, "Last recomputed payment: {:.2}", last)?;
            }
        }
        writeln!(out, "Total interest cost:    {:.2}", s.total_interest)?;
        writeln!(out, "Capital + interest:     {:.2}", s.total_repaid)
    })
}

/// Side-by-side synthesis of both strategies
pub fn strategy_report(breakdown: &StrategyBreakdown) -> String {
    let p = &breakdown.params;
    let c = &breakdown.comparison;
    let years = p.months as f64 / 12.0;
    render(|out| {
        writeln!(out, "Simulation with annual inflation of {}", pct(p.annual_inflation))?;
        writeln!(
            out,
            "Strategy 1: invest {:.2} every month at {}/year for {} years, no initial capital",
            p.monthly_payment,
            pct(p.annual_return),
            years
        )?;
        writeln!(
            out,
            "Strategy 2: invest {:.2} once at {}/year for {} years, borrowed at {}/year over the same period",
            c.borrowed_capital,
            pct(p.annual_return),
            years,
            pct(p.annual_credit_rate)
        )?;
        writeln!(out)?;
        writeln!(out, "Interest earned, strategy 1:        {:.2}", breakdown.saving.final_interest())?;
        writeln!(
            out,
            "Interest earned, strategy 2:        {:.2}",
            breakdown.borrowed_investment.final_interest()
        )?;
        writeln!(out, "Inflation variation, strategy 1:    {:.2}", breakdown.saving.inflation_variation)?;
        writeln!(
            out,
            "Inflation variation, strategy 2:    {:.2}",
            breakdown.borrowed_investment.inflation_variation
        )?;
        writeln!(out, "Credit cost, strategy 1:            0.00")?;
        writeln!(out, "Credit cost, strategy 2:            {:.2}", breakdown.loan.total_interest)?;
        writeln!(out, "Net benefit, strategy 1:            {:.2}", c.net_benefit_saving)?;
        writeln!(out, "Net benefit, strategy 2:            {:.2}", c.net_benefit_borrowing)?;
        writeln!(out, "Advantage of strategy 2 over 1:     {:.2}", c.advantage())
    })
}

/// One matrix as a table: rows are return rates, columns credit rates, cells in thousands
pub fn matrix_table(title: &str, matrix: &SweepMatrix, return_rates: &[f64], credit_rates: &[f64]) -> String {
    render(|out| {
        writeln!(out, "{} (in k)", title)?;

        write!(out, "{:>10}", "ret\\cred")?;
        for rate in credit_rates {
            write!(out, "{:>9}", pct(*rate))?;
        }
        writeln!(out)?;

        for (i, rate) in return_rates.iter().enumerate() {
            write!(out, "{:>10}", pct(*rate))?;
            for value in matrix.row(i) {
                if value.is_nan() {
                    write!(out, "{:>9}", "-")?;
                } else {
                    write!(out, "{:>9}", (value / 1000.0).trunc())?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    })
}

/// All three matrices of one inflation slice
pub fn sweep_report(config: &SweepConfig, slice: &InflationSweep) -> String {
    render(|out| {
        writeln!(
            out,
            "Monthly payment of {:.0} over {} years with inflation of {}",
            config.monthly_payment,
            config.months as f64 / 12.0,
            pct(slice.annual_inflation)
        )?;
        writeln!(out, "Total effort: {:.0}", config.monthly_payment * config.months as f64)?;

        for (title, matrix) in [
            ("Benefit strategy 1", &slice.benefit_saving),
            ("Net benefit strategy 2", &slice.net_benefit_borrowing),
            ("Advantage strategy 2", &slice.advantage),
        ] {
            writeln!(out)?;
            out.push_str(&matrix_table(title, matrix, &config.return_rates, &config.credit_rates));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{amortize_loan, simulate_growth};
    use crate::strategy::{StrategyEvaluator, StrategyParams};

    #[test]
    fn test_growth_report_contents() {
        let params = GrowthParams::lump_sum(0.06, 10_000.0, 120).with_inflation(0.01);
        let result = simulate_growth(&params).unwrap();
        let report = growth_report(&params, &result);

        assert!(report.contains("Initial capital:"));
        assert!(report.contains("6.00%"));
        assert!(report.contains("1.00%"));
        assert!(report.contains(&format!("{:.2}", result.final_value())));
    }

    #[test]
    fn test_loan_report_contents() {
        let params = LoanParams::new(100_000.0, 120, 0.03);
        let result = amortize_loan(&params).unwrap();
        let report = loan_report(&params, &result);

        assert!(report.contains(&format!("{:.2}", result.first_payment)));
        assert!(!report.contains("Last recomputed payment"));
    }

    #[test]
    fn test_strategy_report_contents() {
        let breakdown = StrategyEvaluator::new()
            .evaluate_detailed(&StrategyParams {
                monthly_payment: 1000.0,
                months: 120,
                annual_return: 0.05,
                annual_credit_rate: 0.02,
                annual_inflation: 0.0,
            })
            .unwrap();
        let report = strategy_report(&breakdown);

        assert!(report.contains("10 years"));
        assert!(report.contains(&format!("{:.2}", breakdown.comparison.advantage())));
    }

    #[test]
    fn test_matrix_table_layout() {
        let matrix = SweepMatrix {
            rows: 2,
            cols: 2,
            values: vec![1500.0, -2500.0, f64::NAN, 12_000.0],
        };
        let table = matrix_table("Advantage", &matrix, &[0.03, 0.05], &[0.01, 0.02]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("1.00%"));
        assert!(lines[2].contains("3.00%"));
        assert!(lines[2].contains("-2"));
        assert!(lines[3].contains('-'));
        assert!(lines[3].contains("12"));
    }

    #[test]
    fn test_sweep_report_lists_every_matrix() {
        let config = SweepConfig {
            monthly_payment: 1000.0,
            months: 24,
            return_rates: vec![0.03, 0.05],
            credit_rates: vec![0.01, 0.02, 0.03],
            inflation_rates: vec![0.02],
            precision: crate::strategy::CellPrecision::Truncated,
        };
        let slices = crate::strategy::SweepEngine::new(config.clone()).unwrap().run().unwrap();
        let report = sweep_report(&config, &slices[0]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Monthly payment of 1000 over 2 years with inflation of 2.00%");
        assert_eq!(lines[1], "Total effort: 24000");
        for title in ["Benefit strategy 1 (in k)", "Net benefit strategy 2 (in k)", "Advantage strategy 2 (in k)"] {
            assert!(lines.contains(&title));
        }
        // Two header lines, then per matrix: blank, title, column labels, one line per return rate
        assert_eq!(lines.len(), 2 + 3 * (1 + 1 + 1 + 2));
        assert!(report.ends_with('\n'));
    }
}
