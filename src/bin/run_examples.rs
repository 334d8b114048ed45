//! Run the four reference scenarios and print their reports
//!
//! 1. Lump sum of 10000 at 6%/year for 10 years with 1% inflation
//! 2. Loan of 100000 over 120 months at 3%
//! 3. Capital borrowable with 1000/month at 5% over 120 months
//! 4. Strategy sweep over the reference rate grid

use amortization_system::projection::{
    affordable_capital, amortize_loan, simulate_growth, GrowthParams, LoanParams,
};
use amortization_system::report;
use amortization_system::strategy::{SweepConfig, SweepEngine};
use anyhow::Result;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();
    let start = Instant::now();

    println!("Example 1: compound interest");
    println!("============================\n");
    let growth = GrowthParams::lump_sum(0.06, 10_000.0, 10 * 12).with_inflation(0.01);
    let result = simulate_growth(&growth)?;
    print!("{}", report::growth_report(&growth, &result));

    println!("\nExample 2: loan");
    println!("===============\n");
    let loan = LoanParams::new(100_000.0, 12 * 10, 0.03);
    let schedule = amortize_loan(&loan)?;
    print!("{}", report::loan_report(&loan, &schedule));

    println!("\nExample 3: borrowing capacity");
    println!("=============================\n");
    let capital = affordable_capital(1000.0, 0.05, 12 * 10)?;
    println!("You can borrow {:.2}.", capital);

    println!("\nExample 4: strategy sweep");
    println!("=========================\n");
    let engine = SweepEngine::new(SweepConfig::default())?;
    for slice in engine.run()? {
        println!("{}", "-".repeat(60));
        print!("{}", report::sweep_report(engine.config(), &slice));
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
