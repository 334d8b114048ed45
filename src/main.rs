//! Amortization System CLI
//!
//! Command-line interface for growth, loan and strategy simulations

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use amortization_system::config::load_sweep_config;
use amortization_system::projection::{
    affordable_capital, amortize_loan, simulate_growth, GrowthParams, LoanParams,
};
use amortization_system::rates::DeflatorSchedule;
use amortization_system::report;
use amortization_system::scenario::{load_scenarios, ScenarioRunner};
use amortization_system::strategy::{
    InflationSweep, StrategyEvaluator, StrategyParams, SweepConfig, SweepEngine,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "amortization_system", version, about = "Compound growth, loan and borrow-vs-save simulations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compound growth of a capital with monthly contributions
    Growth {
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 0.0)]
        capital: f64,
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[arg(long)]
        months: u32,
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,
        /// Write the monthly series to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Amortization schedule of a fixed-term loan
    Loan {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        months: u32,
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Capital a fixed monthly payment can borrow
    Capital {
        #[arg(long)]
        payment: f64,
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
    },
    /// Compare regular saving with investing a borrowed lump sum
    Compare {
        #[arg(long)]
        payment: f64,
        #[arg(long)]
        months: u32,
        #[arg(long)]
        return_rate: f64,
        #[arg(long)]
        credit_rate: f64,
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,
        #[arg(long)]
        json: bool,
    },
    /// Sweep the comparison over return/credit/inflation grids
    Sweep {
        /// JSON sweep config; defaults to the reference grid
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Monthly coefficients bringing future amounts back to today's money
    Deflators {
        #[arg(long)]
        inflation: f64,
        #[arg(long)]
        years: u32,
    },
    /// Evaluate comparison scenarios listed in a CSV file
    Batch {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SweepResponse<'a> {
    generated_at: DateTime<Utc>,
    execution_time_ms: u64,
    config: &'a SweepConfig,
    slices: &'a [InflationSweep],
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Growth { rate, capital, contribution, months, inflation, csv, json } => {
            let params = GrowthParams {
                annual_return: rate,
                initial_capital: capital,
                monthly_contribution: contribution,
                months,
                annual_inflation: inflation,
            };
            let result = simulate_growth(&params)?;

            if let Some(path) = csv {
                report::write_growth_csv(create_output(&path)?, &result)?;
                println!("Series written to {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string(&result.summary(&params))?);
            } else {
                print!("{}", report::growth_report(&params, &result));
            }
        }
        Command::Loan { principal, months, rate, inflation, csv, json } => {
            let params = LoanParams::new(principal, months, rate).with_inflation(inflation);
            let result = amortize_loan(&params)?;

            if let Some(path) = csv {
                report::write_loan_csv(create_output(&path)?, &result)?;
                println!("Schedule written to {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string(&result.summary(&params))?);
            } else {
                print!("{}", report::loan_report(&params, &result));
            }
        }
        Command::Capital { payment, rate, months } => {
            let capital = affordable_capital(payment, rate, months)?;
            println!("You can borrow {:.2}.", capital);
        }
        Command::Compare { payment, months, return_rate, credit_rate, inflation, json } => {
            let params = StrategyParams {
                monthly_payment: payment,
                months,
                annual_return: return_rate,
                annual_credit_rate: credit_rate,
                annual_inflation: inflation,
            };
            let breakdown = StrategyEvaluator::new().evaluate_detailed(&params)?;
            if json {
                println!("{}", serde_json::to_string(&breakdown.comparison)?);
            } else {
                print!("{}", report::strategy_report(&breakdown));
            }
        }
        Command::Sweep { config, csv, json } => {
            let start = Instant::now();
            let mut sweep_config = match config {
                Some(path) => load_sweep_config(&path)
                    .with_context(|| format!("loading sweep config {}", path.display()))?,
                None => SweepConfig::default(),
            };
            sweep_config.apply_env_overrides()?;

            let engine = SweepEngine::new(sweep_config)?;
            let slices = engine.run()?;

            if let Some(path) = csv {
                report::write_sweep_csv(create_output(&path)?, engine.config(), &slices)?;
                if !json {
                    println!("Sweep cells written to {}", path.display());
                }
            }
            if json {
                let response = SweepResponse {
                    generated_at: Utc::now(),
                    execution_time_ms: start.elapsed().as_millis() as u64,
                    config: engine.config(),
                    slices: &slices,
                };
                println!("{}", serde_json::to_string(&response)?);
            } else {
                for slice in &slices {
                    println!("{}", "-".repeat(60));
                    print!("{}", report::sweep_report(engine.config(), slice));
                }
                println!("\nTotal time: {:?}", start.elapsed());
            }
        }
        Command::Deflators { inflation, years } => {
            let schedule = DeflatorSchedule::for_years(inflation, years)?;
            println!("{:>6} {:>12}", "Month", "Coefficient");
            for (month, coefficient) in schedule.months.iter().zip(&schedule.coefficients) {
                println!("{:>6} {:>12.6}", month, coefficient);
            }
        }
        Command::Batch { file, json } => {
            let scenarios = load_scenarios(&file)
                .with_context(|| format!("loading scenarios from {}", file.display()))?;
            let results = ScenarioRunner::new().run_batch(&scenarios)?;

            if json {
                println!("{}", serde_json::to_string(&results)?);
            } else {
                println!("{:>9} {:>6} {:>8} {:>8} {:>8} {:>12} {:>12} {:>12}",
                    "Payment", "Months", "Return", "Credit", "Infl", "Saving", "Borrowing", "Advantage");
                for r in &results {
                    println!("{:>9.2} {:>6} {:>8.4} {:>8.4} {:>8.4} {:>12.2} {:>12.2} {:>12.2}",
                        r.params.monthly_payment,
                        r.params.months,
                        r.params.annual_return,
                        r.params.annual_credit_rate,
                        r.params.annual_inflation,
                        r.comparison.net_benefit_saving,
                        r.comparison.net_benefit_borrowing,
                        r.comparison.advantage(),
                    );
                }
            }
        }
    }

    Ok(())
}
