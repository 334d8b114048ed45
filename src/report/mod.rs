//! Presentation of simulation results
//!
//! Nothing in the simulation engine prints; callers pick a renderer here:
//! - [`text`]: console reports and matrix tables
//! - [`csv_export`]: series and sweep cells for external charting

pub mod text;
pub mod csv_export;

pub use text::{growth_report, loan_report, strategy_report, sweep_report, matrix_table};
pub use csv_export::{write_growth_csv, write_loan_csv, write_sweep_csv};
