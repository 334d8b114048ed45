//! Sweep configuration loading
//!
//! A sweep is configured from, in increasing priority:
//! 1. [`SweepConfig::default`] (the reference grid)
//! 2. a JSON file, fields optional
//! 3. environment variables:
//!    SWEEP_MONTHLY_PAYMENT, SWEEP_MONTHS, SWEEP_RETURN_RATES,
//!    SWEEP_CREDIT_RATES, SWEEP_INFLATION_RATES (comma-separated),
//!    SWEEP_PRECISION (`truncated` or `full`)

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{SimError, SimResult};
use crate::strategy::{CellPrecision, SweepConfig};

/// JSON file layout; missing fields keep their defaults
#[derive(Debug, Default, Deserialize)]
struct SweepFile {
    monthly_payment: Option<f64>,
    months: Option<u32>,
    return_rates: Option<Vec<f64>>,
    credit_rates: Option<Vec<f64>>,
    inflation_rates: Option<Vec<f64>>,
    precision: Option<CellPrecision>,
}

impl SweepFile {
    fn merge_into(self, config: &mut SweepConfig) {
        if let Some(v) = self.monthly_payment {
            config.monthly_payment = v;
        }
        if let Some(v) = self.months {
            config.months = v;
        }
        if let Some(v) = self.return_rates {
            config.return_rates = v;
        }
        if let Some(v) = self.credit_rates {
            config.credit_rates = v;
        }
        if let Some(v) = self.inflation_rates {
            config.inflation_rates = v;
        }
        if let Some(v) = self.precision {
            config.precision = v;
        }
    }
}

/// Load a sweep config from a JSON file on top of the defaults
pub fn load_sweep_config<P: AsRef<Path>>(path: P) -> SimResult<SweepConfig> {
    let file = File::open(path)?;
    load_sweep_config_from_reader(BufReader::new(file))
}

/// Load a sweep config from any JSON reader
pub fn load_sweep_config_from_reader<R: std::io::Read>(reader: R) -> SimResult<SweepConfig> {
    let file: SweepFile = serde_json::from_reader(reader)?;
    let mut config = SweepConfig::default();
    file.merge_into(&mut config);
    Ok(config)
}

fn parse_number<T: std::str::FromStr>(var: &str, raw: &str) -> SimResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SimError::invalid_argument(format!("{}: cannot parse '{}'", var, raw)))
}

fn parse_rate_list(var: &str, raw: &str) -> SimResult<Vec<f64>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_number(var, s))
        .collect()
}

fn parse_precision(var: &str, raw: &str) -> SimResult<CellPrecision> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "truncated" => Ok(CellPrecision::Truncated),
        "full" => Ok(CellPrecision::Full),
        other => Err(SimError::invalid_argument(format!(
            "{}: expected 'truncated' or 'full', got '{}'",
            var, other
        ))),
    }
}

impl SweepConfig {
    /// Apply SWEEP_* environment variables
    pub fn apply_env_overrides(&mut self) -> SimResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> SimResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SWEEP_MONTHLY_PAYMENT") {
            self.monthly_payment = parse_number("SWEEP_MONTHLY_PAYMENT", &raw)?;
        }
        if let Some(raw) = lookup("SWEEP_MONTHS") {
            self.months = parse_number("SWEEP_MONTHS", &raw)?;
        }
        if let Some(raw) = lookup("SWEEP_RETURN_RATES") {
            self.return_rates = parse_rate_list("SWEEP_RETURN_RATES", &raw)?;
        }
        if let Some(raw) = lookup("SWEEP_CREDIT_RATES") {
            self.credit_rates = parse_rate_list("SWEEP_CREDIT_RATES", &raw)?;
        }
        if let Some(raw) = lookup("SWEEP_INFLATION_RATES") {
            self.inflation_rates = parse_rate_list("SWEEP_INFLATION_RATES", &raw)?;
        }
        if let Some(raw) = lookup("SWEEP_PRECISION") {
            self.precision = parse_precision("SWEEP_PRECISION", &raw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "months": 60, "credit_rates": [0.02], "precision": "full" }"#;
        let config = load_sweep_config_from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.months, 60);
        assert_eq!(config.credit_rates, vec![0.02]);
        assert_eq!(config.precision, CellPrecision::Full);
        assert_eq!(config.monthly_payment, 1000.0);
        assert_eq!(config.return_rates.len(), 5);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = load_sweep_config_from_reader("{ months: ".as_bytes());
        assert!(matches!(result, Err(SimError::Json(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SWEEP_MONTHLY_PAYMENT", "500"),
            ("SWEEP_RETURN_RATES", "0.02, 0.07"),
            ("SWEEP_PRECISION", "FULL"),
        ]
        .into_iter()
        .collect();

        let mut config = SweepConfig::default();
        config
            .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.monthly_payment, 500.0);
        assert_eq!(config.return_rates, vec![0.02, 0.07]);
        assert_eq!(config.precision, CellPrecision::Full);
        assert_eq!(config.months, 120);
    }

    #[test]
    fn test_unparseable_override_is_an_error() {
        let mut config = SweepConfig::default();
        let result = config.apply_overrides_from(|k| {
            (k == "SWEEP_MONTHS").then(|| "ten years".to_string())
        });
        assert!(matches!(result, Err(SimError::InvalidArgument { .. })));

        let result = config.apply_overrides_from(|k| {
            (k == "SWEEP_PRECISION").then(|| "rounded".to_string())
        });
        assert!(result.is_err());
    }
}
