//! Annual to monthly rate conversion
//!
//! Supports:
//! - Monthly-equivalent compounding rates for returns and credit
//! - Monthly inflation erosion factors (divisors, not rates)
//! - Month-by-month deflator schedules over a horizon in years

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Months per year, used for every annual/monthly conversion
pub const MONTHS_PER_YEAR: u32 = 12;

fn validate_annual(name: &'static str, annual_rate: f64) -> SimResult<()> {
    if !annual_rate.is_finite() || annual_rate <= -1.0 {
        return Err(SimError::InvalidRate {
            name,
            value: annual_rate,
        });
    }
    Ok(())
}

/// Monthly-equivalent compounding rate: `(1+r)^(1/12) - 1`
///
/// Pure conversion, no validation. Rates at or below -100% yield NaN.
pub fn monthly_equivalent(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
}

/// Monthly inflation erosion factor: `(1+r)^(1/12)`
pub fn monthly_erosion_factor(annual_inflation: f64) -> f64 {
    (1.0 + annual_inflation).powf(1.0 / MONTHS_PER_YEAR as f64)
}

/// A growth (return or credit) rate with its monthly equivalent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    /// Annual rate as a decimal (0.05 = 5%)
    pub annual: f64,

    /// Monthly rate such that `(1+monthly)^12 = 1+annual`
    pub monthly: f64,
}

impl RateSpec {
    /// Derive the monthly equivalent of an annual growth rate
    pub fn growth(annual: f64) -> SimResult<Self> {
        Self::named("annual rate", annual)
    }

    /// Same as [`RateSpec::growth`] but labels errors with the parameter name
    pub fn named(name: &'static str, annual: f64) -> SimResult<Self> {
        validate_annual(name, annual)?;
        Ok(Self {
            annual,
            monthly: monthly_equivalent(annual),
        })
    }

    /// Whether the monthly rate is exactly zero (closed-form annuity undefined)
    pub fn is_zero(&self) -> bool {
        self.monthly == 0.0
    }

    /// Growth factor over `months` periods
    pub fn accumulation_factor(&self, months: u32) -> f64 {
        (1.0 + self.monthly).powf(months as f64)
    }
}

/// An annual inflation rate with its monthly erosion factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationSpec {
    /// Annual inflation as a decimal
    pub annual: f64,

    /// Per-month divisor turning nominal amounts into present value
    pub monthly_factor: f64,
}

impl InflationSpec {
    pub fn new(annual: f64) -> SimResult<Self> {
        validate_annual("annual inflation", annual)?;
        Ok(Self {
            annual,
            monthly_factor: monthly_erosion_factor(annual),
        })
    }

    /// No inflation: factor of exactly 1
    pub fn none() -> Self {
        Self {
            annual: 0.0,
            monthly_factor: 1.0,
        }
    }

    /// Express a nominal amount in present-value terms, one month deflated
    pub fn deflate(&self, amount: f64) -> f64 {
        amount / self.monthly_factor
    }
}

impl Default for InflationSpec {
    fn default() -> Self {
        Self::none()
    }
}

/// Month-by-month coefficients bringing future amounts back to today's money
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflatorSchedule {
    /// Coefficient per month, starting at 1.0 for month 0
    pub coefficients: Vec<f64>,

    /// Month labels `0..12*years`
    pub months: Vec<u32>,
}

impl DeflatorSchedule {
    /// Build a schedule over `years` years of annual inflation
    ///
    /// Each month multiplies the previous coefficient by the linearised
    /// factor `2 - (1+r)^(1/12)`.
    pub fn for_years(annual_inflation: f64, years: u32) -> SimResult<Self> {
        validate_annual("annual inflation", annual_inflation)?;
        if years == 0 {
            return Err(SimError::invalid_argument(
                "deflator schedule needs at least one year",
            ));
        }

        let total = years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| SimError::invalid_argument("deflator schedule horizon overflows"))?;
        let step = 2.0 - monthly_erosion_factor(annual_inflation);

        let mut coefficients = Vec::with_capacity(total as usize);
        let mut current = 1.0;
        for month in 0..total {
            if month > 0 {
                current *= step;
            }
            coefficients.push(current);
        }

        Ok(Self {
            coefficients,
            months: (0..total).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Present value of `amount` received in `month`, if the month is covered
    pub fn present_value(&self, amount: f64, month: u32) -> Option<f64> {
        self.coefficients.get(month as usize).map(|c| amount * c)
    }
}
