//! Capital affordable from a fixed monthly payment
//!
//! Inverts the fixed-installment formula:
//! `capital = payment * (1 - (1+i)^-N) / i`

use crate::error::{ensure_finite, ensure_months, SimError, SimResult};
use crate::rates::RateSpec;

/// Present value of 1 paid at the end of each of `months` periods
///
/// Returns [`SimError::ZeroRateRequiresLinearFormula`] when the monthly rate
/// is zero; callers fall back to the linear form `N`.
pub fn annuity_factor(rate: &RateSpec, months: u32) -> SimResult<f64> {
    if rate.is_zero() {
        return Err(SimError::ZeroRateRequiresLinearFormula);
    }
    let discount = (1.0 + rate.monthly).powf(-(months as f64));
    Ok((1.0 - discount) / rate.monthly)
}

/// Annuity factor with the zero-rate case resolved to `months`
pub fn annuity_factor_or_linear(rate: &RateSpec, months: u32) -> SimResult<f64> {
    match annuity_factor(rate, months) {
        Err(SimError::ZeroRateRequiresLinearFormula) => Ok(months as f64),
        other => other,
    }
}

/// Principal that a fixed `monthly_payment` repays over `months` at `annual_rate`
///
/// No inflation adjustment. At a zero rate the result is exactly
/// `monthly_payment * months`.
pub fn affordable_capital(monthly_payment: f64, annual_rate: f64, months: u32) -> SimResult<f64> {
    ensure_finite("monthly payment", monthly_payment)?;
    ensure_months("credit term", months)?;
    let rate = RateSpec::named("annual credit rate", annual_rate)?;

    match annuity_factor(&rate, months) {
        Ok(factor) => Ok(monthly_payment * factor),
        Err(SimError::ZeroRateRequiresLinearFormula) => Ok(monthly_payment * months as f64),
        Err(e) => Err(e),
    }
}
