//! Critical values and p-values for the normal, t, and chi-square
//! distributions.
//!
//! Everything here is a pure numeric function. Out-of-domain inputs do not
//! error: p-value functions return 1.0 (no evidence against the null) and
//! quantile functions return NaN, so callers can format the result instead
//! of unwinding.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal, StudentsT};

/// Degrees of freedom used when a t lookup stands in for the normal
/// distribution.
pub const NORMAL_APPROX_DF: f64 = 1000.0;

/// Inverse of the standard normal CDF. NaN outside the open unit interval.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Two-sided normal critical value for a confidence level given in percent.
///
/// `z_critical(95.0)` is about 1.959964.
pub fn z_critical(confidence_percent: f64) -> f64 {
    let alpha = 1.0 - confidence_percent / 100.0;
    inverse_normal_cdf(1.0 - alpha / 2.0)
}

/// Upper-tail probability of a chi-square statistic.
pub fn chi_square_p_value(statistic: f64, degrees_of_freedom: f64) -> f64 {
    if !(statistic > 0.0) || !(degrees_of_freedom > 0.0) {
        return 1.0;
    }
    if statistic.is_infinite() {
        return 0.0;
    }
    match ChiSquared::new(degrees_of_freedom) {
        Ok(dist) => dist.sf(statistic).clamp(0.0, 1.0),
        Err(e) => {
            tracing::debug!(degrees_of_freedom, "chi-square distribution rejected: {e}");
            1.0
        }
    }
}

/// P-values for a t statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TPValue {
    /// `P(|T| >= |t|)`.
    pub two_sided: f64,
    /// Upper tail, `P(T >= t)`.
    pub one_sided: f64,
}

impl TPValue {
    const NO_EVIDENCE: TPValue = TPValue {
        two_sided: 1.0,
        one_sided: 1.0,
    };
}

/// P-values for a t statistic with `degrees_of_freedom` degrees of freedom.
pub fn t_p_value(statistic: f64, degrees_of_freedom: f64) -> TPValue {
    if statistic.is_nan() || !(degrees_of_freedom > 0.0) {
        return TPValue::NO_EVIDENCE;
    }
    if statistic.is_infinite() {
        return TPValue {
            two_sided: 0.0,
            one_sided: if statistic > 0.0 { 0.0 } else { 1.0 },
        };
    }
    let dist = match StudentsT::new(0.0, 1.0, degrees_of_freedom) {
        Ok(dist) => dist,
        Err(e) => {
            tracing::debug!(degrees_of_freedom, "t distribution rejected: {e}");
            return TPValue::NO_EVIDENCE;
        }
    };
    TPValue {
        two_sided: (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0),
        one_sided: dist.sf(statistic).clamp(0.0, 1.0),
    }
}
