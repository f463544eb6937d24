//! Shared risk ratio / odds ratio math.
//!
//! Point estimates, log-scale standard errors, and interval construction.
//! Zero denominators never panic: ratios become `inf` (or NaN for 0/0) and
//! an infinite standard error produces the interval `[0, inf]`.

use serde::{Deserialize, Serialize};

use crate::distribution::{t_p_value, NORMAL_APPROX_DF};
use crate::table::ContingencyTable;

/// A two-sided confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// The interval that carries no information, `[0, inf]`.
    pub const UNBOUNDED_RATIO: Interval = Interval {
        lower: 0.0,
        upper: f64::INFINITY,
    };

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// `numerator / denominator` with division singularities mapped to
/// `inf` (non-zero numerator) or NaN (0/0).
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        numerator / denominator
    }
}

/// `RR = [a/(a+b)] / [c/(c+d)]`.
pub fn risk_ratio(table: &ContingencyTable) -> f64 {
    ratio(table.risk_exposed(), table.risk_unexposed())
}

/// `OR = (a*d) / (b*c)`.
pub fn odds_ratio(table: &ContingencyTable) -> f64 {
    ratio(table.a * table.d, table.b * table.c)
}

/// `RD = a/(a+b) - c/(c+d)`.
pub fn risk_difference(table: &ContingencyTable) -> f64 {
    table.risk_exposed() - table.risk_unexposed()
}

/// Woolf standard error of ln(OR): `sqrt(1/a + 1/b + 1/c + 1/d)`.
pub fn woolf_se(table: &ContingencyTable) -> f64 {
    if table.has_zero_cell() {
        return f64::INFINITY;
    }
    table.cells().iter().map(|v| 1.0 / v).sum::<f64>().sqrt()
}

/// Katz standard error of ln(RR): `sqrt(1/a - 1/(a+b) + 1/c - 1/(c+d))`.
pub fn katz_se(table: &ContingencyTable) -> f64 {
    if table.a == 0.0 || table.c == 0.0 {
        return f64::INFINITY;
    }
    let variance = 1.0 / table.a - 1.0 / table.row1() + 1.0 / table.c - 1.0 / table.row2();
    // Rounding can push a zero variance slightly negative
    variance.max(0.0).sqrt()
}

/// Wald standard error of the risk difference. A row with no subjects
/// contributes no variance.
pub fn risk_difference_se(table: &ContingencyTable) -> f64 {
    let term = |p: f64, n: f64| if n == 0.0 { 0.0 } else { p * (1.0 - p) / n };
    (term(table.risk_exposed(), table.row1()) + term(table.risk_unexposed(), table.row2())).sqrt()
}

/// `exp(ln(estimate) ± z * se)`.
///
/// A non-positive or non-finite estimate, or a non-finite standard error,
/// yields `[0, inf]`.
pub fn log_interval(estimate: f64, se: f64, z: f64) -> Interval {
    if !(estimate > 0.0) || !estimate.is_finite() || !se.is_finite() {
        return Interval::UNBOUNDED_RATIO;
    }
    let centre = estimate.ln();
    Interval {
        lower: (centre - z * se).exp(),
        upper: (centre + z * se).exp(),
    }
}

/// `estimate ± z * se`.
pub fn wald_interval(estimate: f64, se: f64, z: f64) -> Interval {
    Interval {
        lower: estimate - z * se,
        upper: estimate + z * se,
    }
}

/// Two-sided p-value for `H0: ratio = 1` from `|ln(estimate)| / se_log`,
/// looked up against a t distribution with 1000 degrees of freedom.
///
/// A point estimate that is not positive and finite gives 1.0.
pub fn log_scale_p_value(estimate: f64, se_log: f64) -> f64 {
    if !(estimate > 0.0) || !estimate.is_finite() || !(se_log > 0.0) || !se_log.is_finite() {
        return 1.0;
    }
    let z = estimate.ln().abs() / se_log;
    t_p_value(z, NORMAL_APPROX_DF).two_sided
}
