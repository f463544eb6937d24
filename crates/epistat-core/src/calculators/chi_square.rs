//! Chi-square test of independence for a 2x2 table.

use serde::{Deserialize, Serialize};

use crate::distribution::chi_square_p_value;
use crate::format::{format_fixed, format_p_value, p_phrase};
use crate::registry::CalculatorId;
use crate::results::{CalculationResult, ResultEntry};
use crate::table::ContingencyTable;

use super::{significance_phrase, DEFAULT_YATES};

/// A 2x2 table always has one degree of freedom.
pub const DEGREES_OF_FREEDOM: f64 = 1.0;

const YATES_FORMULA: &str = "χ² = n(|ad − bc| − n/2)² / [(a+b)(c+d)(a+c)(b+d)]";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChiSquareInput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Apply the Yates continuity correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yates: Option<bool>,
}

impl ChiSquareInput {
    pub fn table(&self) -> ContingencyTable {
        ContingencyTable::new(self.a, self.b, self.c, self.d)
    }

    pub fn yates_or_default(&self) -> bool {
        self.yates.unwrap_or(DEFAULT_YATES)
    }
}

/// `|ad - bc|`, reduced by `n/2` and clamped at zero when `yates` is set.
pub fn yates_numerator(table: &ContingencyTable, yates: bool) -> f64 {
    let raw = (table.a * table.d - table.b * table.c).abs();
    if yates {
        (raw - table.total() / 2.0).max(0.0)
    } else {
        raw
    }
}

/// `n * numerator² / (R1 * R2 * C1 * C2)`, or `None` if any row or column
/// total is zero.
///
/// Evaluated as `n * (num / (R1 * C1)) * (num / (R2 * C2))` so that the
/// marginal product never overflows for very large counts.
pub fn chi_square_statistic(table: &ContingencyTable, yates: bool) -> Option<f64> {
    if table.has_zero_marginal() {
        return None;
    }
    let numerator = yates_numerator(table, yates);
    let first = numerator / (table.row1() * table.col1());
    let second = numerator / (table.row2() * table.col2());
    Some(table.total() * first * second)
}

pub fn compute(input: &ChiSquareInput) -> CalculationResult {
    let table = input.table();
    let yates = input.yates_or_default();

    let Some(statistic) = chi_square_statistic(&table, yates) else {
        tracing::warn!(?table, "chi-square skipped: zero row or column total");
        return CalculationResult::empty(
            "Cannot compute the chi-square test: at least one row or column total is zero, \
             so expected counts are undefined. Every row and column needs at least one observation.",
        );
    };
    let p_value = chi_square_p_value(statistic, DEGREES_OF_FREEDOM);

    let results = vec![
        ResultEntry::main("Chi-square statistic", format_fixed(statistic, 4)),
        ResultEntry::main("P-value", format_p_value(p_value)),
        ResultEntry::supporting("Degrees of freedom", DEGREES_OF_FREEDOM),
        ResultEntry::supporting(
            "Yates correction",
            if yates { "Applied" } else { "Not applied" },
        ),
        ResultEntry::supporting("Sample size (n)", table.total()),
    ];

    let interpretation = format!(
        "χ²(1) = {}, p {}. The association between exposure and outcome is {} at α = {}.",
        format_fixed(statistic, 4),
        p_phrase(p_value),
        significance_phrase(p_value),
        super::ALPHA,
    );

    let formula = if yates {
        YATES_FORMULA
    } else {
        CalculatorId::ChiSquare.descriptor().formula
    };

    CalculationResult {
        results,
        interpretation,
        r_code: None,
        formula: Some(formula.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(a: f64, b: f64, c: f64, d: f64, yates: bool) -> ChiSquareInput {
        ChiSquareInput {
            a,
            b,
            c,
            d,
            yates: Some(yates),
        }
    }

    #[test]
    fn yates_reference_scenario() {
        let t = ContingencyTable::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(yates_numerator(&t, false), 200.0);
        assert_eq!(yates_numerator(&t, true), 150.0);
        let chi = chi_square_statistic(&t, true).unwrap();
        assert!((chi - 2_250_000.0 / 5_040_000.0).abs() < 1e-12);

        let result = compute(&input(10.0, 20.0, 30.0, 40.0, true));
        assert_eq!(
            result.entry("Chi-square statistic").unwrap().value.to_string(),
            "0.4464"
        );
        assert_eq!(result.entry("P-value").unwrap().value.to_string(), "0.5040");
        assert_eq!(
            result.entry("Yates correction").unwrap().value.to_string(),
            "Applied"
        );
        assert!(result.interpretation.contains("not statistically significant"));
        assert!(result.formula.unwrap().contains("n/2"));
    }

    #[test]
    fn uncorrected_statistic() {
        let t = ContingencyTable::new(10.0, 20.0, 30.0, 40.0);
        let chi = chi_square_statistic(&t, false).unwrap();
        assert!((chi - 100.0 * 40_000.0 / 5_040_000.0).abs() < 1e-12);
    }

    #[test]
    fn zero_when_no_association() {
        let t = ContingencyTable::new(5.0, 10.0, 15.0, 30.0);
        assert_eq!(chi_square_statistic(&t, false), Some(0.0));
        assert_eq!(chi_square_statistic(&t, true), Some(0.0));
    }

    #[test]
    fn yates_never_exceeds_raw_and_never_negative() {
        let tables = [
            (1.0, 1.0, 1.0, 1.0),
            (3.0, 0.0, 0.0, 3.0),
            (10.0, 20.0, 30.0, 40.0),
            (2.0, 9.0, 7.0, 1.0),
            (0.0, 5.0, 5.0, 0.0),
            (100.0, 1.0, 1.0, 100.0),
        ];
        for (a, b, c, d) in tables {
            let t = ContingencyTable::new(a, b, c, d);
            let corrected = yates_numerator(&t, true);
            assert!(corrected >= 0.0);
            assert!(corrected <= yates_numerator(&t, false));
            if let Some(chi) = chi_square_statistic(&t, true) {
                assert!(chi >= 0.0);
            }
        }
    }

    #[test]
    fn zero_row_short_circuits() {
        let t = ContingencyTable::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(chi_square_statistic(&t, true), None);

        let result = compute(&input(0.0, 0.0, 5.0, 5.0, true));
        assert!(result.is_empty());
        assert!(result.interpretation.contains("zero"));
        assert!(result.formula.is_none());
    }

    #[test]
    fn huge_counts_stay_finite() {
        let small = ContingencyTable::new(1.0, 2.0, 3.0, 4.0);
        let huge = ContingencyTable::new(1e80, 2e80, 3e80, 4e80);
        let expected = chi_square_statistic(&small, false).unwrap() * 1e80;
        let chi = chi_square_statistic(&huge, false).unwrap();
        assert!(chi.is_finite());
        assert!((chi / expected - 1.0).abs() < 1e-9, "got {chi}");

        let result = compute(&input(1e80, 2e80, 3e80, 4e80, false));
        assert_ne!(
            result.entry("Chi-square statistic").unwrap().value.to_string(),
            "N/A"
        );
        assert_eq!(result.entry("P-value").unwrap().value.to_string(), "< 0.001");
    }

    #[test]
    fn strong_association_reports_floor() {
        let result = compute(&input(50.0, 5.0, 5.0, 50.0, false));
        assert_eq!(result.entry("P-value").unwrap().value.to_string(), "< 0.001");
        assert!(result.interpretation.contains("p < 0.001"));
        assert!(result.interpretation.contains("is statistically significant"));
    }

    #[test]
    fn yates_defaults_on() {
        let i = ChiSquareInput {
            a: 1.0,
            b: 2.0,
            c: 3.0,
            d: 4.0,
            yates: None,
        };
        assert!(i.yates_or_default());
    }
}
