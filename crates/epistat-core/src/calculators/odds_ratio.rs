//! Odds ratio with a Woolf (log-scale Wald) confidence interval.

use serde::{Deserialize, Serialize};

use crate::distribution::z_critical;
use crate::format::{format_fixed, format_p_value};
use crate::formulas::{self, Interval};
use crate::registry::CalculatorId;
use crate::results::{CalculationResult, ResultEntry};
use crate::table::ContingencyTable;

use super::{ci_label, describe_ratio, RatioInput};

/// The numbers behind an odds ratio result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsRatioEstimate {
    pub odds_ratio: f64,
    pub se_log: f64,
    pub interval: Interval,
    pub p_value: f64,
}

pub fn estimate(table: &ContingencyTable, z: f64) -> OddsRatioEstimate {
    let odds_ratio = formulas::odds_ratio(table);
    let se_log = formulas::woolf_se(table);
    OddsRatioEstimate {
        odds_ratio,
        se_log,
        interval: formulas::log_interval(odds_ratio, se_log, z),
        p_value: formulas::log_scale_p_value(odds_ratio, se_log),
    }
}

pub fn compute(input: &RatioInput) -> CalculationResult {
    let table = input.table();
    let confidence = input.confidence_or_default();
    let z = z_critical(confidence);
    let est = estimate(&table, z);

    let results = vec![
        ResultEntry::main("Odds ratio", format_fixed(est.odds_ratio, 4)),
        ResultEntry::main(ci_label(confidence, "lower"), format_fixed(est.interval.lower, 4)),
        ResultEntry::main(ci_label(confidence, "upper"), format_fixed(est.interval.upper, 4)),
        ResultEntry::supporting("ln(OR)", format_fixed(est.odds_ratio.ln(), 4)),
        ResultEntry::supporting("SE of ln(OR)", format_fixed(est.se_log, 4)),
        ResultEntry::supporting("P-value", format_p_value(est.p_value)),
        ResultEntry::supporting("Z critical value", format_fixed(z, 4)),
    ];

    CalculationResult {
        results,
        interpretation: describe_ratio(
            "OR",
            "odds",
            est.odds_ratio,
            &est.interval,
            confidence,
            est.p_value,
        ),
        r_code: None,
        formula: Some(CalculatorId::OddsRatio.descriptor().formula.to_string()),
    }
}
