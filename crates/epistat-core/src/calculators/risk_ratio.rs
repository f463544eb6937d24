//! Risk ratio with a Katz (log-scale) confidence interval.

use serde::{Deserialize, Serialize};

use crate::distribution::z_critical;
use crate::format::{format_fixed, format_p_value};
use crate::formulas::{self, Interval};
use crate::registry::CalculatorId;
use crate::results::{CalculationResult, ResultEntry};
use crate::table::ContingencyTable;

use super::{ci_label, describe_ratio, RatioInput};

/// The numbers behind a risk ratio result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskRatioEstimate {
    pub risk_exposed: f64,
    pub risk_unexposed: f64,
    pub risk_ratio: f64,
    pub se_log: f64,
    pub interval: Interval,
    pub p_value: f64,
}

pub fn estimate(table: &ContingencyTable, z: f64) -> RiskRatioEstimate {
    let risk_ratio = formulas::risk_ratio(table);
    let se_log = formulas::katz_se(table);
    RiskRatioEstimate {
        risk_exposed: table.risk_exposed(),
        risk_unexposed: table.risk_unexposed(),
        risk_ratio,
        se_log,
        interval: formulas::log_interval(risk_ratio, se_log, z),
        p_value: formulas::log_scale_p_value(risk_ratio, se_log),
    }
}

pub fn compute(input: &RatioInput) -> CalculationResult {
    let table = input.table();
    let confidence = input.confidence_or_default();
    let est = estimate(&table, z_critical(confidence));

    let results = vec![
        ResultEntry::main("Risk ratio", format_fixed(est.risk_ratio, 4)),
        ResultEntry::main(ci_label(confidence, "lower"), format_fixed(est.interval.lower, 4)),
        ResultEntry::main(ci_label(confidence, "upper"), format_fixed(est.interval.upper, 4)),
        ResultEntry::supporting("Risk in exposed", format_fixed(est.risk_exposed, 4)),
        ResultEntry::supporting("Risk in unexposed", format_fixed(est.risk_unexposed, 4)),
        ResultEntry::supporting("SE of ln(RR)", format_fixed(est.se_log, 4)),
        ResultEntry::supporting("P-value", format_p_value(est.p_value)),
    ];

    CalculationResult {
        results,
        interpretation: describe_ratio(
            "RR",
            "risk",
            est.risk_ratio,
            &est.interval,
            confidence,
            est.p_value,
        ),
        r_code: None,
        formula: Some(CalculatorId::RiskRatio.descriptor().formula.to_string()),
    }
}
