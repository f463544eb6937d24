//! Combined epidemiology toolkit for a 2x2 table.
//!
//! From a single table this reports the odds ratio with two intervals, the
//! risk ratio with a Katz interval, the risk difference with a Wald
//! interval, and an overall association p-value.
//!
//! The continuity correction (+0.5 per cell) is applied unconditionally to
//! the Woolf interval and the p-value's standard error, but to the point
//! estimates only when some cell is zero.

use serde::{Deserialize, Serialize};

use crate::distribution::z_critical;
use crate::format::{format_fixed, format_p_value, format_percent, p_phrase};
use crate::formulas::{self, Interval};
use crate::registry::CalculatorId;
use crate::results::{CalculationResult, ResultEntry};
use crate::table::ContingencyTable;

use super::{interval_text, significance_phrase, RatioInput};

/// Haldane-Anscombe correction added to every cell.
pub const CONTINUITY_CORRECTION: f64 = 0.5;

/// The numbers behind an epi 2x2 result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epi2x2Estimate {
    /// True when a zero cell forced corrected counts into the point
    /// estimates.
    pub corrected: bool,
    pub odds_ratio: f64,
    /// Continuity-corrected Woolf interval.
    pub woolf: Interval,
    /// Uncorrected log-scale interval, or the Woolf interval when any cell
    /// is zero.
    pub exact_like: Interval,
    pub risk_ratio: f64,
    pub katz: Interval,
    pub risk_difference: f64,
    pub wald: Interval,
    pub p_value: f64,
}

pub fn estimate(table: &ContingencyTable, z: f64) -> Epi2x2Estimate {
    let adjusted = table.corrected(CONTINUITY_CORRECTION);
    let corrected = table.has_zero_cell();

    let corrected_or = formulas::odds_ratio(&adjusted);
    let woolf_se = formulas::woolf_se(&adjusted);
    let woolf = formulas::log_interval(corrected_or, woolf_se, z);

    let (odds_ratio, exact_like) = if corrected {
        (corrected_or, woolf)
    } else {
        let raw_or = formulas::odds_ratio(table);
        (
            raw_or,
            formulas::log_interval(raw_or, formulas::woolf_se(table), z),
        )
    };

    let rr_table = if corrected { &adjusted } else { table };
    let risk_ratio = formulas::risk_ratio(rr_table);
    let katz = formulas::log_interval(risk_ratio, formulas::katz_se(rr_table), z);

    let risk_difference = formulas::risk_difference(table);
    let wald = formulas::wald_interval(risk_difference, formulas::risk_difference_se(table), z);

    Epi2x2Estimate {
        corrected,
        odds_ratio,
        woolf,
        exact_like,
        risk_ratio,
        katz,
        risk_difference,
        wald,
        p_value: formulas::log_scale_p_value(odds_ratio, woolf_se),
    }
}

pub fn compute(input: &RatioInput) -> CalculationResult {
    let table = input.table();
    let confidence = input.confidence_or_default();
    let est = estimate(&table, z_critical(confidence));
    let level = format_percent(confidence);

    if est.corrected {
        tracing::debug!(?table, "zero cell: using continuity-corrected estimates");
    }

    let results = vec![
        ResultEntry::main("Odds ratio", format_fixed(est.odds_ratio, 4)),
        ResultEntry::main(
            format!("OR {level}% CI (Woolf, corrected)"),
            interval_text(&est.woolf),
        ),
        ResultEntry::supporting(
            format!("OR {level}% CI (exact-like)"),
            interval_text(&est.exact_like),
        ),
        ResultEntry::main("Risk ratio", format_fixed(est.risk_ratio, 4)),
        ResultEntry::supporting(format!("RR {level}% CI (Katz)"), interval_text(&est.katz)),
        ResultEntry::main("Risk difference", format_fixed(est.risk_difference, 4)),
        ResultEntry::supporting(format!("RD {level}% CI (Wald)"), interval_text(&est.wald)),
        ResultEntry::main("P-value (association)", format_p_value(est.p_value)),
        ResultEntry::supporting("Risk in exposed", format_fixed(table.risk_exposed(), 4)),
        ResultEntry::supporting("Risk in unexposed", format_fixed(table.risk_unexposed(), 4)),
        ResultEntry::supporting(
            "Continuity correction",
            if est.corrected {
                "Applied (+0.5 to each cell)"
            } else {
                "Not needed"
            },
        ),
    ];

    let interpretation = format!(
        "OR = {}, RR = {}, RD = {}. The association is {} (p {}).{}",
        format_fixed(est.odds_ratio, 4),
        format_fixed(est.risk_ratio, 4),
        format_fixed(est.risk_difference, 4),
        significance_phrase(est.p_value),
        p_phrase(est.p_value),
        if est.corrected {
            " A zero cell was present, so 0.5 was added to every cell for the ratio estimates."
        } else {
            ""
        },
    );

    CalculationResult {
        results,
        interpretation,
        r_code: None,
        formula: Some(CalculatorId::Epi2x2.descriptor().formula.to_string()),
    }
}
