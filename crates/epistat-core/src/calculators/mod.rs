//! The 2x2 table calculators.
//!
//! Each calculator is a pure function from a validated input record to a
//! [`CalculationResult`]. [`run`] validates first; [`compute`] assumes the
//! input has already passed [`crate::validation::validate`].

pub mod chi_square;
pub mod epi_2x2;
pub mod odds_ratio;
pub mod risk_ratio;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::format::{format_fixed, format_percent, p_phrase};
use crate::formulas::Interval;
use crate::registry::CalculatorId;
use crate::results::CalculationResult;
use crate::table::ContingencyTable;
use crate::validation::validate;

pub use chi_square::ChiSquareInput;

/// Confidence level used when an input does not specify one.
pub const DEFAULT_CONFIDENCE: f64 = 95.0;
/// Yates correction is applied unless an input turns it off.
pub const DEFAULT_YATES: bool = true;
/// Significance level used in interpretations.
pub const ALPHA: f64 = 0.05;

/// Input shared by the ratio calculators (OR, RR, epi 2x2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioInput {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Confidence level in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl RatioInput {
    pub fn table(&self) -> ContingencyTable {
        ContingencyTable::new(self.a, self.b, self.c, self.d)
    }

    pub fn confidence_or_default(&self) -> f64 {
        self.confidence.unwrap_or(DEFAULT_CONFIDENCE)
    }
}

/// Input for any calculator, tagged by calculator id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculatorInput {
    ChiSquare(ChiSquareInput),
    OddsRatio(RatioInput),
    RiskRatio(RatioInput),
    #[serde(rename = "epi-2x2")]
    Epi2x2(RatioInput),
}

/// Values applied to inputs that leave optional fields unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputDefaults {
    pub confidence: f64,
    pub yates: bool,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            yates: DEFAULT_YATES,
        }
    }
}

impl CalculatorInput {
    /// Build an input for `id` from a table and optional parameters.
    /// Parameters that do not apply to `id` are ignored.
    pub fn from_table(
        id: CalculatorId,
        table: ContingencyTable,
        yates: Option<bool>,
        confidence: Option<f64>,
    ) -> Self {
        let ContingencyTable { a, b, c, d } = table;
        let ratio = RatioInput {
            a,
            b,
            c,
            d,
            confidence,
        };
        match id {
            CalculatorId::ChiSquare => CalculatorInput::ChiSquare(ChiSquareInput {
                a,
                b,
                c,
                d,
                yates,
            }),
            CalculatorId::OddsRatio => CalculatorInput::OddsRatio(ratio),
            CalculatorId::RiskRatio => CalculatorInput::RiskRatio(ratio),
            CalculatorId::Epi2x2 => CalculatorInput::Epi2x2(ratio),
        }
    }

    pub fn id(&self) -> CalculatorId {
        match self {
            CalculatorInput::ChiSquare(_) => CalculatorId::ChiSquare,
            CalculatorInput::OddsRatio(_) => CalculatorId::OddsRatio,
            CalculatorInput::RiskRatio(_) => CalculatorId::RiskRatio,
            CalculatorInput::Epi2x2(_) => CalculatorId::Epi2x2,
        }
    }

    pub fn table(&self) -> ContingencyTable {
        match self {
            CalculatorInput::ChiSquare(i) => i.table(),
            CalculatorInput::OddsRatio(i)
            | CalculatorInput::RiskRatio(i)
            | CalculatorInput::Epi2x2(i) => i.table(),
        }
    }

    /// The explicit confidence level, if this calculator takes one.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            CalculatorInput::ChiSquare(_) => None,
            CalculatorInput::OddsRatio(i)
            | CalculatorInput::RiskRatio(i)
            | CalculatorInput::Epi2x2(i) => i.confidence,
        }
    }

    /// Fill unset optional fields from `defaults`.
    pub fn with_defaults(mut self, defaults: &InputDefaults) -> Self {
        match &mut self {
            CalculatorInput::ChiSquare(i) => {
                i.yates.get_or_insert(defaults.yates);
            }
            CalculatorInput::OddsRatio(i)
            | CalculatorInput::RiskRatio(i)
            | CalculatorInput::Epi2x2(i) => {
                i.confidence.get_or_insert(defaults.confidence);
            }
        }
        self
    }
}

/// Compute the result for already-validated input.
pub fn compute(input: &CalculatorInput) -> CalculationResult {
    tracing::debug!(calculator = %input.id(), "computing");
    match input {
        CalculatorInput::ChiSquare(i) => chi_square::compute(i),
        CalculatorInput::OddsRatio(i) => odds_ratio::compute(i),
        CalculatorInput::RiskRatio(i) => risk_ratio::compute(i),
        CalculatorInput::Epi2x2(i) => epi_2x2::compute(i),
    }
}

/// Validate `input`, then compute.
pub fn run(input: &CalculatorInput) -> Result<CalculationResult, CalcError> {
    validate(input)?;
    Ok(compute(input))
}

/// Label such as `"95% CI lower"`.
pub(crate) fn ci_label(confidence: f64, suffix: &str) -> String {
    format!("{}% CI {suffix}", format_percent(confidence))
}

/// `"(lower, upper)"` with 4 decimals.
pub(crate) fn interval_text(interval: &Interval) -> String {
    format!(
        "({}, {})",
        format_fixed(interval.lower, 4),
        format_fixed(interval.upper, 4)
    )
}

/// One-paragraph summary of a ratio estimate and its interval.
pub(crate) fn describe_ratio(
    abbreviation: &str,
    quantity: &str,
    estimate: f64,
    interval: &Interval,
    confidence: f64,
    p_value: f64,
) -> String {
    if estimate.is_nan() {
        return format!(
            "{abbreviation} is undefined: neither group has any {quantity} of the outcome to compare."
        );
    }
    let summary = format!(
        "{abbreviation} = {} ({}% CI {} to {}), p {}.",
        format_fixed(estimate, 4),
        format_percent(confidence),
        format_fixed(interval.lower, 4),
        format_fixed(interval.upper, 4),
        p_phrase(p_value),
    );
    let reading = if interval.contains(1.0) {
        "The interval includes 1, so the data are consistent with no association.".to_string()
    } else if estimate > 1.0 {
        format!("Exposure is associated with a higher {quantity} of the outcome.")
    } else {
        format!("Exposure is associated with a lower {quantity} of the outcome.")
    };
    format!("{summary} {reading}")
}

pub(crate) fn significance_phrase(p: f64) -> &'static str {
    if p < ALPHA {
        "statistically significant"
    } else {
        "not statistically significant"
    }
}
