//! Static catalog of the available calculators.
//!
//! The set of calculators is fixed at build time, so the registry is a
//! plain array of descriptors keyed by [`CalculatorId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Identifier of a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorId {
    ChiSquare,
    OddsRatio,
    RiskRatio,
    #[serde(rename = "epi-2x2")]
    Epi2x2,
}

impl CalculatorId {
    pub const ALL: [CalculatorId; 4] = [
        CalculatorId::ChiSquare,
        CalculatorId::OddsRatio,
        CalculatorId::RiskRatio,
        CalculatorId::Epi2x2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorId::ChiSquare => "chi-square",
            CalculatorId::OddsRatio => "odds-ratio",
            CalculatorId::RiskRatio => "risk-ratio",
            CalculatorId::Epi2x2 => "epi-2x2",
        }
    }

    pub fn descriptor(&self) -> &'static CalculatorDescriptor {
        // REGISTRY is ordered like ALL
        &REGISTRY[*self as usize]
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "chi-square" | "chisq" | "chi2" => Ok(CalculatorId::ChiSquare),
            "odds-ratio" | "or" => Ok(CalculatorId::OddsRatio),
            "risk-ratio" | "rr" | "relative-risk" => Ok(CalculatorId::RiskRatio),
            "epi-2x2" | "epi" | "2x2" => Ok(CalculatorId::Epi2x2),
            _ => Err(CalcError::UnknownCalculator(s.to_string())),
        }
    }
}

/// Grouping used when listing calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HypothesisTesting,
    Epidemiology,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::HypothesisTesting => write!(f, "hypothesis-testing"),
            Category::Epidemiology => write!(f, "epidemiology"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "hypothesis-testing" | "testing" => Ok(Category::HypothesisTesting),
            "epidemiology" | "epi" => Ok(Category::Epidemiology),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Metadata describing one calculator.
#[derive(Debug, Serialize)]
pub struct CalculatorDescriptor {
    pub id: CalculatorId,
    pub title: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    /// Display formula.
    pub formula: &'static str,
}

impl CalculatorDescriptor {
    /// Case-insensitive match against id, title, description, and keywords.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.id.as_str().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.keywords.iter().any(|k| k.contains(&query))
    }
}

pub static REGISTRY: [CalculatorDescriptor; 4] = [
    CalculatorDescriptor {
        id: CalculatorId::ChiSquare,
        title: "Chi-square test (2x2)",
        category: Category::HypothesisTesting,
        description: "Pearson chi-square test of independence for a 2x2 table, \
                      with optional Yates continuity correction.",
        keywords: &["chi-square", "independence", "yates", "contingency", "association"],
        formula: "χ² = n(ad − bc)² / [(a+b)(c+d)(a+c)(b+d)]",
    },
    CalculatorDescriptor {
        id: CalculatorId::OddsRatio,
        title: "Odds ratio",
        category: Category::Epidemiology,
        description: "Odds ratio for a 2x2 table with a Woolf log-scale confidence interval.",
        keywords: &["odds", "odds ratio", "woolf", "case-control"],
        formula: "OR = (a·d)/(b·c); CI = exp(ln OR ± z·√(1/a + 1/b + 1/c + 1/d))",
    },
    CalculatorDescriptor {
        id: CalculatorId::RiskRatio,
        title: "Risk ratio",
        category: Category::Epidemiology,
        description: "Risk (relative risk) ratio for a 2x2 table with a Katz log-scale \
                      confidence interval.",
        keywords: &["risk", "relative risk", "risk ratio", "katz", "cohort"],
        formula: "RR = [a/(a+b)] / [c/(c+d)]; CI = exp(ln RR ± z·√(1/a − 1/(a+b) + 1/c − 1/(c+d)))",
    },
    CalculatorDescriptor {
        id: CalculatorId::Epi2x2,
        title: "Epidemiology 2x2 toolkit",
        category: Category::Epidemiology,
        description: "Odds ratio (Woolf and uncorrected intervals), risk ratio, risk difference, \
                      and an association p-value from one 2x2 table.",
        keywords: &["odds", "risk", "risk difference", "haldane", "continuity", "cohort"],
        formula: "OR = (a·d)/(b·c); RR = [a/(a+b)] / [c/(c+d)]; RD = a/(a+b) − c/(c+d); \
                  zero cells: +0.5 to every cell",
    },
];

pub fn all() -> &'static [CalculatorDescriptor] {
    &REGISTRY
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static CalculatorDescriptor> {
    REGISTRY.iter().filter(move |d| d.category == category)
}

pub fn search(query: &str) -> Vec<&'static CalculatorDescriptor> {
    REGISTRY.iter().filter(|d| d.matches(query)).collect()
}
