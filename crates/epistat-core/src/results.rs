//! Calculator result records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A displayed value: either preformatted text or a raw number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Number(n) => write!(f, "{n}"),
            ResultValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ResultValue {
    fn from(n: f64) -> Self {
        ResultValue::Number(n)
    }
}

impl From<String> for ResultValue {
    fn from(s: String) -> Self {
        ResultValue::Text(s)
    }
}

impl From<&str> for ResultValue {
    fn from(s: &str) -> Self {
        ResultValue::Text(s.to_string())
    }
}

/// One labeled line of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub label: String,
    pub value: ResultValue,
    /// Headline statistic (as opposed to a supporting one).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_main: bool,
}

impl ResultEntry {
    pub fn main(label: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_main: true,
        }
    }

    pub fn supporting(label: impl Into<String>, value: impl Into<ResultValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_main: false,
        }
    }
}

/// Everything a calculator returns for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Ordered result entries. Empty for degenerate input.
    pub results: Vec<ResultEntry>,
    /// Human-readable summary of the headline statistic.
    pub interpretation: String,
    /// Reference snippet in R for reproducing the numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_code: Option<String>,
    /// Display formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl CalculationResult {
    /// A result with no entries, only an explanation.
    pub fn empty(interpretation: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            interpretation: interpretation.into(),
            r_code: None,
            formula: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up an entry by its label.
    pub fn entry(&self, label: &str) -> Option<&ResultEntry> {
        self.results.iter().find(|e| e.label == label)
    }

    pub fn main_entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.results.iter().filter(|e| e.is_main)
    }

    pub fn with_r_code(mut self, code: String) -> Self {
        self.r_code = Some(code);
        self
    }
}
