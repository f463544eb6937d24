//! Batch report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculators::CalculatorInput;
use crate::registry::CalculatorId;
use crate::results::CalculationResult;
use crate::validation::FieldError;

/// The outcome of running one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the batch was run.
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub entries: Vec<BatchEntry>,
}

/// One calculation's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub calculator: CalculatorId,
    /// The input after defaults were applied.
    pub input: CalculatorInput,
    /// Present when the input passed validation.
    #[serde(default)]
    pub result: Option<CalculationResult>,
    /// Field errors when the input was rejected.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl BatchEntry {
    /// Display label: the name if given, else the calculator title.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or(self.calculator.descriptor().title)
    }
}

impl BatchReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: BatchReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.result.is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{self, RatioInput};

    fn sample_report() -> BatchReport {
        let input = CalculatorInput::OddsRatio(RatioInput {
            a: 70.0,
            b: 30.0,
            c: 40.0,
            d: 60.0,
            confidence: Some(95.0),
        });
        BatchReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            name: "Sample".into(),
            description: String::new(),
            entries: vec![BatchEntry {
                name: None,
                calculator: input.id(),
                input,
                result: Some(calculators::compute(&input)),
                errors: vec![],
            }],
        }
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        let report = sample_report();
        report.save_json(&path).unwrap();

        let loaded = BatchReport::load_json(&path).unwrap();
        assert_eq!(loaded.name, "Sample");
        assert_eq!(loaded.entries[0].input, report.entries[0].input);
        assert_eq!(loaded.entries[0].result, report.entries[0].result);
    }

    #[test]
    fn entry_label_falls_back_to_title() {
        let report = sample_report();
        assert_eq!(report.entries[0].label(), "Odds ratio");
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(BatchReport::load_json(Path::new("no_such_report.json")).is_err());
    }
}
