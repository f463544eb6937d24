//! TOML batch file parser and runner.
//!
//! A batch file lists calculations to run in one go:
//!
//! ```toml
//! [batch]
//! name = "Cohort study"
//!
//! [[calculations]]
//! name = "smoking"
//! calculator = "odds-ratio"
//! a = 70
//! b = 30
//! c = 40
//! d = 60
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::calculators::{self, CalculatorInput, InputDefaults};
use crate::rcode;
use crate::report::{BatchEntry, BatchReport};
use crate::validation::validate;

/// Intermediate TOML structure for parsing batch files.
#[derive(Debug, Deserialize)]
struct TomlBatchFile {
    #[serde(default)]
    batch: Option<TomlBatchHeader>,
    #[serde(default)]
    calculations: Vec<TomlCalculation>,
}

#[derive(Debug, Deserialize)]
struct TomlBatchHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCalculation {
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    input: CalculatorInput,
}

/// A parsed batch of calculations.
#[derive(Debug, Clone)]
pub struct Batch {
    pub name: String,
    pub description: String,
    pub calculations: Vec<Calculation>,
}

/// One calculation in a batch.
#[derive(Debug, Clone)]
pub struct Calculation {
    /// Optional label for reports.
    pub name: Option<String>,
    pub input: CalculatorInput,
}

impl Calculation {
    /// The label, falling back to the calculator id and position.
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{} {}", index + 1, self.input.id()))
    }
}

/// Options applied when running a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub defaults: InputDefaults,
    /// Attach an R snippet to every result.
    pub include_r_code: bool,
}

/// Parse a single TOML batch file.
pub fn parse_batch(path: &Path) -> Result<Batch> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file: {}", path.display()))?;

    parse_batch_str(&content, path)
}

/// Parse a TOML string into a `Batch` (useful for testing).
pub fn parse_batch_str(content: &str, source_path: &Path) -> Result<Batch> {
    let parsed: TomlBatchFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let (name, description) = match parsed.batch {
        Some(header) => (header.name, header.description),
        None => (
            source_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "batch".to_string()),
            String::new(),
        ),
    };

    let calculations = parsed
        .calculations
        .into_iter()
        .map(|c| Calculation {
            name: c.name,
            input: c.input,
        })
        .collect();

    Ok(Batch {
        name,
        description,
        calculations,
    })
}

/// A batch file that could not be parsed.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    /// The full error chain.
    pub message: String,
}

/// Everything found under a batch directory.
#[derive(Debug, Clone, Default)]
pub struct BatchDirectory {
    pub batches: Vec<Batch>,
    pub failures: Vec<LoadFailure>,
}

/// Recursively parse all `.toml` batch files from a directory, keeping the
/// files that fail to parse alongside the ones that succeed.
pub fn scan_batch_directory(dir: &Path) -> Result<BatchDirectory> {
    let mut found = BatchDirectory::default();
    scan_into(dir, &mut found)?;
    Ok(found)
}

fn scan_into(dir: &Path, found: &mut BatchDirectory) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            scan_into(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_batch(&path) {
                Ok(batch) => found.batches.push(batch),
                Err(e) => found.failures.push(LoadFailure {
                    message: format!("{e:#}"),
                    path,
                }),
            }
        }
    }

    Ok(())
}

/// Recursively load all `.toml` batch files from a directory. Files that
/// fail to parse are logged and skipped.
pub fn load_batch_directory(dir: &Path) -> Result<Vec<Batch>> {
    let found = scan_batch_directory(dir)?;
    for failure in &found.failures {
        tracing::warn!("skipping {}: {}", failure.path.display(), failure.message);
    }
    Ok(found.batches)
}

/// A problem found while checking a batch.
#[derive(Debug, Clone)]
pub struct BatchWarning {
    /// Label of the calculation (if applicable).
    pub calculation: Option<String>,
    pub message: String,
}

/// Check a batch for invalid inputs and duplicate names.
pub fn validate_batch(batch: &Batch) -> Vec<BatchWarning> {
    let mut warnings = Vec::new();

    if batch.calculations.is_empty() {
        warnings.push(BatchWarning {
            calculation: None,
            message: "batch has no calculations".into(),
        });
    }

    let mut seen_names = HashSet::new();
    for calc in &batch.calculations {
        if let Some(name) = &calc.name {
            if !seen_names.insert(name) {
                warnings.push(BatchWarning {
                    calculation: Some(name.clone()),
                    message: format!("duplicate calculation name: {name}"),
                });
            }
        }
    }

    for (i, calc) in batch.calculations.iter().enumerate() {
        if let Err(e) = validate(&calc.input) {
            for field in e.errors {
                warnings.push(BatchWarning {
                    calculation: Some(calc.label(i)),
                    message: format!("{}: {}", field.field, field.message),
                });
            }
        }
    }

    warnings
}

/// Run every calculation in `batch`. Invalid entries are recorded with
/// their field errors and do not stop the rest of the batch.
pub fn run_batch(batch: &Batch, options: &RunOptions) -> BatchReport {
    let entries = batch
        .calculations
        .iter()
        .enumerate()
        .map(|(i, calc)| {
            let input = calc.input.with_defaults(&options.defaults);
            match calculators::run(&input) {
                Ok(result) => {
                    let result = if options.include_r_code {
                        result.with_r_code(rcode::generate(&input))
                    } else {
                        result
                    };
                    BatchEntry {
                        name: calc.name.clone(),
                        calculator: input.id(),
                        input,
                        result: Some(result),
                        errors: Vec::new(),
                    }
                }
                Err(e) => {
                    tracing::warn!("calculation {} rejected: {}", calc.label(i), e);
                    BatchEntry {
                        name: calc.name.clone(),
                        calculator: input.id(),
                        input,
                        result: None,
                        errors: e.field_errors().to_vec(),
                    }
                }
            }
        })
        .collect();

    BatchReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        name: batch.name.clone(),
        description: batch.description.clone(),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::registry::CalculatorId;

    const VALID_TOML: &str = r#"
[batch]
name = "Cohort study"
description = "Smoking and lung disease"

[[calculations]]
name = "chi"
calculator = "chi-square"
a = 10
b = 20
c = 30
d = 40
yates = true

[[calculations]]
name = "smoking"
calculator = "odds-ratio"
a = 70
b = 30
c = 40
d = 60
confidence = 99

[[calculations]]
calculator = "epi-2x2"
a = 0
b = 10
c = 5
d = 5
"#;

    #[test]
    fn parse_valid_toml() {
        let batch = parse_batch_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(batch.name, "Cohort study");
        assert_eq!(batch.calculations.len(), 3);
        assert_eq!(batch.calculations[0].input.id(), CalculatorId::ChiSquare);
        assert_eq!(batch.calculations[1].input.confidence(), Some(99.0));
        assert_eq!(batch.calculations[2].name, None);
        assert_eq!(batch.calculations[2].label(2), "#3 epi-2x2");
    }

    #[test]
    fn missing_header_uses_file_stem() {
        let toml = r#"
[[calculations]]
calculator = "rr"
a = 45
b = 55
c = 20
d = 80
"#;
        // "rr" is not a serde tag; only canonical ids are accepted in files
        assert!(parse_batch_str(toml, &PathBuf::from("cohort.toml")).is_err());

        let toml = toml.replace("\"rr\"", "\"risk-ratio\"");
        let batch = parse_batch_str(&toml, &PathBuf::from("cohort.toml")).unwrap();
        assert_eq!(batch.name, "cohort");
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_batch_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_reports_fields_and_duplicates() {
        let toml = r#"
[batch]
name = "Bad"

[[calculations]]
name = "x"
calculator = "odds-ratio"
a = -1
b = 2
c = 3
d = 4
confidence = 120

[[calculations]]
name = "x"
calculator = "chi-square"
a = 1
b = 2
c = 3
d = 4
"#;
        let batch = parse_batch_str(toml, &PathBuf::from("bad.toml")).unwrap();
        let warnings = validate_batch(&batch);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.starts_with("a:")));
        assert!(warnings.iter().any(|w| w.message.starts_with("confidence:")));
    }

    #[test]
    fn run_batch_keeps_going_after_invalid_entry() {
        let toml = r#"
[batch]
name = "Mixed"

[[calculations]]
calculator = "risk-ratio"
a = -5
b = 55
c = 20
d = 80

[[calculations]]
calculator = "risk-ratio"
a = 45
b = 55
c = 20
d = 80
"#;
        let batch = parse_batch_str(toml, &PathBuf::from("mixed.toml")).unwrap();
        let report = run_batch(&batch, &RunOptions::default());
        assert_eq!(report.entries.len(), 2);
        assert!(report.entries[0].result.is_none());
        assert_eq!(report.entries[0].errors[0].field, "a");
        let ok = report.entries[1].result.as_ref().unwrap();
        assert_eq!(ok.entry("Risk ratio").unwrap().value.to_string(), "2.2500");
        assert_eq!(report.failed(), 1);
        assert_eq!(report.succeeded(), 1);
    }

    #[test]
    fn run_batch_applies_defaults_and_r_code() {
        let batch = parse_batch_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let options = RunOptions {
            defaults: InputDefaults {
                confidence: 90.0,
                yates: false,
            },
            include_r_code: true,
        };
        let report = run_batch(&batch, &options);
        // Explicit confidence wins over the default
        assert_eq!(report.entries[1].input.confidence(), Some(99.0));
        assert_eq!(report.entries[2].input.confidence(), Some(90.0));
        assert!(report.entries.iter().all(|e| e
            .result
            .as_ref()
            .is_some_and(|r| r.r_code.is_some())));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("study.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let batches = load_batch_directory(dir.path()).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name, "Cohort study");
    }

    #[test]
    fn scan_directory_keeps_parse_failures() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("study.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/broken.toml"), "calculator = [oops").unwrap();

        let found = scan_batch_directory(dir.path()).unwrap();
        assert_eq!(found.batches.len(), 1);
        assert_eq!(found.failures.len(), 1);
        assert!(found.failures[0].path.ends_with("nested/broken.toml"));
        assert!(found.failures[0].message.contains("failed to parse TOML"));
    }
}
