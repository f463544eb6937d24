//! Markdown report generator.

use anyhow::Result;
use std::path::Path;

use epistat_core::report::BatchReport;

/// Escape pipe characters so values don't break table cells.
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Generate a Markdown report from a batch report.
pub fn generate_markdown(report: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.name));
    if !report.description.is_empty() {
        md.push_str(&format!("{}\n\n", report.description));
    }
    md.push_str(&format!(
        "_{} calculations, {} succeeded, {} rejected. Generated {}._\n\n",
        report.entries.len(),
        report.succeeded(),
        report.failed(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ));

    for entry in &report.entries {
        let t = entry.input.table();
        md.push_str(&format!(
            "## {} (`{}`)\n\n",
            entry.label(),
            entry.calculator
        ));
        md.push_str(&format!(
            "Table: a = {}, b = {}, c = {}, d = {}\n\n",
            t.a, t.b, t.c, t.d
        ));

        let Some(result) = &entry.result else {
            md.push_str("**Rejected:**\n\n");
            for err in &entry.errors {
                md.push_str(&format!("- `{}`: {}\n", err.field, err.message));
            }
            md.push('\n');
            continue;
        };

        if !result.results.is_empty() {
            md.push_str("| Statistic | Value |\n|---|---|\n");
            for e in &result.results {
                let value = cell(&e.value.to_string());
                if e.is_main {
                    md.push_str(&format!("| **{}** | **{}** |\n", cell(&e.label), value));
                } else {
                    md.push_str(&format!("| {} | {} |\n", cell(&e.label), value));
                }
            }
            md.push('\n');
        }

        md.push_str(&format!("{}\n\n", result.interpretation));
        if let Some(formula) = &result.formula {
            md.push_str(&format!("Formula: `{formula}`\n\n"));
        }
        if let Some(code) = &result.r_code {
            md.push_str(&format!("```r\n{}\n```\n\n", code.trim_end()));
        }
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &BatchReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)?;
    Ok(())
}
