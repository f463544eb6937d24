//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use epistat_core::report::{BatchEntry, BatchReport};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a batch report.
pub fn generate_html(report: &BatchReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>epistat report — {}</title>\n",
        html_escape(&report.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.name)));
    if !report.description.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", html_escape(&report.description)));
    }
    html.push_str(&format!(
        "<p class=\"meta\">{} calculations | {} succeeded | {} rejected | {}</p>\n",
        report.entries.len(),
        report.succeeded(),
        report.failed(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary table
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Calculation</th><th>Calculator</th><th>Table (a, b, c, d)</th><th>Headline</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for entry in &report.entries {
        let t = entry.input.table();
        let (class, headline) = match &entry.result {
            Some(result) if result.is_empty() => ("fail", "no result".to_string()),
            Some(result) => (
                "pass",
                result
                    .main_entries()
                    .map(|e| format!("{}: {}", e.label, e.value))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            None => ("fail", "rejected".to_string()),
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}, {}, {}, {}</td><td>{}</td></tr>\n",
            class,
            html_escape(entry.label()),
            entry.calculator,
            t.a,
            t.b,
            t.c,
            t.d,
            html_escape(&headline),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-entry details
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    for entry in &report.entries {
        html.push_str(&entry_section(entry));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

fn entry_section(entry: &BatchEntry) -> String {
    let mut html = String::new();
    html.push_str("<article>\n");
    html.push_str(&format!(
        "<h3>{} <span class=\"meta\">({})</span></h3>\n",
        html_escape(entry.label()),
        entry.calculator
    ));

    match &entry.result {
        Some(result) => {
            if !result.results.is_empty() {
                html.push_str("<table>\n<tbody>\n");
                for e in &result.results {
                    let class = if e.is_main { " class=\"main\"" } else { "" };
                    html.push_str(&format!(
                        "<tr{}><td>{}</td><td>{}</td></tr>\n",
                        class,
                        html_escape(&e.label),
                        html_escape(&e.value.to_string())
                    ));
                }
                html.push_str("</tbody></table>\n");
            }
            html.push_str(&format!(
                "<p class=\"interpretation\">{}</p>\n",
                html_escape(&result.interpretation)
            ));
            if let Some(formula) = &result.formula {
                html.push_str(&format!(
                    "<p class=\"formula\"><code>{}</code></p>\n",
                    html_escape(formula)
                ));
            }
            if let Some(code) = &result.r_code {
                html.push_str("<details>\n<summary>R code</summary>\n<pre><code>");
                html.push_str(&html_escape(code));
                html.push_str("</code></pre>\n</details>\n");
            }
        }
        None => {
            html.push_str("<ul class=\"errors\">\n");
            for err in &entry.errors {
                html.push_str(&format!(
                    "<li><strong>{}</strong>: {}</li>\n",
                    html_escape(&err.field),
                    html_escape(&err.message)
                ));
            }
            html.push_str("</ul>\n");
        }
    }

    html.push_str("</article>\n");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &BatchReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; font-weight: normal; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
tr.main td { font-weight: bold; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.interpretation { font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
article { margin-bottom: 2rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use epistat_core::calculators::{self, CalculatorInput};
    use epistat_core::registry::CalculatorId;
    use epistat_core::table::ContingencyTable;
    use epistat_core::validation::FieldError;

    fn make_test_report() -> BatchReport {
        let ok = CalculatorInput::from_table(
            CalculatorId::OddsRatio,
            ContingencyTable::new(70.0, 30.0, 40.0, 60.0),
            None,
            Some(95.0),
        );
        let bad = CalculatorInput::from_table(
            CalculatorId::RiskRatio,
            ContingencyTable::new(-1.0, 30.0, 40.0, 60.0),
            None,
            Some(95.0),
        );
        BatchReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            name: "Smoking <cohort>".into(),
            description: "Test batch".into(),
            entries: vec![
                BatchEntry {
                    name: Some("smoking".into()),
                    calculator: ok.id(),
                    input: ok,
                    result: Some(calculators::compute(&ok).with_r_code("or <- 1".into())),
                    errors: vec![],
                },
                BatchEntry {
                    name: None,
                    calculator: bad.id(),
                    input: bad,
                    result: None,
                    errors: vec![FieldError {
                        field: "a".into(),
                        message: "must be at least 0 (got -1)".into(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("smoking"));
        assert!(html.contains("Odds ratio: 3.5000"));
        assert!(html.contains("tr class=\"main\""));
        assert!(html.contains("R code"));
        assert!(html.contains("must be at least 0"));
        assert!(html.contains("1 succeeded | 1 rejected"));
    }

    #[test]
    fn html_report_escapes_names() {
        let html = generate_html(&make_test_report());
        assert!(html.contains("Smoking &lt;cohort&gt;"));
        assert!(!html.contains("<cohort>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
