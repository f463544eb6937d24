//! The `epistat batch` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use epistat_core::batch;
use epistat_core::report::BatchReport;
use epistat_report::html::write_html_report;
use epistat_report::markdown::write_markdown_report;

use crate::config::load_config_from;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let batches = if input.is_dir() {
        batch::load_batch_directory(&input)?
    } else {
        vec![batch::parse_batch(&input)?]
    };

    let formats = parse_formats(&format)?;

    let options = config.run_options();
    for b in &batches {
        eprintln!("Running batch {} ({} calculations)", b.name, b.calculations.len());
        let report = batch::run_batch(b, &options);
        print_summary(&report);

        std::fs::create_dir_all(&output)?;
        let stem = report_stem(&report);

        for fmt in &formats {
            match fmt {
                ReportFormat::Json => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                ReportFormat::Html => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                ReportFormat::Markdown => {
                    let path = output.join(format!("{stem}.md"));
                    write_markdown_report(&report, &path)?;
                    eprintln!("Markdown report: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ReportFormat {
    Json,
    Html,
    Markdown,
}

fn parse_formats(format: &str) -> Result<Vec<ReportFormat>> {
    if format == "all" {
        return Ok(vec![
            ReportFormat::Json,
            ReportFormat::Html,
            ReportFormat::Markdown,
        ]);
    }
    format
        .split(',')
        .map(|f| match f.trim() {
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => anyhow::bail!("unknown format: {other} (expected json, html, markdown or all)"),
        })
        .collect()
}

fn print_summary(report: &BatchReport) {
    let mut table = Table::new();
    table.set_header(vec!["Calculation", "Calculator", "Headline", "Status"]);

    for entry in &report.entries {
        let (headline, status) = match &entry.result {
            Some(result) => (
                result
                    .main_entries()
                    .take(2)
                    .map(|e| format!("{} = {}", e.label, e.value))
                    .collect::<Vec<_>>()
                    .join(", "),
                if result.is_empty() { "no result" } else { "ok" },
            ),
            None => (
                entry
                    .errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; "),
                "rejected",
            ),
        };
        table.add_row(vec![
            Cell::new(entry.label()),
            Cell::new(entry.calculator),
            Cell::new(headline),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    println!(
        "{} succeeded, {} rejected",
        report.succeeded(),
        report.failed()
    );
}

/// `{slug}-{timestamp}-{short id}`, unique per report even when batch
/// names and timestamps collide.
fn report_stem(report: &BatchReport) -> String {
    let id = report.id.simple().to_string();
    format!(
        "{}-{}-{}",
        slug(&report.name),
        report.created_at.format("%Y-%m-%dT%H%M%S"),
        &id[..8]
    )
}

/// File-name-safe form of a batch name.
fn slug(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "batch".to_string()
    } else {
        slug
    }
}
