//! The `epistat run` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Attribute, Cell, Table};

use epistat_core::calculators::{self, CalculatorInput};
use epistat_core::rcode;
use epistat_core::registry::CalculatorId;
use epistat_core::results::CalculationResult;
use epistat_core::table::ContingencyTable;

use crate::config::load_config_from;

/// Parsed `run` arguments.
pub struct RunArgs {
    pub calculator: String,
    pub table: ContingencyTable,
    pub yates: Option<bool>,
    pub confidence: Option<f64>,
    pub format: Option<String>,
    pub r_code: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let id: CalculatorId = args.calculator.parse()?;

    let input = CalculatorInput::from_table(id, args.table, args.yates, args.confidence)
        .with_defaults(&config.input_defaults());
    let mut result = calculators::run(&input)?;
    if args.r_code || config.include_r_code {
        result = result.with_r_code(rcode::generate(&input));
    }

    let format = args.format.unwrap_or(config.format);
    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => print_text(id, &result),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_text(id: CalculatorId, result: &CalculationResult) {
    println!("{}", id.descriptor().title);

    if !result.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Statistic", "Value"]);
        for entry in &result.results {
            let (label, value) = (Cell::new(&entry.label), Cell::new(&entry.value));
            if entry.is_main {
                table.add_row(vec![
                    label.add_attribute(Attribute::Bold),
                    value.add_attribute(Attribute::Bold),
                ]);
            } else {
                table.add_row(vec![label, value]);
            }
        }
        println!("{table}");
    }

    println!();
    println!("{}", result.interpretation);
    if let Some(formula) = &result.formula {
        println!("\nFormula: {formula}");
    }
    if let Some(code) = &result.r_code {
        println!("\nR code:\n{code}");
    }
}
