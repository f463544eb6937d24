//! The `epistat validate` command.

use std::path::PathBuf;

use anyhow::Result;

use epistat_core::batch::{self, BatchDirectory};

pub fn execute(input: PathBuf) -> Result<()> {
    let found = if input.is_dir() {
        batch::scan_batch_directory(&input)?
    } else {
        BatchDirectory {
            batches: vec![batch::parse_batch(&input)?],
            failures: Vec::new(),
        }
    };

    let mut total_warnings = 0;

    for b in &found.batches {
        println!("Batch: {} ({} calculations)", b.name, b.calculations.len());

        let warnings = batch::validate_batch(b);
        for w in &warnings {
            let prefix = w
                .calculation
                .as_ref()
                .map(|label| format!("  [{label}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    for failure in &found.failures {
        println!("{}: ERROR: {}", failure.path.display(), failure.message);
    }

    anyhow::ensure!(
        found.failures.is_empty(),
        "{} batch file(s) could not be parsed",
        found.failures.len()
    );

    if total_warnings == 0 {
        println!("All batches valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
