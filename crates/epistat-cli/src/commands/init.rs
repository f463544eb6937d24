//! The `epistat init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("epistat.toml").exists() {
        println!("epistat.toml already exists, skipping.");
    } else {
        std::fs::write("epistat.toml", SAMPLE_CONFIG)?;
        println!("Created epistat.toml");
    }

    std::fs::create_dir_all("batches")?;
    let example_path = std::path::Path::new("batches/example.toml");
    if example_path.exists() {
        println!("batches/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BATCH)?;
        println!("Created batches/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit batches/example.toml with your own tables");
    println!("  2. Run: epistat validate --input batches/example.toml");
    println!("  3. Run: epistat batch --input batches/example.toml --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# epistat configuration

default_confidence = 95.0
yates = true
format = "text"
include_r_code = false
output_dir = "./epistat-results"
"#;

const EXAMPLE_BATCH: &str = r#"[batch]
name = "Example"
description = "Smoking and lung disease in a small cohort"

[[calculations]]
name = "association"
calculator = "chi-square"
a = 10
b = 20
c = 30
d = 40
yates = true

[[calculations]]
name = "smoking-or"
calculator = "odds-ratio"
a = 70
b = 30
c = 40
d = 60

[[calculations]]
name = "smoking-rr"
calculator = "risk-ratio"
a = 45
b = 55
c = 20
d = 80
confidence = 99

[[calculations]]
name = "toolkit"
calculator = "epi-2x2"
a = 0
b = 10
c = 5
d = 5
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn example_batch_is_valid() {
        let batch =
            epistat_core::batch::parse_batch_str(EXAMPLE_BATCH, Path::new("example.toml")).unwrap();
        assert_eq!(batch.calculations.len(), 4);
        assert!(epistat_core::batch::validate_batch(&batch).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: crate::config::EpistatConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.default_confidence, 95.0);
    }
}
