//! The `epistat list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use epistat_core::registry::{self, CalculatorDescriptor, Category};

pub fn execute(category: Option<String>, search: Option<String>) -> Result<()> {
    let mut descriptors: Vec<&CalculatorDescriptor> = match &category {
        Some(c) => {
            let category: Category = c.parse().map_err(anyhow::Error::msg)?;
            registry::by_category(category).collect()
        }
        None => registry::all().iter().collect(),
    };

    if let Some(query) = &search {
        descriptors.retain(|d| d.matches(query));
    }

    if descriptors.is_empty() {
        println!("No calculators match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Category", "Description"]);
    for d in &descriptors {
        table.add_row(vec![
            Cell::new(d.id),
            Cell::new(d.title),
            Cell::new(d.category),
            Cell::new(d.description),
        ]);
    }
    println!("{table}");

    Ok(())
}
