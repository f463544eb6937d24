//! The `epistat describe` command.

use anyhow::Result;

use epistat_core::registry::CalculatorId;

pub fn execute(id: String) -> Result<()> {
    let id: CalculatorId = id.parse()?;
    let d = id.descriptor();

    println!("{} ({})", d.title, d.id);
    println!("Category: {}", d.category);
    println!();
    println!("{}", d.description);
    println!();
    println!("Formula:  {}", d.formula);
    println!("Keywords: {}", d.keywords.join(", "));

    Ok(())
}
