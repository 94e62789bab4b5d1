//! Get command - print the values of one column.

use std::path::PathBuf;

use colored::Colorize;
use pile::{ColumnRef, Pile};

use crate::cli::GlobalOptions;

use super::{ensure_exists, load_config};

pub fn run(
    file: PathBuf,
    column: String,
    options: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let list = Pile::with_config(load_config(options)?).read_file(&file)?;

    let reference = match column.parse::<usize>() {
        Ok(position) => ColumnRef::Position(position),
        Err(_) => ColumnRef::Name(&column),
    };

    let Some(position) = list.header().resolve(reference) else {
        return Err(format!("No column named '{}'", column).into());
    };

    if options.verbose {
        let name = list
            .header()
            .borrow()
            .names()
            .get(position)
            .cloned()
            .unwrap_or_default();
        eprintln!(
            "{} '{}' -> column {} ({})",
            "Resolved".cyan().bold(),
            column,
            position,
            name.white()
        );
    }

    for record in &list {
        println!("{}", record.get(reference)?);
    }

    Ok(())
}
