//! Show command - print a file as a table.

use std::path::PathBuf;

use colored::Colorize;
use pile::{List, Pile};

use crate::cli::GlobalOptions;

use super::{ensure_exists, load_config};

pub fn run(
    file: PathBuf,
    json_output: bool,
    options: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let list = Pile::with_config(load_config(options)?).read_file(&file)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&list.render_rows())?);
        return Ok(());
    }

    print_table(&list);
    println!();
    println!(
        "{} records, {} columns",
        list.len().to_string().white().bold(),
        list.header().len().to_string().white().bold()
    );

    Ok(())
}

fn print_table(list: &List) {
    let rows: Vec<Vec<String>> = list
        .render_rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for (i, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");

        if i == 0 {
            println!("{}", line.cyan().bold());
        } else {
            println!("{}", line);
        }
    }
}
