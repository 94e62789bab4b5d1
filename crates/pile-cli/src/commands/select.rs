//! Select command - keep only some columns while streaming a file.

use std::path::PathBuf;

use pile::transform::SelectColumns;

use crate::cli::GlobalOptions;

pub fn run(
    file: PathBuf,
    columns: Vec<String>,
    output: Option<PathBuf>,
    options: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let columns: Vec<String> = columns
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if columns.is_empty() {
        return Err("No columns given to select".into());
    }

    super::stream(&file, output, options, SelectColumns::new(columns).into_fn())
}
