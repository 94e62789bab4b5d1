//! Rename command - rename columns while streaming a file.

use std::path::PathBuf;

use pile::transform::RenameColumns;

use crate::cli::{GlobalOptions, Rename};

pub fn run(
    file: PathBuf,
    columns: Vec<Rename>,
    output: Option<PathBuf>,
    options: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let rename = RenameColumns::new(columns.into_iter().map(|r| (r.from, r.to)));
    super::stream(&file, output, options, rename.into_fn())
}
