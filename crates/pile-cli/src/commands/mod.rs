//! CLI command implementations.

pub mod get;
pub mod rename;
pub mod select;
pub mod show;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use colored::Colorize;
use pile::{AliasMap, HeaderRef, ParserConfig, Pile, PileConfig, Record};

use crate::cli::GlobalOptions;

/// Build the library configuration from command-line options.
pub fn load_config(options: &GlobalOptions) -> Result<PileConfig, Box<dyn std::error::Error>> {
    if !options.delimiter.is_ascii() {
        return Err(format!("Delimiter must be a single ASCII character: {:?}", options.delimiter).into());
    }

    let aliases = match &options.aliases {
        Some(path) => {
            log::debug!("Loading aliases from '{}'", path.display());
            AliasMap::load(path)?
        }
        None => AliasMap::new(),
    };

    Ok(PileConfig {
        parser: ParserConfig::with_delimiter(options.delimiter as u8),
        aliases,
        case_sensitive: options.case_sensitive,
    })
}

fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }
    Ok(())
}

/// Stream `file` through `f` into `output`, or stdout when absent.
pub fn stream<F>(
    file: &Path,
    output: Option<PathBuf>,
    options: &GlobalOptions,
    f: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnMut(&HeaderRef, Record) -> pile::Result<Record>,
{
    ensure_exists(file)?;
    let pile = Pile::with_config(load_config(options)?);

    match output {
        Some(output) => {
            pile.map_file(file, &output, f)?;
            if options.verbose {
                eprintln!(
                    "{} {}",
                    "Wrote".green().bold(),
                    output.display().to_string().cyan()
                );
            }
        }
        None => {
            let reader = BufReader::new(File::open(file)?);
            pile.map_stream(reader, io::stdout().lock(), f)?;
        }
    }

    Ok(())
}
