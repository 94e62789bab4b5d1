//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pile: read and transform CSV files by column name or alias
#[derive(Parser)]
#[command(name = "pile")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: GlobalOptions,
}

/// Options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct GlobalOptions {
    /// JSON file mapping column names to aliases
    #[arg(short, long, global = true, value_name = "FILE")]
    pub aliases: Option<PathBuf>,

    /// Match column names and aliases case sensitively
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Field delimiter
    #[arg(short, long, global = true, default_value = ",")]
    pub delimiter: char,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a file as a table
    Show {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON rows
        #[arg(long)]
        json: bool,
    },

    /// Print the values of one column
    Get {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column name, alias, or position
        #[arg(value_name = "COLUMN")]
        column: String,
    },

    /// Rename columns, streaming the file
    Rename {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Rename as OLD=NEW; OLD may be a name or alias
        #[arg(short, long = "column", value_name = "OLD=NEW", required = true)]
        columns: Vec<Rename>,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep only the given columns, in order, streaming the file
    Select {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Comma-separated column names or aliases
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// A single `OLD=NEW` rename.
#[derive(Clone, Debug)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl std::str::FromStr for Rename {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(Rename {
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(format!("Invalid rename: {}. Use OLD=NEW.", s)),
        }
    }
}
