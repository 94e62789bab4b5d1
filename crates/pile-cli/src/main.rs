//! Pile CLI - read and transform CSV files by column name or alias.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.options.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let options = cli.options;
    let result = match cli.command {
        Commands::Show { file, json } => commands::show::run(file, json, &options),

        Commands::Get { file, column } => commands::get::run(file, column, &options),

        Commands::Rename {
            file,
            columns,
            output,
        } => commands::rename::run(file, columns, output, &options),

        Commands::Select {
            file,
            columns,
            output,
        } => commands::select::run(file, columns, output, &options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
