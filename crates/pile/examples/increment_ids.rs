//! Example: increment the id column of a CSV file.
//!
//! Usage:
//!   cargo run --example increment_ids -- <input.csv> <output.csv>

use std::env;

use pile::transform::map_csv_file;
use pile::AliasMap;

fn main() -> pile::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example increment_ids -- <input.csv> <output.csv>");
        std::process::exit(1);
    }

    let aliases = AliasMap::new().with("ID", ["identity", "#"]);

    map_csv_file(&args[1], &args[2], &aliases, |_, mut record| {
        if let Some(id) = record.get("id")?.as_integer() {
            record.set("id", id + 1)?;
        }
        Ok(record)
    })?;

    println!("Wrote {}", args[2]);
    Ok(())
}
