//! Streaming transformation of delimited files.

pub mod operations;
pub mod stream;

pub use operations::{RenameColumns, SelectColumns};
pub use stream::{map_csv, map_csv_contents, map_csv_file};
