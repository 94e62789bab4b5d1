//! Delimited text tokenizing and serialization.
//!
//! Thin layer over the `csv` crate: rows come in as strings or
//! [`Value`](crate::Value)s and go out as rows of strings.

mod parser;
mod writer;

pub use parser::{parse_field, parse_line, ParserConfig, RowReader};
pub use writer::{RowSink, RowWriter};
