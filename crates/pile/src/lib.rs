//! Pile: tabular records over delimited text with flexible column addressing.
//!
//! A [`List`] is a sequence of [`Record`]s sharing one [`Header`]. Any field
//! can be addressed by position, by column name, or by an alias configured
//! in an [`AliasMap`], ignoring case by default.
//!
//! Files can also be transformed record by record in a single pass with
//! [`transform::map_csv_file`]; the output header is taken from the first
//! transformed record, so a transform may rename or reorder columns.
//!
//! # Example
//!
//! ```
//! use pile::{AliasMap, transform::map_csv_contents};
//!
//! let input = "ID,Name,Address Line\n1,Alice,123 1st St\n2,Bob,234 2nd St\n";
//! let aliases = AliasMap::new().with("Address Line", ["address"]);
//!
//! let output = map_csv_contents(input, &aliases, |_, mut record| {
//!     let id = record.get("id")?.as_integer().unwrap_or_default();
//!     record.set("id", id + 1)?;
//!     Ok(record)
//! })
//! .unwrap();
//!
//! assert_eq!(output, "ID,Name,Address Line\n2,Alice,123 1st St\n3,Bob,234 2nd St\n");
//! ```

pub mod error;
pub mod input;
pub mod schema;
pub mod table;
pub mod transform;

mod pile;

pub use crate::pile::{Pile, PileConfig};
pub use error::{PileError, Result};
pub use input::{ParserConfig, RowReader, RowSink, RowWriter};
pub use schema::{AliasList, AliasMap, ColumnRef, Header, HeaderRef, Value};
pub use table::{List, Record, SinkRef};
