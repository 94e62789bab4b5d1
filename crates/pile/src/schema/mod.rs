//! Column naming: headers, aliases, values and column references.

mod aliases;
mod header;
mod types;

pub use aliases::{AliasList, AliasMap};
pub use header::{Header, HeaderRef};
pub use types::{ColumnRef, Value};
