//! Records and lists of records sharing a header.

mod list;
mod record;

pub use list::List;
pub use record::{Record, SinkRef};
