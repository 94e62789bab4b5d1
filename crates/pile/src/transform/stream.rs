//! Single-pass record mapping from one delimited source to another.
//!
//! The header row is read first, then each record is mapped by a caller
//! callback and written out immediately. The header itself is written only
//! when the first mapped record is ready, using that record's header, so a
//! callback that renames or reorders columns is reflected in the output.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{PileError, Result};
use crate::input::{RowReader, RowSink, RowWriter};
use crate::pile::PileConfig;
use crate::schema::{AliasMap, HeaderRef};
use crate::table::Record;

/// Map records read from `rows` and write them to `sink`.
fn map_rows<R, F>(
    rows: &mut RowReader<R>,
    sink: &mut dyn RowSink,
    config: &PileConfig,
    f: &mut F,
) -> Result<usize>
where
    R: Read,
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    let Some(names) = rows.next_fields()? else {
        debug!("Empty input; nothing written");
        return Ok(0);
    };
    let header = config.header(names);

    let mut written_header: Option<HeaderRef> = None;
    let mut warned = false;
    let mut count = 0;

    while let Some(values) = rows.next_values()? {
        let record = f(&header, Record::new(header.clone(), values))?;

        match &written_header {
            None => {
                if !record.header().ptr_eq(&header) {
                    debug!("Header replaced by transform: {:?}", record.column_names());
                }
                record.write_header(Some(&mut *sink))?;
                written_header = Some(record.header().clone());
            }
            Some(written) => {
                if !warned && !record.header().ptr_eq(written) && record.header() != written {
                    warn!(
                        "Record at line {} has header {:?}, differing from written header {:?}",
                        rows.line(),
                        record.column_names(),
                        written.names()
                    );
                    warned = true;
                }
            }
        }

        record.write_record(Some(&mut *sink))?;
        count += 1;
    }

    // No records: the original header is still written once.
    if written_header.is_none() {
        header.borrow().write_header(sink)?;
    }

    debug!("Mapped {} records", count);
    Ok(count)
}

/// Map records from `reader` into `writer`, returning the number of
/// records written.
///
/// `f` receives the header read from the input and a record bound to it, and
/// returns the record to write. Errors from `f` stop the pass; whatever was
/// written before stays written.
pub fn map_csv<R, W, F>(reader: R, writer: W, config: &PileConfig, mut f: F) -> Result<usize>
where
    R: Read,
    W: Write,
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    let mut rows = RowReader::new(reader, &config.parser);
    let mut sink = RowWriter::new(writer, &config.parser);

    // Rows mapped before a failure stay in the output.
    let mapped = map_rows(&mut rows, &mut sink, config, &mut f);
    sink.flush()?;
    let count = mapped?;

    Ok(count)
}

/// Map the file at `from` into the file at `to`, which must be a different
/// file.
///
/// # Example
///
/// ```no_run
/// use pile::{AliasMap, transform::map_csv_file};
///
/// map_csv_file("people.csv", "people.out.csv", &AliasMap::new(), |_, mut record| {
///     record.set("name", "redacted")?;
///     Ok(record)
/// })
/// .unwrap();
/// ```
pub fn map_csv_file<F>(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    aliases: &AliasMap,
    f: F,
) -> Result<()>
where
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    map_csv_file_with(from, to, &PileConfig::with_aliases(aliases.clone()), f)
}

/// [`map_csv_file`] with full configuration.
pub fn map_csv_file_with<F>(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    config: &PileConfig,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    let from = from.as_ref();
    let to = to.as_ref();

    ensure_distinct(from, to)?;
    info!("Mapping '{}' -> '{}'", from.display(), to.display());

    let mut rows = RowReader::from_path(from, &config.parser)?;
    let mut sink = RowWriter::from_path(to, &config.parser)?;

    // Rows mapped before a failure stay in the output.
    let mapped = map_rows(&mut rows, &mut sink, config, &mut f);
    sink.flush()?;
    let count = mapped?;

    info!("Wrote {} records to '{}'", count, to.display());
    Ok(())
}

/// Map delimited text, returning the output text.
pub fn map_csv_contents<F>(contents: &str, aliases: &AliasMap, f: F) -> Result<String>
where
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    map_csv_contents_with(contents, &PileConfig::with_aliases(aliases.clone()), f)
}

/// [`map_csv_contents`] with full configuration.
pub fn map_csv_contents_with<F>(contents: &str, config: &PileConfig, mut f: F) -> Result<String>
where
    F: FnMut(&HeaderRef, Record) -> Result<Record>,
{
    let mut rows = RowReader::new(contents.as_bytes(), &config.parser);
    let mut sink = RowWriter::in_memory(&config.parser);

    map_rows(&mut rows, &mut sink, config, &mut f)?;
    sink.into_string()
}

/// Fail if both paths name the same existing file, including hard links and
/// other aliases of one file on disk.
fn ensure_distinct(from: &Path, to: &Path) -> Result<()> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PileError::Io { path, source }
    };

    fs::metadata(from).map_err(io_error(from))?;

    // An output that doesn't exist yet can't be the input.
    if !to.exists() {
        return Ok(());
    }

    if same_file::is_same_file(from, to).map_err(io_error(to))? {
        return Err(PileError::SameFile(to.to_path_buf()));
    }

    Ok(())
}
