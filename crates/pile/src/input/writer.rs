//! CSV writer and the sink abstraction records and headers write into.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PileError, Result};

use super::ParserConfig;

/// Destination for rows of output fields.
pub trait RowSink {
    /// Write one row.
    fn write_row(&mut self, fields: &[String]) -> Result<()>;
}

/// Writes rows of fields as delimited text.
pub struct RowWriter<W: Write> {
    inner: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> RowWriter<W> {
    /// Wrap any writer.
    pub fn new(writer: W, config: &ParserConfig) -> Self {
        Self {
            inner: config.writer_builder().from_writer(writer),
            rows_written: 0,
        }
    }

    /// Number of rows written so far, header included.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered output to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| PileError::Stream(e.into_error()))
    }
}

impl RowWriter<Vec<u8>> {
    /// In-memory writer.
    pub fn in_memory(config: &ParserConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    /// Flush and return everything written as a string.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.into_inner()?)?)
    }
}

impl RowWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing.
    pub fn from_path(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(BufWriter::new(file), config))
    }
}

impl<W: Write> RowSink for RowWriter<W> {
    fn write_row(&mut self, fields: &[String]) -> Result<()> {
        self.inner.write_record(fields)?;
        self.rows_written += 1;
        Ok(())
    }
}

impl RowSink for Vec<Vec<String>> {
    fn write_row(&mut self, fields: &[String]) -> Result<()> {
        self.push(fields.to_vec());
        Ok(())
    }
}
