//! CSV reader with optional integer detection.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PileError, Result};
use crate::schema::Value;

/// Fields matching this are converted to integers.
static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Convert integer-looking fields to [`Value::Integer`].
    pub convert_integers: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            convert_integers: true,
        }
    }
}

impl ParserConfig {
    /// Configuration with a custom delimiter.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .has_headers(false)
            .flexible(true);
        builder
    }

    pub(crate) fn writer_builder(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true);
        builder
    }
}

/// Convert a raw field, turning integer-looking text into an integer.
///
/// Digits that overflow `i64` stay text.
pub fn parse_field(field: &str) -> Value {
    if INTEGER_PATTERN.is_match(field) {
        if let Ok(i) = field.parse::<i64>() {
            return Value::Integer(i);
        }
    }
    Value::Text(field.to_string())
}

/// Tokenize a single delimited line into raw fields.
///
/// An empty line yields no fields.
pub fn parse_line(line: &str, config: &ParserConfig) -> Result<Vec<String>> {
    let mut reader = config.reader_builder().from_reader(line.as_bytes());
    let mut record = StringRecord::new();

    if reader.read_record(&mut record)? {
        Ok(record.iter().map(|s| s.to_string()).collect())
    } else {
        Ok(Vec::new())
    }
}

/// Reads rows one at a time from a delimited source.
pub struct RowReader<R: Read> {
    inner: csv::Reader<R>,
    record: StringRecord,
    convert_integers: bool,
}

impl<R: Read> RowReader<R> {
    /// Wrap any reader.
    pub fn new(reader: R, config: &ParserConfig) -> Self {
        Self {
            inner: config.reader_builder().from_reader(reader),
            record: StringRecord::new(),
            convert_integers: config.convert_integers,
        }
    }

    /// Read the next row as raw strings, or `None` at end of input.
    pub fn next_fields(&mut self) -> Result<Option<Vec<String>>> {
        if self.inner.read_record(&mut self.record)? {
            Ok(Some(self.record.iter().map(|s| s.to_string()).collect()))
        } else {
            Ok(None)
        }
    }

    /// Read the next row as values, or `None` at end of input.
    pub fn next_values(&mut self) -> Result<Option<Vec<Value>>> {
        if !self.inner.read_record(&mut self.record)? {
            return Ok(None);
        }

        let values = if self.convert_integers {
            self.record.iter().map(parse_field).collect()
        } else {
            self.record.iter().map(Value::from).collect()
        };

        Ok(Some(values))
    }

    /// Current line number in the underlying input.
    pub fn line(&self) -> u64 {
        self.inner.position().line()
    }
}

impl RowReader<BufReader<File>> {
    /// Open a file for reading.
    pub fn from_path(path: impl AsRef<Path>, config: &ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::new(BufReader::new(file), config))
    }
}
