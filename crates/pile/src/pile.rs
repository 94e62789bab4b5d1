//! Configuration and the `Pile` entry point.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::input::ParserConfig;
use crate::schema::{AliasMap, Header, HeaderRef};
use crate::table::{List, Record};
use crate::transform::stream;

/// Configuration for reading and transforming delimited files.
#[derive(Debug, Clone, Default)]
pub struct PileConfig {
    /// Tokenizer configuration.
    pub parser: ParserConfig,
    /// Aliases applied to every header read.
    pub aliases: AliasMap,
    /// Whether column names and aliases are matched case sensitively.
    pub case_sensitive: bool,
}

impl PileConfig {
    /// Default configuration with the given aliases.
    pub fn with_aliases(aliases: AliasMap) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    /// Build a shared header from column names using this configuration.
    pub fn header<I, S>(&self, names: I) -> HeaderRef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut header = Header::new(names, self.aliases.clone());
        header.set_case_sensitive(self.case_sensitive);
        HeaderRef::new(header)
    }
}

/// Reads and transforms delimited files under one configuration.
///
/// # Example
///
/// ```
/// use pile::{AliasMap, Pile, PileConfig};
///
/// let pile = Pile::with_config(PileConfig::with_aliases(
///     AliasMap::new().with("Address Line", "address"),
/// ));
///
/// let output = pile
///     .map_contents("ID,Address Line\n1,123 1st St\n", |_, mut record| {
///         record.set("address", "PO Box 1")?;
///         Ok(record)
///     })
///     .unwrap();
///
/// assert_eq!(output, "ID,Address Line\n1,PO Box 1\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pile {
    config: PileConfig,
}

impl Pile {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(PileConfig::default())
    }

    pub fn with_config(config: PileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PileConfig {
        &self.config
    }

    fn apply_case(&self, list: List) -> List {
        list.header()
            .borrow_mut()
            .set_case_sensitive(self.config.case_sensitive);
        list
    }

    /// Read a whole file into a list.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<List> {
        let list = List::from_path(path, self.config.aliases.clone(), &self.config.parser)?;
        Ok(self.apply_case(list))
    }

    /// Read delimited text into a list.
    pub fn read_str(&self, contents: &str) -> Result<List> {
        let list = List::from_reader(
            contents.as_bytes(),
            self.config.aliases.clone(),
            &self.config.parser,
        )?;
        Ok(self.apply_case(list))
    }

    /// Stream `from` into `to`, mapping each record. See [`stream::map_csv`].
    pub fn map_file<F>(&self, from: impl AsRef<Path>, to: impl AsRef<Path>, f: F) -> Result<()>
    where
        F: FnMut(&HeaderRef, Record) -> Result<Record>,
    {
        stream::map_csv_file_with(from, to, &self.config, f)
    }

    /// Map delimited text, returning the output text.
    pub fn map_contents<F>(&self, contents: &str, f: F) -> Result<String>
    where
        F: FnMut(&HeaderRef, Record) -> Result<Record>,
    {
        stream::map_csv_contents_with(contents, &self.config, f)
    }

    /// Map between arbitrary streams, returning the number of records written.
    pub fn map_stream<R, W, F>(&self, reader: R, writer: W, f: F) -> Result<usize>
    where
        R: Read,
        W: Write,
        F: FnMut(&HeaderRef, Record) -> Result<Record>,
    {
        stream::map_csv(reader, writer, &self.config, f)
    }
}
