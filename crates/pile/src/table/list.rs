//! A list of records coupled with their shared header.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{PileError, Result};
use crate::input::{ParserConfig, RowReader, RowSink, RowWriter};
use crate::schema::{AliasMap, Header, HeaderRef, Value};

use super::record::Record;

/// An ordered list of [`Record`]s sharing one header.
///
/// # Example
///
/// ```
/// use pile::{AliasMap, List};
///
/// let aliases = AliasMap::new().with("Address Line", "address");
/// let list = List::from_string("ID,Name,Address Line\n1,Alice,123 1st St\n", aliases).unwrap();
///
/// let first = &list.records()[0];
/// assert_eq!(first.get("address").unwrap().to_string(), "123 1st St");
/// assert_eq!(first.get("id").unwrap().as_integer(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    header: HeaderRef,
    records: Vec<Record>,
}

impl List {
    pub fn new(header: HeaderRef, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    /// Parse a list from the full contents of a delimited file.
    ///
    /// The first row is the header; every following row becomes a record.
    /// Empty contents give an empty header and no records.
    pub fn from_string(contents: &str, aliases: AliasMap) -> Result<Self> {
        Self::from_reader(contents.as_bytes(), aliases, &ParserConfig::default())
    }

    /// Parse a list from any reader.
    pub fn from_reader<R: Read>(reader: R, aliases: AliasMap, config: &ParserConfig) -> Result<Self> {
        let mut rows = RowReader::new(reader, config);

        let names = rows.next_fields()?.unwrap_or_default();
        let header = HeaderRef::new(Header::new(names, aliases));

        let mut records = Vec::new();
        while let Some(values) = rows.next_values()? {
            records.push(Record::new(header.clone(), values));
        }

        Ok(Self::new(header, records))
    }

    /// Parse a list from a file.
    pub fn from_path(path: impl AsRef<Path>, aliases: AliasMap, config: &ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_reader(BufReader::new(file), aliases, config)
    }

    /// Parse a list from lines that have already been split.
    ///
    /// Each line is tokenized on its own, so quoted fields cannot span
    /// lines here.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], aliases: AliasMap) -> Result<Self> {
        let header = match lines.first() {
            Some(line) => Header::from_csv_row(line.as_ref(), aliases)?,
            None => Header::new(Vec::<String>::new(), aliases),
        };
        let header = HeaderRef::new(header);

        let records = lines
            .iter()
            .skip(1)
            .map(|line| Record::from_csv_row(line.as_ref(), &header))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(header, records))
    }

    /// Build a list from a grid whose first row holds the column names.
    ///
    /// Inverse of [`render_rows`](Self::render_rows).
    pub fn from_grid<I>(grid: I, aliases: AliasMap) -> Self
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        let mut rows = grid.into_iter();

        let names: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(Value::to_string).collect())
            .unwrap_or_default();
        let header = HeaderRef::new(Header::new(names, aliases));

        let records = rows.map(|row| Record::new(header.clone(), row)).collect();
        Self::new(header, records)
    }

    pub fn header(&self) -> &HeaderRef {
        &self.header
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Append a record bound to this list's header.
    pub fn push_values(&mut self, values: Vec<Value>) -> &mut Record {
        self.records.push(Record::new(self.header.clone(), values));
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    /// Map each record into a new list.
    ///
    /// The records are expected to share one header, which `f` may replace;
    /// the new list takes the header of its first mapped record.
    pub fn map_records<F>(self, f: F) -> List
    where
        F: FnMut(Record) -> Record,
    {
        let records: Vec<Record> = self.records.into_iter().map(f).collect();
        let header = records
            .first()
            .map(|r| r.header().clone())
            .unwrap_or(self.header);
        List::new(header, records)
    }

    /// The header names followed by each record's values.
    pub fn render_rows(&self) -> Vec<Vec<Value>> {
        let names = self
            .header
            .borrow()
            .iter()
            .map(Value::from)
            .collect::<Vec<_>>();

        std::iter::once(names)
            .chain(self.records.iter().map(|r| r.values().to_vec()))
            .collect()
    }

    /// Write the header and every record to a sink.
    pub fn write_to(&self, sink: &mut dyn RowSink) -> Result<()> {
        self.header.borrow().write_header(sink)?;
        for record in &self.records {
            record.write_record(Some(&mut *sink))?;
        }
        Ok(())
    }

    /// Serialize as delimited text.
    ///
    /// Inverse of [`from_string`](Self::from_string).
    pub fn to_csv_string(&self) -> Result<String> {
        self.to_csv_string_with(&ParserConfig::default())
    }

    pub fn to_csv_string_with(&self, config: &ParserConfig) -> Result<String> {
        let mut writer = RowWriter::in_memory(config);
        self.write_to(&mut writer)?;
        writer.into_string()
    }

    /// Write as delimited text to a file.
    pub fn save(&self, path: impl AsRef<Path>, config: &ParserConfig) -> Result<()> {
        let mut writer = RowWriter::from_path(path, config)?;
        self.write_to(&mut writer)?;
        writer.flush()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for List {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "ID,Name,Address Line\n1,Alice,123 1st St\n2,Bob,234 2nd St\n3,Charles,345 3rd St\n";

    fn example_list() -> List {
        List::from_string(EXAMPLE, AliasMap::new()).unwrap()
    }

    #[test]
    fn test_from_string() {
        let list = example_list();
        assert_eq!(list.len(), 3);
        assert_eq!(list.header().names(), vec!["ID", "Name", "Address Line"]);
        assert_eq!(list.records()[1].get("name").unwrap(), &Value::from("Bob"));
        assert!(list.iter().all(|r| r.header().ptr_eq(list.header())));
    }

    #[test]
    fn test_from_string_header_only_and_empty() {
        let list = List::from_string("ID,Name\n", AliasMap::new()).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.header().len(), 2);

        let list = List::from_string("", AliasMap::new()).unwrap();
        assert!(list.is_empty());
        assert!(list.header().is_empty());
    }

    #[test]
    fn test_from_lines_matches_from_string() {
        let lines: Vec<&str> = EXAMPLE.lines().collect();
        let list = List::from_lines(&lines, AliasMap::new()).unwrap();
        assert_eq!(list, example_list());
    }

    #[test]
    fn test_csv_string() {
        assert_eq!(example_list().to_csv_string().unwrap(), EXAMPLE);
    }

    #[test]
    fn test_csv_string_is_inverse_of_from_string() {
        let list = example_list();
        let again = List::from_string(&list.to_csv_string().unwrap(), AliasMap::new()).unwrap();
        assert_eq!(again, list);
    }

    #[test]
    fn test_render_rows() {
        let rows = example_list().render_rows();
        assert_eq!(
            rows,
            vec![
                vec![Value::from("ID"), Value::from("Name"), Value::from("Address Line")],
                vec![Value::Integer(1), Value::from("Alice"), Value::from("123 1st St")],
                vec![Value::Integer(2), Value::from("Bob"), Value::from("234 2nd St")],
                vec![Value::Integer(3), Value::from("Charles"), Value::from("345 3rd St")],
            ]
        );
    }

    #[test]
    fn test_render_rows_is_inverse_of_from_grid() {
        let list = example_list();
        assert_eq!(List::from_grid(list.render_rows(), AliasMap::new()), list);
    }

    #[test]
    fn test_from_grid_header_only() {
        let list = List::from_grid(vec![vec![Value::from("ID")]], AliasMap::new());
        assert!(list.is_empty());
        assert_eq!(list.header().names(), vec!["ID"]);

        let list = List::from_grid(Vec::<Vec<Value>>::new(), AliasMap::new());
        assert!(list.is_empty());
        assert!(list.header().is_empty());
    }

    #[test]
    fn test_equality() {
        let list = example_list();
        let other = example_list();
        assert_eq!(list, other);

        other.header().borrow_mut().names_mut()[0] = "ID#".to_string();
        assert_ne!(list, other);
    }

    #[test]
    fn test_map_records() {
        let list = example_list().map_records(|mut r| {
            let id = r.get("id").unwrap().as_integer().unwrap();
            r.set("id", id * 10).unwrap();
            r
        });

        let ids: Vec<_> = list.iter().map(|r| r.get(0).unwrap().clone()).collect();
        assert_eq!(ids, vec![Value::Integer(10), Value::Integer(20), Value::Integer(30)]);
    }

    #[test]
    fn test_map_records_adopts_new_header() {
        let renamed = HeaderRef::new(Header::new(["Key", "Name", "Street"], AliasMap::new()));
        let list = example_list().map_records(|mut r| {
            r.rebind(renamed.clone());
            r
        });

        assert!(list.header().ptr_eq(&renamed));
        assert!(list.to_csv_string().unwrap().starts_with("Key,Name,Street\n"));
    }

    #[test]
    fn test_map_records_empty_keeps_header() {
        let list = List::from_string("ID,Name\n", AliasMap::new()).unwrap();
        let header = list.header().clone();
        let mapped = list.map_records(|r| r);
        assert!(mapped.header().ptr_eq(&header));
    }

    #[test]
    fn test_push_values_shares_header() {
        let mut list = List::from_string("ID,Name\n", AliasMap::new()).unwrap();
        list.push_values(vec![5.into(), "Eve".into()]);

        assert_eq!(list.len(), 1);
        assert!(list.records()[0].header().ptr_eq(list.header()));
        assert_eq!(list.to_csv_string().unwrap(), "ID,Name\n5,Eve\n");
    }
}
