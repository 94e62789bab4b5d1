//! A single row of values coupled with its header.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{PileError, Result};
use crate::input::{parse_field, parse_line, ParserConfig, RowSink};
use crate::schema::{ColumnRef, HeaderRef, Value};

/// Shared handle to an output sink a record can be bound to.
pub type SinkRef = Rc<RefCell<dyn RowSink>>;

/// One row of a list: values addressed through a shared [`HeaderRef`].
///
/// The number of values is expected to match the header but is not
/// enforced; access past the end of the values fails with
/// [`PileError::OutOfBounds`].
#[derive(Clone)]
pub struct Record {
    header: HeaderRef,
    values: Vec<Value>,
    sink: Option<SinkRef>,
}

impl Record {
    pub fn new(header: HeaderRef, values: Vec<Value>) -> Self {
        Self {
            header,
            values,
            sink: None,
        }
    }

    /// Parse a record from one delimited line, converting integer fields.
    pub fn from_csv_row(line: &str, header: &HeaderRef) -> Result<Self> {
        Self::from_csv_row_with(line, header, &ParserConfig::default())
    }

    /// Parse a record from one delimited line with a custom parser config.
    pub fn from_csv_row_with(line: &str, header: &HeaderRef, config: &ParserConfig) -> Result<Self> {
        let fields = parse_line(line, config)?;
        let values = if config.convert_integers {
            fields.iter().map(|f| parse_field(f)).collect()
        } else {
            fields.into_iter().map(Value::Text).collect()
        };
        Ok(Self::new(header.clone(), values))
    }

    pub fn header(&self) -> &HeaderRef {
        &self.header
    }

    /// Point this record at a different header, keeping its values.
    pub fn rebind(&mut self, header: HeaderRef) {
        self.header = header;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Values rendered as output fields.
    pub fn fields(&self) -> Vec<String> {
        self.values.iter().map(Value::to_string).collect()
    }

    /// Position a column reference refers to in this record's header.
    pub fn resolve<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Option<usize> {
        self.header.resolve(column)
    }

    /// Copy of the header's column names.
    pub fn column_names(&self) -> Vec<String> {
        self.header.names()
    }

    fn position(&self, column: ColumnRef<'_>) -> Result<usize> {
        let position = self
            .header
            .resolve(column)
            .ok_or_else(|| PileError::InvalidReference(column.to_string()))?;

        if position >= self.values.len() {
            return Err(PileError::OutOfBounds {
                position,
                len: self.values.len(),
            });
        }

        Ok(position)
    }

    /// Value of a column, by position, name or alias.
    pub fn get<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Result<&Value> {
        let position = self.position(column.into())?;
        Ok(&self.values[position])
    }

    pub fn get_mut<'a>(&mut self, column: impl Into<ColumnRef<'a>>) -> Result<&mut Value> {
        let position = self.position(column.into())?;
        Ok(&mut self.values[position])
    }

    /// Replace the value of a column, by position, name or alias.
    pub fn set<'a>(&mut self, column: impl Into<ColumnRef<'a>>, value: impl Into<Value>) -> Result<()> {
        *self.get_mut(column)? = value.into();
        Ok(())
    }

    /// Bind an output sink used when no sink is passed to the write methods.
    pub fn bind_sink(&mut self, sink: SinkRef) {
        self.sink = Some(sink);
    }

    pub fn unbind_sink(&mut self) -> Option<SinkRef> {
        self.sink.take()
    }

    pub fn sink(&self) -> Option<&SinkRef> {
        self.sink.as_ref()
    }

    fn with_sink(
        &self,
        sink: Option<&mut dyn RowSink>,
        write: impl FnOnce(&mut dyn RowSink) -> Result<()>,
    ) -> Result<()> {
        match (sink, &self.sink) {
            (Some(sink), _) => write(sink),
            (None, Some(bound)) => write(&mut *bound.borrow_mut()),
            (None, None) => Err(PileError::MissingSink),
        }
    }

    /// Write this record's header, to `sink` or else the bound sink.
    pub fn write_header(&self, sink: Option<&mut dyn RowSink>) -> Result<()> {
        self.with_sink(sink, |s| self.header.borrow().write_header(s))
    }

    /// Write this record's values, to `sink` or else the bound sink.
    pub fn write_record(&self, sink: Option<&mut dyn RowSink>) -> Result<()> {
        self.with_sink(sink, |s| s.write_row(&self.fields()))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        let same_sink = match (&self.sink, &other.sink) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        same_sink && self.header == other.header && self.values == other.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("header", &self.header)
            .field("values", &self.values)
            .field("bound_sink", &self.sink.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RowWriter;
    use crate::schema::{AliasMap, Header};

    fn example_header() -> HeaderRef {
        let aliases = AliasMap::new()
            .with("id", ["identity", "#"])
            .with("address line", "address");
        HeaderRef::new(Header::new(["ID", "Name", "Address Line"], aliases))
    }

    fn example_record() -> Record {
        Record::new(
            example_header(),
            vec![3.into(), "Bob Smith".into(), "123 1st St".into()],
        )
    }

    #[test]
    fn test_get_by_position_name_and_alias() {
        let record = example_record();
        assert_eq!(record.get(1).unwrap(), &Value::from("Bob Smith"));
        assert_eq!(record.get("name").unwrap(), &Value::from("Bob Smith"));
        assert_eq!(record.get("address").unwrap(), &Value::from("123 1st St"));
        assert_eq!(record.get("#").unwrap(), &Value::Integer(3));
    }

    #[test]
    fn test_set_updates_values() {
        let mut record = example_record();
        record.set("name", "Robert Smith").unwrap();
        record.set("identity", 4).unwrap();

        assert_eq!(record.get(1).unwrap(), &Value::from("Robert Smith"));
        assert_eq!(record.get("id").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn test_unknown_name_is_invalid_reference() {
        let mut record = example_record();
        assert!(matches!(record.get("country"), Err(PileError::InvalidReference(name)) if name == "country"));
        assert!(matches!(record.set("country", "NZ"), Err(PileError::InvalidReference(_))));
    }

    #[test]
    fn test_short_record_is_out_of_bounds() {
        let record = Record::new(example_header(), vec![1.into()]);
        assert!(matches!(
            record.get("address"),
            Err(PileError::OutOfBounds { position: 2, len: 1 })
        ));
        assert!(matches!(record.get(5), Err(PileError::OutOfBounds { position: 5, .. })));
    }

    #[test]
    fn test_resolve_pass_through() {
        let record = example_record();
        assert_eq!(record.resolve("identity"), Some(0));
        assert_eq!(record.resolve("nope"), None);
        assert_eq!(record.column_names(), vec!["ID", "Name", "Address Line"]);
    }

    #[test]
    fn test_write_requires_sink() {
        let record = example_record();
        assert!(matches!(record.write_record(None), Err(PileError::MissingSink)));
        assert!(matches!(record.write_header(None), Err(PileError::MissingSink)));
    }

    #[test]
    fn test_write_header_and_record() {
        let record = example_record();
        let mut writer = RowWriter::in_memory(&ParserConfig::default());
        record.write_header(Some(&mut writer)).unwrap();
        record.write_record(Some(&mut writer)).unwrap();

        assert_eq!(
            writer.into_string().unwrap(),
            "ID,Name,Address Line\n3,Bob Smith,123 1st St\n"
        );
    }

    #[test]
    fn test_bound_sink() {
        let rows = Rc::new(RefCell::new(Vec::<Vec<String>>::new()));
        let mut record = example_record();
        record.bind_sink(rows.clone());

        record.write_record(None).unwrap();
        assert_eq!(rows.borrow().len(), 1);
        assert_eq!(rows.borrow()[0], vec!["3", "Bob Smith", "123 1st St"]);

        // An explicit sink takes precedence over the bound one.
        let mut other: Vec<Vec<String>> = Vec::new();
        record.write_record(Some(&mut other)).unwrap();
        assert_eq!(rows.borrow().len(), 1);
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_from_csv_row_is_inverse_of_write_record() {
        let record = example_record();
        let mut writer = RowWriter::in_memory(&ParserConfig::default());
        record.write_record(Some(&mut writer)).unwrap();
        let line = writer.into_string().unwrap();

        let parsed = Record::from_csv_row(&line, record.header()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_equality() {
        let record = example_record();
        assert_eq!(record, example_record());

        let mut other = example_record();
        other.set(0, 7).unwrap();
        assert_ne!(record, other);

        let mut bound = example_record();
        let sink: SinkRef = Rc::new(RefCell::new(Vec::<Vec<String>>::new()));
        bound.bind_sink(sink);
        assert_ne!(record, bound);
    }

    #[test]
    fn test_header_edits_visible_through_records() {
        let header = example_header();
        let a = Record::new(header.clone(), vec![1.into(), "Alice".into(), "x".into()]);
        let b = Record::new(header.clone(), vec![2.into(), "Bob".into(), "y".into()]);

        header.borrow_mut().names_mut()[1] = "Handle".to_string();

        assert_eq!(a.get("handle").unwrap(), &Value::from("Alice"));
        assert_eq!(b.get("handle").unwrap(), &Value::from("Bob"));
        assert!(b.get("name").is_err());
    }
}
