//! Header resolving column references to positions.

use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::error::Result;
use crate::input::{parse_line, ParserConfig, RowSink};

use super::aliases::{AliasList, AliasMap};
use super::types::ColumnRef;

/// The names of each column of a table, plus aliases by which a column may
/// also be referred to.
///
/// Given a file starting with the line `ID,Name,Address Line` and the alias
/// map `{"id": ["identity", "#"], "address line": ["address"]}`, the third
/// column can be reached as `2`, `"Address Line"`, `"address line"` or
/// `"address"`. Comparisons ignore case unless
/// [`set_case_sensitive`](Self::set_case_sensitive) is turned on; the
/// original casing of names is kept for output.
#[derive(Debug, Clone, Default)]
pub struct Header {
    names: Vec<String>,
    aliases: AliasMap,
    case_sensitive: bool,
    /// Lower-cased `aliases`, built on first case-insensitive lookup.
    folded: OnceCell<AliasMap>,
}

impl Header {
    /// Create a header from column names and an alias map.
    pub fn new<I, S>(names: I, aliases: AliasMap) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            aliases,
            case_sensitive: false,
            folded: OnceCell::new(),
        }
    }

    /// Parse a header from one delimited line.
    pub fn from_csv_row(line: &str, aliases: AliasMap) -> Result<Self> {
        Self::from_csv_row_with(line, aliases, &ParserConfig::default())
    }

    /// Parse a header from one delimited line with a custom parser config.
    pub fn from_csv_row_with(line: &str, aliases: AliasMap, config: &ParserConfig) -> Result<Self> {
        Ok(Self::new(parse_line(line, config)?, aliases))
    }

    /// Column names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Mutable access to column names; edits are seen by every record
    /// sharing this header.
    pub fn names_mut(&mut self) -> &mut Vec<String> {
        &mut self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// The aliases as configured, before any case folding.
    pub fn raw_aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// The aliases in effect: as configured when case sensitive, lower-cased
    /// otherwise.
    pub fn aliases(&self) -> &AliasMap {
        if self.case_sensitive {
            &self.aliases
        } else {
            self.folded_aliases()
        }
    }

    /// Replace the alias map.
    pub fn set_aliases(&mut self, aliases: AliasMap) {
        self.aliases = aliases;
        self.folded.take();
    }

    /// Add or replace the aliases of one column.
    pub fn insert_alias(&mut self, name: impl Into<String>, aliases: impl Into<AliasList>) {
        self.aliases.insert(name, aliases);
        self.folded.take();
    }

    fn folded_aliases(&self) -> &AliasMap {
        self.folded.get_or_init(|| self.aliases.folded())
    }

    /// Position a column reference refers to.
    ///
    /// Names match a column when equal to its declared name or to one of its
    /// aliases; the first matching column wins. A position is first matched
    /// the same way by its decimal text, so a column named `"2"` takes
    /// precedence over position 2. Unmatched positions are returned
    /// unchanged; unmatched names give `None`.
    pub fn resolve<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Option<usize> {
        match column.into() {
            ColumnRef::Position(position) => self
                .match_name(&position.to_string())
                .or(Some(position)),
            ColumnRef::Name(name) => self.match_name(name),
        }
    }

    fn match_name(&self, name: &str) -> Option<usize> {
        if self.case_sensitive {
            return self
                .names
                .iter()
                .position(|c| c == name || self.aliases.is_alias_of(c, name));
        }
        let name = name.to_lowercase();
        let folded = self.folded_aliases();
        self.names.iter().position(|c| {
            let c = c.to_lowercase();
            c == name || folded.is_alias_of(&c, &name)
        })
    }

    /// Write the column names as one row.
    pub fn write_header(&self, sink: &mut dyn RowSink) -> Result<()> {
        sink.write_row(&self.names)
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.aliases() == other.aliases()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Shared handle to a [`Header`].
///
/// Every record of a list holds a clone of the same handle, so renaming a
/// column through one record renames it for all of them.
#[derive(Debug, Clone)]
pub struct HeaderRef(Rc<RefCell<Header>>);

impl HeaderRef {
    pub fn new(header: Header) -> Self {
        Self(Rc::new(RefCell::new(header)))
    }

    pub fn borrow(&self) -> Ref<'_, Header> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Header> {
        self.0.borrow_mut()
    }

    /// See [`Header::resolve`].
    pub fn resolve<'a>(&self, column: impl Into<ColumnRef<'a>>) -> Option<usize> {
        self.0.borrow().resolve(column)
    }

    /// Copy of the column names.
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().names().to_vec()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Whether both handles point at the same header.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A new handle to an independent copy of this header.
    pub fn deep_clone(&self) -> Self {
        Self::new(self.0.borrow().clone())
    }
}

impl PartialEq for HeaderRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl From<Header> for HeaderRef {
    fn from(header: Header) -> Self {
        Self::new(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RowWriter;

    fn example_header() -> Header {
        let aliases = AliasMap::new()
            .with("id", ["identity", "#"])
            .with("address line", "address");
        Header::new(["ID", "Name", "Address Line"], aliases)
    }

    #[test]
    fn test_positions_returned_unchanged() {
        let header = example_header();
        assert_eq!(header.resolve(2), Some(2));
        assert_eq!(header.resolve(0), Some(0));
        assert_eq!(header.resolve(10), Some(10));
    }

    #[test]
    fn test_position_matches_digit_name_first() {
        let header = Header::new(["2", "Name", "Total"], AliasMap::new());
        assert_eq!(header.resolve(2), Some(0));
        assert_eq!(header.resolve(1), Some(1));
        assert_eq!(header.resolve(5), Some(5));

        let aliased = Header::new(["ID", "Name"], AliasMap::new().with("name", "0"));
        assert_eq!(aliased.resolve(0), Some(1));
    }

    #[test]
    fn test_resolves_names() {
        let header = example_header();
        assert_eq!(header.resolve("name"), Some(1));
        assert_eq!(header.resolve("Name"), Some(1));
        assert_eq!(header.resolve("NAME"), Some(1));
        assert_eq!(header.resolve("country"), None);
    }

    #[test]
    fn test_resolves_aliases() {
        let header = example_header();
        assert_eq!(header.resolve("id"), Some(0));
        assert_eq!(header.resolve("identity"), Some(0));
        assert_eq!(header.resolve("#"), Some(0));
        assert_eq!(header.resolve("address line"), Some(2));
        assert_eq!(header.resolve("address"), Some(2));
        assert_eq!(header.resolve("ADDRESS"), Some(2));
    }

    #[test]
    fn test_respects_case_sensitivity() {
        let mut header = example_header();
        assert_eq!(header.resolve("address line"), Some(2));

        header.set_case_sensitive(true);
        assert_eq!(header.resolve("address line"), None);
        assert_eq!(header.resolve("Address Line"), Some(2));
        // Aliases are keyed by "address line", which no longer names a column.
        assert_eq!(header.resolve("address"), None);

        header.set_case_sensitive(false);
        assert_eq!(header.resolve("address line"), Some(2));
    }

    #[test]
    fn test_first_match_wins() {
        let aliases = AliasMap::new().with("b", "a");
        let header = Header::new(["a", "b", "a"], aliases);
        assert_eq!(header.resolve("a"), Some(0));

        let header = Header::new(["x", "b", "a"], AliasMap::new().with("b", "a"));
        assert_eq!(header.resolve("a"), Some(1));
    }

    #[test]
    fn test_alias_keys_not_in_names() {
        let aliases = AliasMap::new().with("Country", "nation");
        let header = Header::new(["ID"], aliases);
        assert_eq!(header.resolve("nation"), None);
    }

    #[test]
    fn test_set_aliases_invalidates_folded_cache() {
        let mut header = example_header();
        assert_eq!(header.resolve("address"), Some(2));

        header.set_aliases(AliasMap::new().with("Address Line", "street"));
        assert_eq!(header.resolve("address"), None);
        assert_eq!(header.resolve("STREET"), Some(2));

        header.insert_alias("name", "nick");
        assert_eq!(header.resolve("nick"), Some(1));
        assert_eq!(header.resolve("street"), Some(2));
    }

    #[test]
    fn test_equality() {
        let header = example_header();
        let mut other = example_header();
        assert_eq!(header, other);

        other.names_mut().push("Country".to_string());
        assert_ne!(header, other);

        let mut other = example_header();
        other.insert_alias("name", ["handle", "nick"]);
        assert_ne!(header, other);
    }

    #[test]
    fn test_equality_compares_effective_aliases() {
        let a = Header::new(["ID"], AliasMap::new().with("ID", "Key"));
        let b = Header::new(["ID"], AliasMap::new().with("id", "key"));
        assert_eq!(a, b);

        let mut a = a;
        let mut b = b;
        a.set_case_sensitive(true);
        b.set_case_sensitive(true);
        assert_ne!(a, b);
    }

    #[test]
    fn test_write_header() {
        let header = example_header();
        let mut writer = RowWriter::in_memory(&ParserConfig::default());
        header.write_header(&mut writer).unwrap();
        assert_eq!(writer.into_string().unwrap(), "ID,Name,Address Line\n");
    }

    #[test]
    fn test_from_csv_row_is_inverse_of_write_header() {
        let header = example_header();
        let mut writer = RowWriter::in_memory(&ParserConfig::default());
        header.write_header(&mut writer).unwrap();
        let line = writer.into_string().unwrap();

        let parsed = Header::from_csv_row(&line, header.raw_aliases().clone()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_shared_handle_sees_edits() {
        let handle = HeaderRef::new(example_header());
        let other = handle.clone();

        handle.borrow_mut().names_mut()[1] = "Full Name".to_string();

        assert_eq!(other.resolve("full name"), Some(1));
        assert_eq!(other.resolve("name"), None);
        assert!(handle.ptr_eq(&other));
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let handle = HeaderRef::new(example_header());
        let copy = handle.deep_clone();
        assert_eq!(handle, copy);
        assert!(!handle.ptr_eq(&copy));

        copy.borrow_mut().names_mut()[0] = "Key".to_string();
        assert_ne!(handle, copy);
    }
}
