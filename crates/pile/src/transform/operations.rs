//! Ready-made record transforms that change the header.
//!
//! Each transform derives its output header once per input header and binds
//! every output record to that same handle, so the streamed header is
//! written once and matches all records.

use crate::error::{PileError, Result};
use crate::schema::{Header, HeaderRef, Value};
use crate::table::Record;

/// Derived output header, keyed by the input header it was built from.
#[derive(Debug, Clone)]
struct Derived<T> {
    source: HeaderRef,
    target: HeaderRef,
    extra: T,
}

fn resolve_existing(header: &Header, column: &str) -> Result<usize> {
    header
        .resolve(column)
        .filter(|&p| p < header.len())
        .ok_or_else(|| PileError::InvalidReference(column.to_string()))
}

fn alias_key(header: &Header, name: &str) -> String {
    if header.case_sensitive() {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

/// Renames columns, keeping values in place.
///
/// A renamed column keeps its aliases, and its previous name becomes one of
/// them.
#[derive(Debug, Clone)]
pub struct RenameColumns {
    renames: Vec<(String, String)>,
    derived: Option<Derived<()>>,
}

impl RenameColumns {
    /// `renames` pairs a column reference (name or alias) with its new name.
    pub fn new<I, K, V>(renames: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            renames: renames
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            derived: None,
        }
    }

    fn derive(&self, source: &Header) -> Result<Header> {
        let mut header = source.clone();

        for (column, new_name) in &self.renames {
            let position = resolve_existing(source, column)?;
            let old_name = source.names()[position].clone();

            let mut carried = source
                .aliases()
                .get(&alias_key(source, &old_name))
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            carried.push(old_name);

            header.names_mut()[position] = new_name.clone();
            header.insert_alias(new_name.clone(), carried);
        }

        Ok(header)
    }

    fn target(&mut self, header: &HeaderRef) -> Result<HeaderRef> {
        if let Some(derived) = &self.derived {
            if derived.source.ptr_eq(header) {
                return Ok(derived.target.clone());
            }
        }

        let target = HeaderRef::new(self.derive(&header.borrow())?);
        self.derived = Some(Derived {
            source: header.clone(),
            target: target.clone(),
            extra: (),
        });
        Ok(target)
    }

    /// Rebind `record` to the renamed header.
    pub fn apply(&mut self, header: &HeaderRef, mut record: Record) -> Result<Record> {
        record.rebind(self.target(header)?);
        Ok(record)
    }

    /// This transform as a mapping callback.
    pub fn into_fn(mut self) -> impl FnMut(&HeaderRef, Record) -> Result<Record> {
        move |header, record| self.apply(header, record)
    }
}

/// Projects records onto a subset of columns, in the given order.
#[derive(Debug, Clone)]
pub struct SelectColumns {
    columns: Vec<String>,
    derived: Option<Derived<Vec<usize>>>,
}

impl SelectColumns {
    /// `columns` are names or aliases of the columns to keep.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            derived: None,
        }
    }

    fn derive(&self, source: &Header) -> Result<(Header, Vec<usize>)> {
        let positions = self
            .columns
            .iter()
            .map(|c| resolve_existing(source, c))
            .collect::<Result<Vec<_>>>()?;

        let names: Vec<String> = positions
            .iter()
            .map(|&p| source.names()[p].clone())
            .collect();

        let kept: Vec<String> = names.iter().map(|n| alias_key(source, n)).collect();
        let mut aliases = source.raw_aliases().clone();
        aliases.retain(|key| kept.contains(&alias_key(source, key)));

        let mut header = Header::new(names, aliases);
        header.set_case_sensitive(source.case_sensitive());
        Ok((header, positions))
    }

    fn target(&mut self, header: &HeaderRef) -> Result<(HeaderRef, Vec<usize>)> {
        if let Some(derived) = &self.derived {
            if derived.source.ptr_eq(header) {
                return Ok((derived.target.clone(), derived.extra.clone()));
            }
        }

        let (target, positions) = self.derive(&header.borrow())?;
        let target = HeaderRef::new(target);
        self.derived = Some(Derived {
            source: header.clone(),
            target: target.clone(),
            extra: positions.clone(),
        });
        Ok((target, positions))
    }

    /// Build the projected record.
    pub fn apply(&mut self, header: &HeaderRef, record: Record) -> Result<Record> {
        let (target, positions) = self.target(header)?;
        let values = positions
            .into_iter()
            .map(|position| {
                record.values().get(position).cloned().ok_or(PileError::OutOfBounds {
                    position,
                    len: record.values().len(),
                })
            })
            .collect::<Result<Vec<Value>>>()?;
        Ok(Record::new(target, values))
    }

    /// This transform as a mapping callback.
    pub fn into_fn(mut self) -> impl FnMut(&HeaderRef, Record) -> Result<Record> {
        move |header, record| self.apply(header, record)
    }
}
