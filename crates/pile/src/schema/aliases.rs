//! Alias configuration mapping column names to alternative names.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PileError, Result};

/// The alternative names for one column.
///
/// Built from a single name or a list of names; a single name becomes a
/// one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany", into = "Vec<String>")]
pub struct AliasList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for AliasList {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => AliasList(vec![s]),
            OneOrMany::Many(v) => AliasList(v),
        }
    }
}

impl From<AliasList> for Vec<String> {
    fn from(list: AliasList) -> Self {
        list.0
    }
}

impl AliasList {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|a| a == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for AliasList {
    fn from(s: &str) -> Self {
        AliasList(vec![s.to_string()])
    }
}

impl From<String> for AliasList {
    fn from(s: String) -> Self {
        AliasList(vec![s])
    }
}

impl From<Vec<String>> for AliasList {
    fn from(v: Vec<String>) -> Self {
        AliasList(v)
    }
}

impl From<Vec<&str>> for AliasList {
    fn from(v: Vec<&str>) -> Self {
        AliasList(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AliasList {
    fn from(v: [&str; N]) -> Self {
        AliasList(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Map from a column name to the aliases that also refer to it.
///
/// Keys are conventionally drawn from a header's names, but nothing
/// requires it; unknown keys simply never match.
///
/// # Example
///
/// ```
/// use pile::AliasMap;
///
/// let mut aliases = AliasMap::new();
/// aliases.insert("id", ["identity", "#"]);
/// aliases.insert("address line", "address");
///
/// assert_eq!(aliases.get("address line"), Some(&["address".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap(IndexMap<String, AliasList>);

impl AliasMap {
    /// Create an empty alias map.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Add aliases for a column, replacing any previous entry for it.
    pub fn insert(&mut self, name: impl Into<String>, aliases: impl Into<AliasList>) {
        self.0.insert(name.into(), aliases.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, aliases: impl Into<AliasList>) -> Self {
        self.insert(name, aliases);
        self
    }

    /// Aliases registered under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(AliasList::as_slice)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Whether `alias` is registered under exactly `name`.
    pub fn is_alias_of(&self, name: &str, alias: &str) -> bool {
        self.0.get(name).is_some_and(|list| list.contains(alias))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Keep only entries whose key satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|k, _| keep(k.as_str()));
    }

    /// Lower-cased copy of this map, keys and aliases alike.
    ///
    /// Keys that collide after lower-casing have their lists concatenated
    /// in insertion order.
    pub fn folded(&self) -> AliasMap {
        let mut folded: IndexMap<String, AliasList> = IndexMap::with_capacity(self.0.len());
        for (name, list) in &self.0 {
            let entry = folded.entry(name.to_lowercase()).or_default();
            entry.0.extend(list.iter().map(str::to_lowercase));
        }
        AliasMap(folded)
    }

    /// Parse an alias map from JSON text.
    ///
    /// Each value may be a single string or an array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an alias map from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| PileError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let map = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            PileError::Config(format!(
                "Failed to parse alias map '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(map)
    }
}

impl<K, V> FromIterator<(K, V)> for AliasMap
where
    K: Into<String>,
    V: Into<AliasList>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AliasMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
