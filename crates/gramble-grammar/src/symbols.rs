//! Case-insensitive, insertion-ordered symbol maps.

use indexmap::IndexMap;

use crate::Grammar;

/// A definition stored in a `SymbolMap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// The name as the author spelled it, kept for messages and printing.
    pub name: String,
    pub grammar: Grammar,
}

/// The symbols of a collection.
///
/// Lookup ignores case; iteration follows definition order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolMap {
    entries: IndexMap<String, SymbolEntry>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lookup key for a symbol name.
    pub fn normalize(name: &str) -> String {
        name.to_lowercase()
    }

    /// Inserts a definition, returning the entry it replaced, if any.
    ///
    /// A replaced entry keeps its position in the iteration order.
    pub fn insert(&mut self, name: impl Into<String>, grammar: Grammar) -> Option<SymbolEntry> {
        let name = name.into();
        let key = Self::normalize(&name);
        self.entries.insert(key, SymbolEntry { name, grammar })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::normalize(name))
    }

    pub fn get(&self, name: &str) -> Option<&Grammar> {
        self.get_entry(name).map(|entry| &entry.grammar)
    }

    pub fn get_entry(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(&Self::normalize(name))
    }

    /// Iterates `(display name, definition)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grammar)> {
        self.entries.values().map(|entry| (entry.name.as_str(), &entry.grammar))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for SymbolMap {
    type Item = SymbolEntry;
    type IntoIter = indexmap::map::IntoValues<String, SymbolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<(String, Grammar)> for SymbolMap {
    fn from_iter<I: IntoIterator<Item = (String, Grammar)>>(iter: I) -> Self {
        let mut map = SymbolMap::new();
        for (name, grammar) in iter {
            map.insert(name, grammar);
        }
        map
    }
}
