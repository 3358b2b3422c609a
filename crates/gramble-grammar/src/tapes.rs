use std::collections::BTreeSet;
use std::fmt;

/// The set of tapes a grammar node can read or write.
///
/// Ordered so that printing and comparison are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TapeSet(BTreeSet<String>);

impl TapeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(tape: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(tape);
        set
    }

    pub fn insert(&mut self, tape: impl Into<String>) -> bool {
        self.0.insert(tape.into())
    }

    pub fn contains(&self, tape: &str) -> bool {
        self.0.contains(tape)
    }

    /// Adds every tape of `other` to this set.
    pub fn extend_from(&mut self, other: &TapeSet) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn union(&self, other: &TapeSet) -> TapeSet {
        let mut result = self.clone();
        result.extend_from(other);
        result
    }

    /// Returns a copy with `from` relabeled as `to`. A set without `from` is
    /// returned unchanged.
    pub fn rename(&self, from: &str, to: &str) -> TapeSet {
        if !self.contains(from) {
            return self.clone();
        }
        let mut result: TapeSet = self.0.iter().filter(|tape| tape.as_str() != from).cloned().collect();
        result.insert(to);
        result
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TapeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TapeSet(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TapeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, tape) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(tape)?;
        }
        f.write_str("}")
    }
}
