use std::fmt;

use gramble_source::CellPos;
use serde::{Deserialize, Serialize};

/// How the cells of a grid column are read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Header {
    /// Each cell is a literal on tape `name`.
    Tape { name: String },
    /// Like `inner`, and no value may appear twice in the column.
    Unique { inner: Box<Header> },
    /// Each cell names a symbol to embed.
    Embed,
    /// Each cell names a symbol whose tape `from` is relabelled `to`.
    Rename { from: String, to: String },
    /// Each cell lists `|`-separated alternatives on tape `tape`.
    Choice { tape: String },
    /// Author notes; the column contributes nothing.
    Comment,
}

impl Header {
    pub fn tape(name: impl Into<String>) -> Self {
        Header::Tape { name: name.into() }
    }

    pub fn unique(inner: Header) -> Self {
        Header::Unique { inner: Box::new(inner) }
    }

    /// A header is literal when it is a tape column, possibly behind any
    /// number of `unique` markers.
    pub fn is_literal(&self) -> bool {
        self.literal_tape().is_some()
    }

    /// The tape a literal header writes to.
    pub fn literal_tape(&self) -> Option<&str> {
        match self {
            Header::Tape { name } => Some(name),
            Header::Unique { inner } => inner.literal_tape(),
            Header::Embed | Header::Rename { .. } | Header::Choice { .. } | Header::Comment => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Header::Comment)
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, Header::Unique { .. })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Tape { name } => f.write_str(name),
            Header::Unique { inner } => write!(f, "unique {}", inner),
            Header::Embed => f.write_str("embed"),
            Header::Rename { from, to } => write!(f, "rename {}>{}", from, to),
            Header::Choice { tape } => write!(f, "choice {}", tape),
            Header::Comment => f.write_str("%"),
        }
    }
}

/// A header together with the cell it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TstHeader {
    pub header: Header,
    pub pos: CellPos,
}

impl TstHeader {
    pub fn new(header: Header, pos: CellPos) -> Self {
        Self { header, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_headers() {
        assert!(Header::tape("text").is_literal());
        assert!(Header::unique(Header::tape("text")).is_literal());
        assert!(Header::unique(Header::unique(Header::tape("text"))).is_literal());
        assert_eq!(Header::unique(Header::tape("gloss")).literal_tape(), Some("gloss"));
    }

    #[test]
    fn test_non_literal_headers() {
        assert!(!Header::Embed.is_literal());
        assert!(!Header::Comment.is_literal());
        assert!(!Header::Choice { tape: "text".into() }.is_literal());
        assert!(!Header::unique(Header::Embed).is_literal());
        assert!(!Header::Rename { from: "a".into(), to: "b".into() }.is_literal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Header::unique(Header::tape("text")).to_string(), "unique text");
        assert_eq!(Header::Rename { from: "t1".into(), to: "t2".into() }.to_string(), "rename t1>t2");
    }
}
