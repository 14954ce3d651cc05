//! Error taxonomy of a parse pass and the message catalog seam.

use serde::Serialize;

/// Everything that can go wrong with a single statement or clause.
///
/// None of these abort the pass; they are collected on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("line cannot be parsed: `{text}`")]
    UnparseableLine { text: String },
    #[error("malformed `{keyword}` statement, expected {expected}")]
    MalformedStatement { keyword: String, expected: &'static str },
    #[error("{field} value {value} is out of range ({min} to {max})")]
    ValueOutOfRange {
        field: &'static str,
        value: String,
        min: i64,
        max: i64,
    },
    #[error("{field} expects a number, found `{text}`")]
    MalformedNumber { field: &'static str, text: String },
    #[error("unknown {field} `{token}`, expected one of: {expected}")]
    UnknownEnumerator {
        field: &'static str,
        token: String,
        expected: String,
    },
    #[error("unknown item id {id} in `{text}`")]
    UnknownItem { id: u16, text: String },
    #[error("unknown skill `{name}`")]
    UnknownSkill { name: String },
    #[error("unknown dialogue keyword `{keyword}`")]
    UnknownKeyword { keyword: String },
    #[error("invalid `{keyword}` clause: {reason}")]
    InvalidClause { keyword: String, reason: &'static str },
    #[error("{field} contains an escaped quote, check for a stray `\\\"`: `{text}`")]
    SuspiciousQuote { field: &'static str, text: String },
}

impl ParseErrorKind {
    /// Warning-class kinds leave the parsed value in the document.
    pub fn is_warning(&self) -> bool {
        matches!(self, ParseErrorKind::SuspiciousQuote { .. })
    }
}

/// One collected error, positioned at its source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// 1-based character column, when the front end can tell.
    pub column: Option<usize>,
    pub kind: ParseErrorKind,
    pub message: String,
}

impl ParseError {
    pub fn is_warning(&self) -> bool {
        self.kind.is_warning()
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(f, "{}:{}: {}", self.line, col, self.message),
            None => write!(f, "{}: {}", self.line, self.message),
        }
    }
}

/// Turns an error kind into user-facing text.
///
/// Editors plug their localised catalogs in here; parse passes on other
/// threads share it, hence the `Sync` bound.
pub trait MessageCatalog: Send + Sync {
    fn describe(&self, kind: &ParseErrorKind) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageCatalog for EnglishMessages {
    fn describe(&self, kind: &ParseErrorKind) -> String {
        kind.to_string()
    }
}
