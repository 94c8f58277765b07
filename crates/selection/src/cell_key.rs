//! Cell identity for the selection engine.
//!
//! A `CellKey` names a cell by its row and column identifiers. The engine
//! never sees what a row or column *is*; it only compares these ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field separator used by the canonical string encoding (ASCII unit separator).
pub const KEY_SEPARATOR: char = '\u{1F}';

/// A cell addressed by (row id, column id).
///
/// Equality and hashing are structural, so ids may contain any character
/// when the key is used as a map key. Only the string encoding
/// (`encode` / `FromStr`) reserves [`KEY_SEPARATOR`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub row: String,
    pub col: String,
}

/// A cell used as a range endpoint. Same value as a key; the name marks
/// places where a `GridIndex` lookup is implied.
pub type CellPosition = CellKey;

impl CellKey {
    #[inline]
    pub fn new(row: impl Into<String>, col: impl Into<String>) -> Self {
        Self { row: row.into(), col: col.into() }
    }

    /// Create a key, rejecting empty ids.
    pub fn try_new(row: impl Into<String>, col: impl Into<String>) -> Result<Self, CellKeyError> {
        let key = Self::new(row, col);
        if key.row.is_empty() {
            return Err(CellKeyError::EmptyRow);
        }
        if key.col.is_empty() {
            return Err(CellKeyError::EmptyCol);
        }
        Ok(key)
    }

    /// Canonical string form: `row` + separator + `col`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// True when both ids are non-empty and free of the separator.
    pub fn is_valid(&self) -> bool {
        !self.row.is_empty()
            && !self.col.is_empty()
            && !self.row.contains(KEY_SEPARATOR)
            && !self.col.contains(KEY_SEPARATOR)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.row, KEY_SEPARATOR, self.col)
    }
}

impl FromStr for CellKey {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once(KEY_SEPARATOR).ok_or(CellKeyError::MissingSeparator)?;
        if col.contains(KEY_SEPARATOR) {
            return Err(CellKeyError::ExtraSeparator);
        }
        Self::try_new(row, col)
    }
}

/// Why a string could not be parsed into a `CellKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKeyError {
    MissingSeparator,
    ExtraSeparator,
    EmptyRow,
    EmptyCol,
}

impl fmt::Display for CellKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKeyError::MissingSeparator => write!(f, "cell key has no field separator"),
            CellKeyError::ExtraSeparator => write!(f, "cell key id contains the field separator"),
            CellKeyError::EmptyRow => write!(f, "cell key has an empty row id"),
            CellKeyError::EmptyCol => write!(f, "cell key has an empty column id"),
        }
    }
}

impl std::error::Error for CellKeyError {}
