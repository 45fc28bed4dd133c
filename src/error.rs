//! Centralized error handling for gridsift.
//!
//! A single `enum` covers every failure the extraction pipeline can produce,
//! so callers can pattern match on the kind instead of parsing strings:
//!
//! ```
//! use gridsift::error::SiftError;
//!
//! fn describe(err: &SiftError) -> &'static str {
//!     match err {
//!         SiftError::SheetNotFound(_) => "pick another sheet",
//!         SiftError::ColumnNotFound(_) => "check the header row",
//!         _ => "see the message",
//!     }
//! }
//! ```
//!
//! Detection-phase errors (`SheetNotFound`, `MalformedAddress`,
//! `HeaderRowNotFound`, `MalformedMapping`, `EmptyMapping`) abort the single
//! operation they belong to and carry the offending identifier. In batch mode
//! a per-entry failure is recorded in that entry's outcome and never crosses
//! an entry boundary (see [`crate::batch`]).

use std::fmt;

/// Main error type for gridsift operations.
#[derive(Debug)]
pub enum SiftError {
    /// Requested sheet name does not exist in the workbook
    SheetNotFound(String),

    /// Cell reference string is not of the form `[A-Z]+[1-9][0-9]*`
    MalformedAddress(String),

    /// No row in the grid qualified as a header row
    HeaderRowNotFound,

    /// A requested column name did not resolve against the header row
    ColumnNotFound(String),

    /// The key/value mapping contained no entries
    EmptyMapping,

    /// The mapping source was not a flat object of scalar values
    MalformedMapping(String),

    /// Filter matched zero rows (reportable; raised only in strict mode)
    NoMatchingRows(String),

    /// A batch entry exceeded its time budget
    EntryTimeout(u64),

    /// Spreadsheet file could not be opened or read
    Workbook(String),

    /// I/O errors (report writing, mapping file reads)
    Io(std::io::Error),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SheetNotFound(name) => write!(f, "Sheet not found: '{name}'"),
            Self::MalformedAddress(s) => write!(f, "Malformed cell address: '{s}'"),
            Self::HeaderRowNotFound => write!(f, "No header row found in sheet"),
            Self::ColumnNotFound(name) => write!(f, "Column not found: '{name}'"),
            Self::EmptyMapping => write!(f, "Key/value mapping is empty"),
            Self::MalformedMapping(msg) => write!(f, "Malformed mapping: {msg}"),
            Self::NoMatchingRows(value) => write!(f, "No rows matched filter value '{value}'"),
            Self::EntryTimeout(secs) => write!(f, "Entry timed out after {secs}s"),
            Self::Workbook(msg) => write!(f, "Workbook error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SiftError {}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for SiftError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<calamine::Error> for SiftError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedMapping(err.to_string())
    }
}

/// Result type alias for gridsift operations.
pub type Result<T> = std::result::Result<T, SiftError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SiftError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: SiftError = e.into();
            SiftError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: SiftError = e.into();
            SiftError::Other(format!("{}: {}", f(), err))
        })
    }
}
