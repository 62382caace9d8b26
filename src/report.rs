//! Diagnostics produced while parsing a blueprint
//!
//! A [`Report`] collects at most one fatal [`Error`] and an ordered list of [`Warning`]s.
//! Warnings are de-duplicated at insertion time: a warning with the same source ranges,
//! the same code and the same message as one already recorded is dropped.
//!
//! Every diagnostic references a [`SourceRangeSet`], the byte ranges of the source
//! blocks the diagnostic applies to.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A contiguous run of characters in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub location: usize,
    pub length: usize,
}

impl SourceRange {
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn span(&self) -> Range<usize> {
        self.location..self.location + self.length
    }
}

impl From<Range<usize>> for SourceRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end.saturating_sub(range.start))
    }
}

/// Source blocks a diagnostic refers to
pub type SourceRangeSet = Vec<SourceRange>;

/// Classification of a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    Formatting,
    Ignoring,
    Uri,
}

impl WarningCode {
    /// Numeric code as exposed in serialized annotations
    pub fn code(self) -> u32 {
        match self {
            WarningCode::Formatting => 3,
            WarningCode::Ignoring => 5,
            WarningCode::Uri => 12,
        }
    }
}

/// Classification of a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Application,
    Business,
}

impl ErrorCode {
    pub fn code(self) -> u32 {
        match self {
            ErrorCode::Application => 1,
            ErrorCode::Business => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
    pub code: WarningCode,
    pub location: SourceRangeSet,
}

impl Warning {
    pub fn new(message: impl Into<String>, code: WarningCode, location: SourceRangeSet) -> Self {
        Self {
            message: message.into(),
            code,
            location,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning ({}): {}", self.code.code(), self.message)?;
        for range in &self.location {
            write!(f, "; [{}:{}]", range.location, range.length)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    pub message: String,
    pub code: ErrorCode,
    pub location: SourceRangeSet,
}

impl Error {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            location: SourceRangeSet::new(),
        }
    }

    pub fn with_location(mut self, location: SourceRangeSet) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error ({}): {}", self.code.code(), self.message)
    }
}

impl std::error::Error for Error {}

/// Accumulated diagnostics of one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning unless an identical one was already recorded.
    ///
    /// Returns `true` when the warning was inserted.
    pub fn warn(&mut self, warning: Warning) -> bool {
        if self.warnings.contains(&warning) {
            return false;
        }
        self.warnings.push(warning);
        true
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
