//! Error types for profile parsing and ordering.
//!
//! Every variant except [`ProfileError::MissingProfilePath`] is fatal for the
//! parse that produced it: the caller must not trust a partially filled
//! [`MethodProfiles`](crate::profiles::MethodProfiles) after an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for method profile operations
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No profile file was configured
    #[error("No method profile file given")]
    MissingProfilePath,

    /// File system related errors
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixed header column does not carry its expected name
    #[error("Unexpected header (column {column}): {found:?} != {expected:?}")]
    HeaderMismatch {
        column: usize,
        found: String,
        expected: &'static str,
    },

    /// Metadata header with a non-blank column past `appear#`
    #[error("Unexpected metadata column {column}: {found:?}")]
    UnexpectedMetadataColumn { column: usize, found: String },

    /// Data row that ends before a fixed column
    #[error("Missing column {column} ({expected})")]
    MissingColumn {
        column: usize,
        expected: &'static str,
    },

    /// Line that is not valid UTF-8
    #[error("Line is not valid UTF-8: {source}")]
    InvalidEncoding {
        #[source]
        source: std::str::Utf8Error,
    },

    /// Method table has handed out every handle
    #[error("Method table is full ({count} methods)")]
    TooManyMethods { count: usize },

    /// Data row with a column the header did not declare as interpretable
    #[error("Unknown extra column {column}")]
    UnknownColumn { column: usize },

    /// Cell that is not a well-formed integer
    #[error("Can't parse {token:?} into an integer")]
    InvalidInteger { token: String },

    /// Cell that is not a well-formed floating-point number
    #[error("Can't parse {token:?} into a double")]
    InvalidDouble { token: String },

    /// Integer cell outside the range of its field
    #[error("Value {value} out of range for {field}")]
    OutOfRange { field: &'static str, value: i64 },

    /// Wraps any line-level failure with its 1-based line number
    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<ProfileError>,
    },

    /// Broken invariant; indicates a bug rather than bad input
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the line number a failure occurred on
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }

    /// Whether this error is the soft "nothing to parse" case
    pub fn is_missing_path(&self) -> bool {
        matches!(self, Self::MissingProfilePath)
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ProfileError>;
