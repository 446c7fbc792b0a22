//! Rich diagnostic error types for shelfmark.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know what went wrong in the
//! input and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for shelfmark.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ShelfmarkError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read record file: {path}")]
    #[diagnostic(
        code(shelfmark::io),
        help("Check that the file exists, is readable, and is valid UTF-8.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Record format errors
// ---------------------------------------------------------------------------

/// Malformed ingestion input. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FormatError {
    #[error("line {line}: every entry must start with a \"{marker}\" record marker")]
    #[diagnostic(
        code(shelfmark::format::missing_marker),
        help(
            "Field lines are only valid inside a record. Begin each entry with a \
             line starting with \"{marker}\" (for example \"{marker}:\")."
        )
    )]
    MissingRecordMarker { marker: &'static str, line: usize },

    #[error("line {line}: expected \"key: value\"")]
    #[diagnostic(
        code(shelfmark::format::missing_delimiter),
        help("Separate the field name from its value with a colon, e.g. \"Title: Texts from Denmark\".")
    )]
    MissingDelimiter { line: usize },

    #[error("line {line}: unrecognized field key \"{key}\"")]
    #[diagnostic(
        code(shelfmark::format::unknown_key),
        help(
            "Recognized book keys are ISBN, Title, Author (or Authors), Publisher, \
             Published (or PublicationYear) and NumberOfPages. Keys are case-sensitive."
        )
    )]
    UnknownKey { key: String, line: usize },

    #[error("line {line}: value \"{value}\" for \"{key}\" is not an integer")]
    #[diagnostic(
        code(shelfmark::format::invalid_integer),
        help("This field holds a whole number written in base 10, e.g. \"Published: 2001\".")
    )]
    InvalidInteger {
        key: String,
        value: String,
        line: usize,
    },
}

impl FormatError {
    /// 1-based input line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            Self::MissingRecordMarker { line, .. }
            | Self::MissingDelimiter { line }
            | Self::UnknownKey { line, .. }
            | Self::InvalidInteger { line, .. } => *line,
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InventoryError {
    #[error("when a shelf number is provided, a row number must also be provided")]
    #[diagnostic(
        code(shelfmark::inventory::shelf_without_row),
        help(
            "Shelf numbers are only unique within a row. Pass the row as well, \
             e.g. `shelfmark inventory --room 1 --row 2 --shelf 1`."
        )
    )]
    ShelfWithoutRow,
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(shelfmark::config::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(shelfmark::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(shelfmark::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("invalid shelf location \"{input}\"")]
    #[diagnostic(
        code(shelfmark::config::invalid_location),
        help(
            "A location is three positive numbers: room/row/shelf, e.g. \"1/2/1\". \
             When loading a file from the command line use LOCATION=PATH."
        )
    )]
    InvalidLocation { input: String },
}

/// Convenience alias for shelfmark results.
pub type ShelfmarkResult<T> = std::result::Result<T, ShelfmarkError>;
