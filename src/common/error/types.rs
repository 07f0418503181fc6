//! Error type shared by every stage of the workbook pipeline.
use thiserror::Error;

/// Main error type for plantilla operations.
///
/// All variants are terminal for the input being processed: the transform is
/// deterministic, so retrying the same input yields the same error.
#[derive(Error, Debug)]
pub enum Error {
    /// A required column is missing from an input table, or a row does not
    /// match the table header.
    #[error("Input schema error in table '{table}': {message}")]
    InputSchema { table: String, message: String },

    /// An element `Number` could not be split into dot-delimited integers.
    #[error("Malformed element number '{number}': {reason}")]
    MalformedNumber { number: String, reason: String },

    /// The hierarchy table produced no objective nodes.
    #[error("Hierarchy is empty: no objective nodes were produced")]
    EmptyHierarchy,

    /// The contribution matrix bounds are inconsistent with the hierarchy.
    ///
    /// Only reachable through an internal computation bug or a hierarchy
    /// wider than a worksheet.
    #[error("Matrix dimension error: {0}")]
    MatrixDimension(String),

    /// A layout plan violated one of its own invariants (overlapping merges,
    /// inverted ranges).
    #[error("Layout error: {0}")]
    Layout(String),

    /// A YAML project description could not be deserialized
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Formatting into an XML buffer failed
    #[error("XML write error: {0}")]
    Xml(#[from] std::fmt::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an [`Error::InputSchema`] for the named table.
    pub(crate) fn schema(table: &str, message: impl Into<String>) -> Self {
        Self::InputSchema {
            table: table.to_string(),
            message: message.into(),
        }
    }

    /// Build an [`Error::MalformedNumber`] for the given raw number.
    pub(crate) fn malformed(number: &str, reason: impl Into<String>) -> Self {
        Self::MalformedNumber {
            number: number.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for plantilla operations.
pub type Result<T> = std::result::Result<T, Error>;
