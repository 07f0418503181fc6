//! Common types and utilities shared across the pipeline.
//!
//! Error reporting, cell coordinates and XML escaping live here so that the
//! planning modules and the SpreadsheetML writer agree on a single notion of
//! a cell and a failure.

// Submodule declarations
pub mod coords;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use coords::{CellRange, CellRef, MAX_COLUMNS, MAX_ROWS, column_letters};
pub use error::{Error, Result};
