//! XML helpers used by the SpreadsheetML writer.

pub mod escape;

pub use escape::escape_xml;
