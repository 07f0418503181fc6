//! SpreadsheetML writer.
//!
//! [`Workbook`] implements [`crate::render::DocumentSink`], so a
//! [`crate::render::Renderer`] can replay grid plans straight into it. The
//! finished workbook serializes into [`WorkbookParts`]: plain XML strings that
//! can be inspected or written out as a folder for packaging.

mod package;
mod sheet;
mod strings;
mod styles;
mod workbook;

pub use package::{Part, WorkbookParts};
pub use sheet::{CellValue, ListValidation, Worksheet};
pub use strings::SharedStrings;
pub use styles::StylesBuilder;
pub use workbook::Workbook;
