//! Plantilla - planning workbooks from an objective hierarchy
//!
//! This library turns two flat tables, the "SDO & Result Indicators"
//! hierarchy and the "Solutions & Outputs" components, into the four sheets
//! of a project planning workbook, and writes them as SpreadsheetML.
//!
//! # Pipeline
//!
//! - **Input**: typed rows, or header + row tables with column checks
//! - **Hierarchy**: objectives keyed by their dotted number, sorted as integers
//! - **Layout**: one [`layout::GridPlan`] per sheet with merges, styles and
//!   validation ranges that follow the hierarchy's size
//! - **Matrix**: component × objective contribution grid with its flag formulas
//! - **Render**: replays plans onto any [`render::DocumentSink`]
//! - **Writer**: SpreadsheetML parts, ready for an external packager
//!
//! Planning is pure: no I/O and no shared state, so independent inputs can be
//! planned concurrently.
//!
//! # Example
//!
//! ```no_run
//! use plantilla::input::{ComponentRow, ElementRow};
//! use plantilla::report::{render_workbook, transform};
//!
//! # fn main() -> plantilla::Result<()> {
//! let hierarchy = vec![
//!     ElementRow::general("1", "Better lives"),
//!     ElementRow::objective("1.1", "Improve health"),
//!     ElementRow::indicator("1.1.A", "Life expectancy"),
//!     ElementRow::indicator("1.1.B", "Infant mortality"),
//! ];
//! let components = vec![ComponentRow::solution("Rural clinics", "S1")];
//!
//! let plans = transform(&hierarchy, &components)?;
//! for plan in &plans {
//!     println!("{}: last data row {:?}", plan.sheet_name(), plan.last_data_row());
//! }
//!
//! render_workbook(&plans)?.write_to_dir("out/plan")?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod hierarchy;
pub mod input;
pub mod layout;
pub mod matrix;
pub mod render;
pub mod report;
pub mod validation;
pub mod writer;

pub use common::{Error, Result};
pub use report::{Project, ReportOptions, render_workbook, transform, transform_tables, transform_with};
