//! Sheet planning.
//!
//! A sheet is described twice: statically by its [`SheetTemplate`] (fixed
//! titles, headers and column roles) and per run by a [`GridPlan`], the
//! fully resolved list of values, style roles, merges, formulas and
//! validation bindings. Plans carry no rendering details; the renderer maps
//! style roles to concrete formats.
//!
//! # Examples
//!
//! ```
//! use plantilla::hierarchy::Hierarchy;
//! use plantilla::input::ElementRow;
//! use plantilla::layout::{TemplateKind, plan_sheet};
//!
//! let hierarchy = Hierarchy::build(&[
//!     ElementRow::objective("1.1", "Improve health"),
//!     ElementRow::indicator("1.1.A", "Life expectancy"),
//!     ElementRow::indicator("1.1.B", "Infant mortality"),
//! ])?;
//! let plan = plan_sheet(TemplateKind::Summary.template(), &hierarchy)?;
//! assert_eq!(plan.first_data_row(), 7);
//! assert_eq!(plan.last_data_row(), Some(8));
//! # Ok::<(), plantilla::Error>(())
//! ```

mod plan;
mod planner;
mod template;
mod templates;

pub use plan::{Block, FormulaCell, FormulaKind, GridPlan, MergeRegion, MergeRole, StyleRole};
pub use planner::{plan_empty_sheet, plan_headers, plan_sheet};
pub use template::{
    ColumnRole, DataColumn, DataLayout, FixedCell, ListColumn, SheetTemplate, TemplateKind,
    TrailingRows,
};
