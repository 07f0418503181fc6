//! Input rows and the tabular front door.
//!
//! The external tabular reader hands over two tables, "SDO & Result
//! Indicators" and "Solutions & Outputs", as header + row grids. This module
//! checks their columns and turns them into typed rows:
//!
//! - [`ElementRow`] for the objective hierarchy
//! - [`ComponentRow`] for the solution components evaluated against it
//!
//! Typed rows can also be built directly (or deserialized with serde) when the
//! caller already has structured data.

mod rows;
mod table;

pub use rows::{ComponentRow, ElementRow, ElementType};
pub use table::{
    COL_ELEMENT_TYPE, COL_ID, COL_NAME, COL_NUMBER, COMPONENTS_TABLE, HIERARCHY_TABLE, Table,
};
