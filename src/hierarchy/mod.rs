//! Objective hierarchy built from the flat element table.
//!
//! Element numbers are dotted identifiers: `1.1` names a specific objective and
//! `1.1.A` an indicator under it. The first two numeric components form the
//! [`ObjectiveKey`]; nodes are ordered by that key compared as integers, so
//! `1.2` sorts before `1.10`.
//!
//! # Example
//!
//! ```
//! use plantilla::hierarchy::Hierarchy;
//! use plantilla::input::ElementRow;
//!
//! let rows = vec![
//!     ElementRow::indicator("1.10.A", "Enrolment"),
//!     ElementRow::objective("1.2", "Improve health"),
//!     ElementRow::objective("1.10", "Improve education"),
//! ];
//! let hierarchy = Hierarchy::build(&rows)?;
//! let keys: Vec<String> = hierarchy.nodes().iter().map(|n| n.key().to_string()).collect();
//! assert_eq!(keys, ["1.2", "1.10"]);
//! assert_eq!(hierarchy.general_objective(), "[Objetivo General]");
//! # Ok::<(), plantilla::Error>(())
//! ```

mod builder;
mod number;

pub use builder::{GENERAL_OBJECTIVE_PLACEHOLDER, Hierarchy, ObjectiveNode};
pub use number::{ElementNumber, ObjectiveKey};
