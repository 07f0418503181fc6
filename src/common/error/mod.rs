//! Error types for plantilla.

pub mod types;

pub use types::{Error, Result};
