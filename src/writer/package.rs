//! Serialized workbook parts.
use std::fs;
use std::path::Path;

use crate::common::Result;

/// One file of the package, addressed by its path inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub path: String,
    pub content: String,
}

/// The serialized parts of a workbook, in archive order.
///
/// Parts can be inspected directly or written out as a directory tree.
/// Zipping the tree into a `.xlsx` file is left to the caller's packager.
///
/// # Examples
///
/// ```rust,no_run
/// use plantilla::writer::Workbook;
///
/// # fn main() -> plantilla::Result<()> {
/// let mut workbook = Workbook::new();
/// workbook.add_worksheet("F. Resumen")?;
/// workbook.to_parts()?.write_to_dir("out/plan")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkbookParts {
    parts: Vec<Part>,
}

impl WorkbookParts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part. A part with the same path is replaced in place.
    pub fn push(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        match self.parts.iter_mut().find(|p| p.path == path) {
            Some(existing) => existing.content = content,
            None => self.parts.push(Part { path, content }),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.path == path)
            .map(|p| p.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Write every part as a plain file under `dir`, creating folders as needed.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for part in &self.parts {
            let target = dir.join(&part.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, part.content.as_bytes())?;
        }
        Ok(())
    }
}
