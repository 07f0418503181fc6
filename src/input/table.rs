use serde::Deserialize;

use super::rows::{ComponentRow, ElementRow, ElementType};
use crate::common::{Error, Result};

/// Name of the hierarchy table.
pub const HIERARCHY_TABLE: &str = "SDO & Result Indicators";
/// Name of the components table.
pub const COMPONENTS_TABLE: &str = "Solutions & Outputs";

pub const COL_ELEMENT_TYPE: &str = "Element type";
pub const COL_NUMBER: &str = "Number";
pub const COL_NAME: &str = "Name";
pub const COL_ID: &str = "ID";

/// A header + rows grid as delivered by the external tabular reader.
///
/// Cells are optional strings: `None` is a blank cell. Rows shorter than the
/// header are padded with blanks; rows longer than the header are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    /// Table (sheet) name, used in error messages.
    pub name: String,
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Create an empty table with the given header.
    pub fn new<S: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of non-blank cells.
    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows
            .push(cells.into_iter().map(|c| Some(c.into())).collect());
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a required column; header names are compared after trimming.
    fn column(&self, header: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == header)
            .ok_or_else(|| Error::schema(&self.name, format!("missing required column '{}'", header)))
    }

    /// Cell text at `(row, col)`; blanks and padded cells are empty strings.
    fn text<'a>(&self, row: &'a [Option<String>], col: usize) -> &'a str {
        row.get(col)
            .and_then(|cell| cell.as_deref())
            .map(str::trim)
            .unwrap_or("")
    }

    fn check_width(&self, index: usize, row: &[Option<String>]) -> Result<()> {
        if row.len() > self.headers.len() {
            return Err(Error::schema(
                &self.name,
                format!(
                    "row {} has {} cells but the header has {}",
                    index + 1,
                    row.len(),
                    self.headers.len()
                ),
            ));
        }
        Ok(())
    }

    /// Typed hierarchy rows.
    ///
    /// Requires `Element type`, `Number` and `Name`. Rows with a blank element
    /// type are skipped; rows with an unrecognised element type are skipped
    /// with a warning.
    pub fn element_rows(&self) -> Result<Vec<ElementRow>> {
        let type_col = self.column(COL_ELEMENT_TYPE)?;
        let number_col = self.column(COL_NUMBER)?;
        let name_col = self.column(COL_NAME)?;

        let mut out = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            self.check_width(index, row)?;

            let label = self.text(row, type_col);
            if label.is_empty() {
                continue;
            }
            let Some(element_type) = ElementType::from_label(label) else {
                tracing::warn!(
                    table = %self.name,
                    row = index + 1,
                    "skipping row with unknown element type '{}'",
                    label
                );
                continue;
            };

            out.push(ElementRow::new(
                element_type,
                self.text(row, number_col),
                self.text(row, name_col),
            ));
        }
        Ok(out)
    }

    /// Typed component rows, in table order.
    ///
    /// Requires `Element type`, `ID` and `Name`. All rows are returned;
    /// filtering on `Solution` happens in the matrix builder.
    pub fn component_rows(&self) -> Result<Vec<ComponentRow>> {
        let type_col = self.column(COL_ELEMENT_TYPE)?;
        let id_col = self.column(COL_ID)?;
        let name_col = self.column(COL_NAME)?;

        let mut out = Vec::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            self.check_width(index, row)?;
            out.push(ComponentRow::new(
                self.text(row, name_col),
                self.text(row, id_col),
                self.text(row, type_col),
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hierarchy_table() -> Table {
        let mut table = Table::new(HIERARCHY_TABLE, [COL_ELEMENT_TYPE, COL_NUMBER, COL_NAME]);
        table.push_row(["General Objective", "1", "Reduce poverty"]);
        table.push_row(["Specific Objective", "1.1", "Improve health"]);
        table.push_row(["Result indicator", "1.1.A", "Life expectancy"]);
        table
    }

    #[test]
    fn reads_element_rows() {
        let rows = hierarchy_table().element_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], ElementRow::indicator("1.1.A", "Life expectancy"));
    }

    #[test]
    fn missing_column_names_table_and_column() {
        let table = Table::new(COMPONENTS_TABLE, [COL_ELEMENT_TYPE, COL_NAME]);
        let err = table.component_rows().unwrap_err();
        match err {
            Error::InputSchema { table, message } => {
                assert_eq!(table, COMPONENTS_TABLE);
                assert!(message.contains("'ID'"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_order_does_not_matter() {
        let mut table = Table::new(COMPONENTS_TABLE, [" Name ", "ID", "Element type"]);
        table.push_row(["Clinic", "C-1", "Solution"]);
        let rows = table.component_rows().unwrap();
        assert_eq!(rows, vec![ComponentRow::solution("Clinic", "C-1")]);
    }

    #[test]
    fn skips_blank_and_unknown_types() {
        let mut table = hierarchy_table();
        table.rows.push(vec![None, Some("9.9".into()), Some("stray".into())]);
        table.push_row(["Output", "1.1.1", "Not part of the hierarchy"]);
        assert_eq!(table.element_rows().unwrap().len(), 3);
    }

    #[test]
    fn short_rows_are_padded_long_rows_rejected() {
        let mut table = Table::new(HIERARCHY_TABLE, [COL_ELEMENT_TYPE, COL_NUMBER, COL_NAME]);
        table.rows.push(vec![Some("Specific Objective".into()), Some("2.1".into())]);
        let rows = table.element_rows().unwrap();
        assert_eq!(rows[0].name, "");

        table.push_row(["Result indicator", "2.1.A", "x", "extra"]);
        assert!(matches!(
            table.element_rows(),
            Err(Error::InputSchema { .. })
        ));
    }
}
