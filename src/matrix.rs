//! Component × objective contribution matrix on the theory-of-change sheet.
//!
//! Solution components become rows; every objective contributes one column
//! for itself and one per indicator, starting at column R. Two formula
//! columns summarize each row: L flags any change in G..K, N flags any `2`
//! across the matrix row. The matrix range in N is computed from the
//! hierarchy, never a fixed window.

use crate::common::{CellRange, CellRef, Error, MAX_COLUMNS, Result};
use crate::hierarchy::{Hierarchy, ObjectiveKey};
use crate::input::ComponentRow;
use crate::layout::{FormulaCell, FormulaKind, GridPlan, MergeRole, StyleRole};

/// Banner text over the matrix.
pub const MATRIX_BANNER: &str = "B. Teoría de Cambio\n\
Para cada Objetivo Específico e Indicador marque:\n\
1 – si el producto contribuye a su logro\n\
2 – si el producto contribuye y es necesario para su logro";

/// Fixed coordinates of the component table and the matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionLayout {
    pub banner_row: u32,
    pub header_row: u32,
    pub first_row: u32,
    pub name_col: u32,
    pub id_col: u32,
    /// Last column of the bordered component table (O).
    pub table_last_col: u32,
    /// Change-type input columns summed by the sum flag (G..K).
    pub change_cols: (u32, u32),
    pub sum_flag_col: u32,
    pub max_flag_col: u32,
    /// First matrix column (R).
    pub start_col: u32,
    pub column_width: f64,
    /// Entry grid rows bordered even when fewer components exist.
    pub min_entry_rows: u32,
}

pub const CONTRIBUTION_LAYOUT: ContributionLayout = ContributionLayout {
    banner_row: 4,
    header_row: 5,
    first_row: 6,
    name_col: 1,
    id_col: 2,
    table_last_col: 15,
    change_cols: (7, 11),
    sum_flag_col: 12,
    max_flag_col: 14,
    start_col: 18,
    column_width: 19.0,
    min_entry_rows: 10,
};

/// What a matrix column stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixColumnKind {
    Objective,
    Indicator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixColumn {
    pub col: u32,
    pub key: ObjectiveKey,
    pub kind: MatrixColumnKind,
    pub label: String,
}

/// Placement of the matrix for one hierarchy and one component list.
#[derive(Debug, Clone)]
pub struct ContributionMatrix {
    layout: ContributionLayout,
    columns: Vec<MatrixColumn>,
    rows: Vec<(String, String)>,
}

impl ContributionMatrix {
    /// Compute columns and rows.
    ///
    /// Only components whose element type is `Solution` become rows, in
    /// input order.
    ///
    /// # Errors
    ///
    /// [`Error::MatrixDimension`] when the column count disagrees with the
    /// hierarchy or the matrix would run past the last worksheet column.
    pub fn build(
        hierarchy: &Hierarchy,
        components: &[ComponentRow],
        layout: ContributionLayout,
    ) -> Result<Self> {
        let mut columns = Vec::with_capacity(hierarchy.matrix_width() as usize);
        let mut col = layout.start_col;
        for node in hierarchy.nodes() {
            columns.push(MatrixColumn {
                col,
                key: node.key(),
                kind: MatrixColumnKind::Objective,
                label: node.display_name(),
            });
            col += 1;
            for indicator in node.indicators() {
                columns.push(MatrixColumn {
                    col,
                    key: node.key(),
                    kind: MatrixColumnKind::Indicator,
                    label: indicator.clone(),
                });
                col += 1;
            }
        }

        if columns.len() as u32 != hierarchy.matrix_width() {
            return Err(Error::MatrixDimension(format!(
                "placed {} columns for a hierarchy {} columns wide",
                columns.len(),
                hierarchy.matrix_width()
            )));
        }

        let matrix = Self {
            layout,
            columns,
            rows: components
                .iter()
                .filter(|c| c.is_solution())
                .map(|c| (c.name.clone(), c.id.clone()))
                .collect(),
        };

        if matrix.end_col() > MAX_COLUMNS {
            return Err(Error::MatrixDimension(format!(
                "matrix needs columns up to {} but a worksheet ends at {}",
                matrix.end_col(),
                MAX_COLUMNS
            )));
        }

        Ok(matrix)
    }

    pub fn columns(&self) -> &[MatrixColumn] {
        &self.columns
    }

    /// Number of data columns (objectives plus indicators).
    pub fn width(&self) -> u32 {
        self.columns.len() as u32
    }

    /// Number of component rows.
    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn start_col(&self) -> u32 {
        self.layout.start_col
    }

    /// Last column the matrix occupies. With no objectives the matrix still
    /// owns its first column, so the banner and row ranges stay non-empty.
    pub fn end_col(&self) -> u32 {
        self.layout.start_col + self.width().max(1) - 1
    }

    /// Matrix range of one row, as used by the max flag.
    pub fn row_range(&self, row: u32) -> CellRange {
        CellRange::row_span(row, self.layout.start_col, self.end_col())
    }

    /// Cells where contribution codes are entered, if any.
    pub fn body(&self) -> Option<CellRange> {
        if self.width() == 0 || self.rows.is_empty() {
            return None;
        }
        Some(CellRange::from_coords(
            self.layout.first_row,
            self.layout.start_col,
            self.layout.first_row + self.height() - 1,
            self.layout.start_col + self.width() - 1,
        ))
    }

    /// Write banner, headers, component rows and formulas into `plan`.
    pub fn apply(&self, plan: &mut GridPlan) -> Result<()> {
        let layout = &self.layout;

        let banner = CellRange::row_span(layout.banner_row, layout.start_col, self.end_col());
        plan.set_text(banner.start(), MATRIX_BANNER);
        plan.style_range(banner, StyleRole::GroupBanner);
        if !banner.is_single() {
            plan.merge(banner, MergeRole::Banner)?;
        }

        for column in &self.columns {
            let cell = CellRef::new(layout.header_row, column.col);
            plan.set_text(cell, column.label.as_str());
            plan.set_style(cell, StyleRole::MatrixHeader);
        }
        for col in layout.start_col..=self.end_col() {
            plan.set_column_width(col, layout.column_width);
        }

        let (change_first, change_last) = layout.change_cols;
        for (offset, (name, id)) in self.rows.iter().enumerate() {
            let row = layout.first_row + offset as u32;

            plan.style_range(
                CellRange::row_span(row, 1, layout.table_last_col),
                StyleRole::InputCell,
            );
            plan.set_text(CellRef::new(row, layout.name_col), name.as_str());
            plan.set_text(CellRef::new(row, layout.id_col), id.as_str());
            plan.set_style(CellRef::new(row, layout.name_col), StyleRole::IndicatorCell);
            plan.set_style(CellRef::new(row, layout.id_col), StyleRole::IndicatorCell);

            plan.add_formula(FormulaCell {
                cell: CellRef::new(row, layout.sum_flag_col),
                kind: FormulaKind::SumFlag,
                range: CellRange::row_span(row, change_first, change_last),
            })?;
            plan.add_formula(FormulaCell {
                cell: CellRef::new(row, layout.max_flag_col),
                kind: FormulaKind::MaxFlag,
                range: self.row_range(row),
            })?;
        }

        let grid_rows = self.height().max(layout.min_entry_rows);
        if self.width() > 0 && grid_rows > 0 {
            let grid = CellRange::from_coords(
                layout.first_row,
                layout.start_col,
                layout.first_row + grid_rows - 1,
                layout.start_col + self.width() - 1,
            );
            plan.style_range(grid, StyleRole::MatrixCell);
        }
        plan.set_data_end(layout.first_row + self.height());

        tracing::debug!(
            sheet = plan.sheet_name(),
            columns = self.width(),
            rows = self.height(),
            end_col = self.end_col(),
            "placed contribution matrix"
        );

        Ok(())
    }
}

/// Build the matrix for `hierarchy` and `components` and write it into
/// `plan` using the canonical layout.
pub fn place_contribution_matrix(
    plan: &mut GridPlan,
    hierarchy: &Hierarchy,
    components: &[ComponentRow],
) -> Result<ContributionMatrix> {
    let matrix = ContributionMatrix::build(hierarchy, components, CONTRIBUTION_LAYOUT)?;
    matrix.apply(plan)?;
    Ok(matrix)
}
