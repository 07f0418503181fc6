//! Rendering grid plans onto a spreadsheet backend.
//!
//! The renderer walks a finished [`GridPlan`] and replays it against a
//! [`SheetSink`]: widths and heights, formats resolved from style roles
//! through a [`Palette`], values, formulas, merges and dropdown lists. Any
//! backend that implements the two sink traits can receive a workbook; the
//! crate ships the SpreadsheetML writer in [`crate::writer`].

pub mod format;
mod palette;

pub use format::{
    CellAlignment, CellBorder, CellBorderLineStyle, CellBorderSide, CellFill, CellFillPatternType,
    CellFont, CellFormat, HorizontalAlignment, VerticalAlignment,
};
pub use palette::Palette;

use std::collections::HashMap;

use crate::common::{CellRange, CellRef, Result};
use crate::layout::{GridPlan, StyleRole};

/// Cell-level operations a spreadsheet backend must provide.
pub trait SheetSink {
    fn set_text(&mut self, cell: CellRef, text: &str);

    /// Set a formula; `formula` has no leading `=`.
    fn set_formula(&mut self, cell: CellRef, formula: &str);

    fn set_format(&mut self, cell: CellRef, format: &CellFormat);

    fn merge(&mut self, range: CellRange);

    fn add_list_validation(&mut self, range: CellRange, options: &[&str]);

    fn set_column_width(&mut self, col: u32, width: f64);

    fn set_row_height(&mut self, row: u32, height: f64);
}

/// A workbook that hands out sheets in creation order.
pub trait DocumentSink {
    type Sheet: SheetSink;

    fn add_sheet(&mut self, name: &str) -> Result<&mut Self::Sheet>;
}

/// Replays grid plans onto a [`DocumentSink`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render every plan as one sheet, in order.
    pub fn render<D: DocumentSink>(&self, plans: &[GridPlan], doc: &mut D) -> Result<()> {
        for plan in plans {
            let sheet = doc.add_sheet(plan.sheet_name())?;
            self.render_sheet(plan, sheet);
        }
        Ok(())
    }

    /// Render one plan onto an existing sheet.
    pub fn render_sheet<S: SheetSink>(&self, plan: &GridPlan, sheet: &mut S) {
        for (col, width) in plan.column_widths() {
            sheet.set_column_width(col, width);
        }
        for (row, height) in plan.row_heights() {
            sheet.set_row_height(row, height);
        }

        let mut formats: HashMap<StyleRole, CellFormat> = HashMap::new();
        for (cell, role) in plan.styles() {
            let format = formats
                .entry(role)
                .or_insert_with(|| self.palette.format(role));
            sheet.set_format(cell, format);
        }

        for (cell, text) in plan.values() {
            sheet.set_text(cell, text);
        }
        for formula in plan.formulas() {
            sheet.set_formula(formula.cell, &formula.expression());
        }

        // A one-cell merge is a no-op for every backend.
        for region in plan.merges() {
            if !region.range.is_single() {
                sheet.merge(region.range);
            }
        }

        for binding in plan.validations() {
            sheet.add_list_validation(binding.range(), binding.list().options);
        }

        tracing::debug!(
            sheet = plan.sheet_name(),
            values = plan.values().count(),
            merges = plan.merges().len(),
            validations = plan.validations().len(),
            "rendered sheet"
        );
    }
}
