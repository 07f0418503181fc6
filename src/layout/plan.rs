//! The renderer-agnostic description of one sheet.

use std::collections::BTreeMap;

use super::template::TemplateKind;
use crate::common::{CellRange, CellRef, Error, Result};
use crate::hierarchy::ObjectiveKey;
use crate::validation::ValidationBinding;

/// What a cell is for. The renderer maps roles to concrete formats; the plan
/// only records which region plays which role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleRole {
    /// Sheet title (row 1)
    Title,
    /// Instruction line under the title
    Instructions,
    /// Free-text note or guiding question above the table
    Note,
    /// Banner over a group of columns (objective/result group)
    GroupBanner,
    /// Banner under a group banner naming the kind of challenge
    SubBanner,
    /// Header of a descriptive column
    ColumnHeader,
    /// Descriptive column header written vertically
    VerticalColumnHeader,
    /// Header of a column the user fills in
    SectionHeader,
    /// Header of a column carrying reference or challenge information
    ReferenceHeader,
    /// Header phrased as a question
    QuestionHeader,
    /// Header of an assumptions column
    AssumptionHeader,
    /// Header of a derived (formula) column
    DerivedHeader,
    /// Derived column header written vertically
    VerticalDerivedHeader,
    /// Header of a free-text explanation column
    ExplanationHeader,
    /// Objective/indicator names across the contribution matrix
    MatrixHeader,
    /// General objective label spanning the data region
    GeneralObjectiveCell,
    /// Objective name spanning its block
    ObjectiveCell,
    /// Indicator name or component name
    IndicatorCell,
    /// Empty bordered cell for user input
    InputCell,
    /// Contribution matrix body cell
    MatrixCell,
    /// Fixed trailing rows outside the hierarchy
    TrailingBlock,
}

impl StyleRole {
    /// Role of the merge region when a fixed cell spans several cells.
    pub fn merge_role(&self) -> MergeRole {
        match self {
            Self::GroupBanner | Self::SubBanner => MergeRole::Banner,
            _ => MergeRole::Header,
        }
    }
}

/// Why a merge region exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeRole {
    /// One block of one objective
    PerObjective,
    /// General objective label spanning every block
    GeneralObjective,
    /// Group or sub banner
    Banner,
    /// Title, instruction or column header
    Header,
}

/// A rectangular region rendered as one logical cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRegion {
    pub range: CellRange,
    pub role: MergeRole,
}

/// Contiguous rows occupied by one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub key: ObjectiveKey,
    pub start_row: u32,
    pub end_row: u32,
}

impl Block {
    /// Number of rows in the block.
    pub fn height(&self) -> u32 {
        self.end_row - self.start_row + 1
    }
}

/// Kind of derived per-row formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    /// 1 when the referenced cells sum to more than zero
    SumFlag,
    /// 1 when the largest referenced value equals 2
    MaxFlag,
}

/// A formula cell with a structured range; the formula text is generated
/// from the range when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaCell {
    pub cell: CellRef,
    pub kind: FormulaKind,
    pub range: CellRange,
}

impl FormulaCell {
    /// Formula text without the leading `=`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantilla::common::{CellRange, CellRef};
    /// use plantilla::layout::{FormulaCell, FormulaKind};
    ///
    /// let cell = FormulaCell {
    ///     cell: CellRef::new(6, 12),
    ///     kind: FormulaKind::SumFlag,
    ///     range: CellRange::row_span(6, 7, 11),
    /// };
    /// assert_eq!(cell.expression(), "IF(SUM(G6:K6)>0,1,0)");
    /// ```
    pub fn expression(&self) -> String {
        match self.kind {
            FormulaKind::SumFlag => format!("IF(SUM({})>0,1,0)", self.range),
            FormulaKind::MaxFlag => format!("IF(MAX({})=2,1,0)", self.range),
        }
    }
}

/// Complete description of one sheet: values, style roles, merges, formulas
/// and validation bindings, plus the data extent downstream stages key off.
#[derive(Debug, Clone)]
pub struct GridPlan {
    kind: TemplateKind,
    sheet_name: String,
    values: BTreeMap<CellRef, String>,
    styles: BTreeMap<CellRef, StyleRole>,
    merges: Vec<MergeRegion>,
    formulas: Vec<FormulaCell>,
    validations: Vec<ValidationBinding>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    blocks: Vec<Block>,
    first_data_row: u32,
    /// First row after the data region (the planner's final cursor).
    data_end: u32,
    trailing: Option<CellRange>,
}

impl GridPlan {
    /// Empty plan whose data region starts (and, for now, ends) at
    /// `first_data_row`.
    pub fn new(kind: TemplateKind, sheet_name: impl Into<String>, first_data_row: u32) -> Self {
        Self {
            kind,
            sheet_name: sheet_name.into(),
            values: BTreeMap::new(),
            styles: BTreeMap::new(),
            merges: Vec::new(),
            formulas: Vec::new(),
            validations: Vec::new(),
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            blocks: Vec::new(),
            first_data_row,
            data_end: first_data_row,
            trailing: None,
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Set the text of a cell, replacing any previous text.
    pub fn set_text(&mut self, cell: CellRef, text: impl Into<String>) {
        self.values.insert(cell, text.into());
    }

    pub fn text(&self, cell: CellRef) -> Option<&str> {
        self.values.get(&cell).map(String::as_str)
    }

    /// All text cells in row-major order.
    pub fn values(&self) -> impl Iterator<Item = (CellRef, &str)> {
        self.values.iter().map(|(cell, text)| (*cell, text.as_str()))
    }

    pub fn set_style(&mut self, cell: CellRef, role: StyleRole) {
        self.styles.insert(cell, role);
    }

    /// Give every cell of `range` the same role.
    pub fn style_range(&mut self, range: CellRange, role: StyleRole) {
        for cell in range.cells() {
            self.styles.insert(cell, role);
        }
    }

    pub fn style(&self, cell: CellRef) -> Option<StyleRole> {
        self.styles.get(&cell).copied()
    }

    /// All styled cells in row-major order.
    pub fn styles(&self) -> impl Iterator<Item = (CellRef, StyleRole)> + '_ {
        self.styles.iter().map(|(cell, role)| (*cell, *role))
    }

    /// Record a merge region.
    ///
    /// # Errors
    ///
    /// [`Error::Layout`] when the range is inverted or overlaps an existing
    /// region.
    pub fn merge(&mut self, range: CellRange, role: MergeRole) -> Result<()> {
        if !range.is_valid() {
            return Err(Error::Layout(format!(
                "invalid merge range {} on sheet '{}'",
                range, self.sheet_name
            )));
        }
        if let Some(existing) = self.merges.iter().find(|m| m.range.intersects(&range)) {
            return Err(Error::Layout(format!(
                "merge {} overlaps {} on sheet '{}'",
                range, existing.range, self.sheet_name
            )));
        }
        self.merges.push(MergeRegion { range, role });
        Ok(())
    }

    pub fn merges(&self) -> &[MergeRegion] {
        &self.merges
    }

    /// Merge region containing `cell`, if any.
    pub fn merge_at(&self, cell: CellRef) -> Option<&MergeRegion> {
        self.merges.iter().find(|m| m.range.contains(cell))
    }

    /// Attach a derived formula.
    ///
    /// # Errors
    ///
    /// [`Error::Layout`] when the cell already holds text or its range is
    /// inverted.
    pub fn add_formula(&mut self, formula: FormulaCell) -> Result<()> {
        if !formula.range.is_valid() {
            return Err(Error::Layout(format!(
                "invalid formula range {} at {}",
                formula.range, formula.cell
            )));
        }
        if self.values.contains_key(&formula.cell) {
            return Err(Error::Layout(format!(
                "formula cell {} already holds text",
                formula.cell
            )));
        }
        self.formulas.push(formula);
        Ok(())
    }

    pub fn formulas(&self) -> &[FormulaCell] {
        &self.formulas
    }

    pub(crate) fn push_validation(&mut self, binding: ValidationBinding) {
        self.validations.push(binding);
    }

    pub fn validations(&self) -> &[ValidationBinding] {
        &self.validations
    }

    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.column_widths.iter().map(|(c, w)| (*c, *w))
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.row_heights.iter().map(|(r, h)| (*r, *h))
    }

    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Objective blocks in layout order (empty for component sheets).
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// First row of the data region.
    pub fn first_data_row(&self) -> u32 {
        self.first_data_row
    }

    /// First free row after the data region.
    pub fn data_end(&self) -> u32 {
        self.data_end
    }

    pub(crate) fn set_data_end(&mut self, data_end: u32) {
        self.data_end = data_end.max(self.first_data_row);
    }

    /// Last row of the data region, or `None` when no data rows were planned.
    pub fn last_data_row(&self) -> Option<u32> {
        (self.data_end > self.first_data_row).then(|| self.data_end - 1)
    }

    /// Number of rows in the data region.
    pub fn data_row_count(&self) -> u32 {
        self.data_end - self.first_data_row
    }

    pub(crate) fn set_trailing(&mut self, range: CellRange) {
        self.trailing = Some(range);
    }

    /// Fixed trailing rows after the data region, if the template has them.
    pub fn trailing(&self) -> Option<CellRange> {
        self.trailing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> GridPlan {
        GridPlan::new(TemplateKind::Summary, "F. Resumen", 7)
    }

    #[test]
    fn rejects_overlapping_merges() {
        let mut plan = plan();
        plan.merge(CellRange::row_span(4, 8, 11), MergeRole::Banner)
            .unwrap();
        let err = plan
            .merge(CellRange::row_span(4, 11, 16), MergeRole::Banner)
            .unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
        plan.merge(CellRange::row_span(4, 12, 16), MergeRole::Banner)
            .unwrap();
        assert_eq!(plan.merges().len(), 2);
    }

    #[test]
    fn rejects_inverted_merge() {
        let mut plan = plan();
        assert!(
            plan.merge(CellRange::column_span(1, 8, 7), MergeRole::PerObjective)
                .is_err()
        );
    }

    #[test]
    fn formula_cannot_replace_text() {
        let mut plan = plan();
        let cell = CellRef::new(7, 12);
        plan.set_text(cell, "label");
        let formula = FormulaCell {
            cell,
            kind: FormulaKind::MaxFlag,
            range: CellRange::row_span(7, 18, 20),
        };
        assert!(plan.add_formula(formula).is_err());
    }

    #[test]
    fn data_extent_without_rows() {
        let mut plan = plan();
        assert_eq!(plan.last_data_row(), None);
        assert_eq!(plan.data_row_count(), 0);
        plan.set_data_end(10);
        assert_eq!(plan.last_data_row(), Some(9));
        assert_eq!(plan.data_row_count(), 3);
    }

    #[test]
    fn max_flag_expression_uses_range() {
        let formula = FormulaCell {
            cell: CellRef::new(6, 14),
            kind: FormulaKind::MaxFlag,
            range: CellRange::row_span(6, 18, 23),
        };
        assert_eq!(formula.expression(), "IF(MAX(R6:W6)=2,1,0)");
    }
}
