//! Static sheet descriptions.
//!
//! A [`SheetTemplate`] says which fixed cells a sheet carries, where its data
//! region starts and what each data column holds. The planner reads these
//! declarations; nothing in here depends on a particular hierarchy.

use serde::Deserialize;
use std::fmt;

use super::plan::StyleRole;
use super::templates::{DEVELOPMENT_CHALLENGE, RESULT_MEASUREMENT, SUMMARY, THEORY_OF_CHANGE};
use crate::common::CellRange;
use crate::validation::OptionList;

/// The four planning sheets, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    /// `C. Desafío`
    DevelopmentChallenge,
    /// `D. Teoría de Cambio`
    TheoryOfChange,
    /// `E. Medición`
    ResultMeasurement,
    /// `F. Resumen`
    Summary,
}

impl TemplateKind {
    /// Every template in workbook order.
    pub const ALL: [TemplateKind; 4] = [
        Self::DevelopmentChallenge,
        Self::TheoryOfChange,
        Self::ResultMeasurement,
        Self::Summary,
    ];

    /// The static description of this sheet.
    pub fn template(&self) -> &'static SheetTemplate {
        match self {
            Self::DevelopmentChallenge => &DEVELOPMENT_CHALLENGE,
            Self::TheoryOfChange => &THEORY_OF_CHANGE,
            Self::ResultMeasurement => &RESULT_MEASUREMENT,
            Self::Summary => &SUMMARY,
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        self.template().sheet_name
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// A title, instruction or header written at the same place on every run.
///
/// A range wider or taller than one cell becomes a merge region.
#[derive(Debug, Clone, Copy)]
pub struct FixedCell {
    pub range: CellRange,
    pub text: &'static str,
    pub role: StyleRole,
}

impl FixedCell {
    pub const fn new(range: CellRange, text: &'static str, role: StyleRole) -> Self {
        Self { range, text, role }
    }
}

/// What a data column holds for each objective block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// General objective label, one merge over the whole data region
    GeneralObjective,
    /// Objective display name, one merge per block
    ObjectiveName,
    /// Blank input, one merge per block
    ObjectiveInput,
    /// Indicator name, one cell per indicator row
    IndicatorName,
    /// Blank input, one cell per indicator row
    IndicatorInput,
}

/// One column of the data region.
#[derive(Debug, Clone, Copy)]
pub struct DataColumn {
    pub col: u32,
    pub role: ColumnRole,
}

impl DataColumn {
    pub const fn new(col: u32, role: ColumnRole) -> Self {
        Self { col, role }
    }
}

/// Fixed labelled rows emitted right after the data region.
#[derive(Debug, Clone, Copy)]
pub struct TrailingRows {
    pub labels: &'static [&'static str],
    pub label_col: u32,
    pub first_col: u32,
    pub last_col: u32,
}

/// A dropdown list bound to a data column over the data rows.
#[derive(Debug, Clone, Copy)]
pub struct ListColumn {
    pub col: u32,
    pub list: &'static OptionList,
}

impl ListColumn {
    pub const fn new(col: u32, list: &'static OptionList) -> Self {
        Self { col, list }
    }
}

/// How the data region is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLayout {
    /// One block of rows per objective, one row per indicator
    PerObjective,
    /// One row per solution component plus the contribution matrix
    Components,
}

/// Static description of one sheet.
#[derive(Debug)]
pub struct SheetTemplate {
    pub kind: TemplateKind,
    pub sheet_name: &'static str,
    pub fixed: &'static [FixedCell],
    pub first_data_row: u32,
    pub layout: DataLayout,
    pub columns: &'static [DataColumn],
    /// `(column, width)` pairs in characters.
    pub column_widths: &'static [(u32, f64)],
    /// `(row, height)` pairs in points.
    pub row_heights: &'static [(u32, f64)],
    pub trailing: Option<TrailingRows>,
    pub lists: &'static [ListColumn],
}

impl SheetTemplate {
    /// Rightmost column the template's own cells reach.
    pub fn last_column(&self) -> u32 {
        let fixed = self.fixed.iter().map(|f| f.range.end().col());
        let data = self.columns.iter().map(|c| c.col);
        fixed.chain(data).max().unwrap_or(1)
    }
}
