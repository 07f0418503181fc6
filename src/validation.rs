//! Dropdown lists and their placement.
//!
//! Option lists are versioned constants. A binding ties one list to a
//! column range; the range is always computed from the plan's own data
//! extent, so a sheet with more indicators gets a longer range and a sheet
//! with none gets no binding at all.

use std::fmt;

use crate::common::{CellRange, Error, Result};
use crate::layout::GridPlan;

/// Longest list text a worksheet accepts for an inline list source.
pub const MAX_INLINE_LIST_LEN: usize = 255;

/// A versioned, ordered set of dropdown options.
#[derive(Debug, PartialEq, Eq)]
pub struct OptionList {
    pub name: &'static str,
    pub version: u32,
    pub options: &'static [&'static str],
}

impl OptionList {
    /// Options joined the way an inline list source stores them.
    pub fn joined(&self) -> String {
        self.options.join(",")
    }

    /// Whether every option can be stored in an inline list source.
    pub fn is_inline_safe(&self) -> bool {
        self.options.iter().all(|o| !o.contains(',') && !o.contains('"'))
    }
}

impl fmt::Display for OptionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

pub static YES_NO: OptionList = OptionList {
    name: "yes-no",
    version: 1,
    options: &["Sí", "No"],
};

/// Kinds of challenge in achieving a result.
pub static ACHIEVEMENT_CHALLENGE: OptionList = OptionList {
    name: "achievement-challenge",
    version: 1,
    options: &[
        "a) Productos no completados o desactivados (no suficientes para alcanzar el resultado)",
        "b) Productos se completan pero se requiere de más tiempo para alcanzar resultados",
        "c) Productos se completan pero no suficientes para alcanzar el resultado",
        "d) Otro",
    ],
};

/// Kinds of challenge in measuring a result.
pub static MEASUREMENT_CHALLENGE: OptionList = OptionList {
    name: "measurement-challenge",
    version: 1,
    options: &[
        "a) El indicador y/o su metodología de cálculo no están adecuadamente definidos",
        "b) Dificultad para acceder a datos de fuentes existentes",
        "c) Dificultad para recopilar nuevos datos por el proyecto",
        "d) Otro",
    ],
};

/// Contribution codes accepted in the matrix body.
pub static CONTRIBUTION_CODE: OptionList = OptionList {
    name: "contribution-code",
    version: 1,
    options: &["0", "1", "2"],
};

/// A list attached to a cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationBinding {
    range: CellRange,
    list: &'static OptionList,
}

impl ValidationBinding {
    pub fn range(&self) -> CellRange {
        self.range
    }

    pub fn list(&self) -> &'static OptionList {
        self.list
    }

    /// Leftmost column of the range.
    pub fn column(&self) -> u32 {
        self.range.start().col()
    }

    pub fn first_row(&self) -> u32 {
        self.range.start().row()
    }

    pub fn last_row(&self) -> u32 {
        self.range.end().row()
    }
}

/// Bind `list` to `range`.
///
/// # Errors
///
/// [`Error::Layout`] when the range is inverted or the list cannot be stored
/// inline.
pub fn attach_range(
    plan: &mut GridPlan,
    range: CellRange,
    list: &'static OptionList,
) -> Result<()> {
    if !range.is_valid() {
        return Err(Error::Layout(format!(
            "invalid validation range {} for list {}",
            range, list
        )));
    }
    if !list.is_inline_safe() {
        return Err(Error::Layout(format!(
            "list {} has options with commas or quotes",
            list
        )));
    }
    let joined = list.joined();
    if joined.chars().count() > MAX_INLINE_LIST_LEN {
        tracing::warn!(
            list = %list,
            sheet = plan.sheet_name(),
            length = joined.chars().count(),
            "inline list exceeds {} characters; some readers will reject it",
            MAX_INLINE_LIST_LEN
        );
    }
    plan.push_validation(ValidationBinding { range, list });
    Ok(())
}

/// Bind `list` to column `col` over the plan's data rows.
///
/// Returns `false` and binds nothing when the plan has no data rows.
pub fn attach_column(plan: &mut GridPlan, col: u32, list: &'static OptionList) -> Result<bool> {
    let Some(last) = plan.last_data_row() else {
        tracing::debug!(
            sheet = plan.sheet_name(),
            list = %list,
            "no data rows; skipping validation"
        );
        return Ok(false);
    };
    let range = CellRange::column_span(col, plan.first_data_row(), last);
    attach_range(plan, range, list)?;
    Ok(true)
}

/// Bind every list the plan's template declares.
pub fn attach_template_lists(plan: &mut GridPlan) -> Result<()> {
    let template = plan.kind().template();
    for binding in template.lists {
        attach_column(plan, binding.col, binding.list)?;
    }
    Ok(())
}
