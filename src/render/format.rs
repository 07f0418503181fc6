//! Concrete cell formatting shared by the renderer and the writer.

/// Cell format information.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFormat {
    pub font: Option<CellFont>,
    pub fill: Option<CellFill>,
    pub border: Option<CellBorder>,
    pub alignment: Option<CellAlignment>,
}

/// Font properties for a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellFont {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    /// ARGB hex, e.g. `FFFFFFFF`.
    pub color: Option<String>,
}

/// Fill properties for a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellFill {
    pub pattern_type: CellFillPatternType,
    pub fg_color: Option<String>,
}

impl CellFill {
    /// Solid fill in the given ARGB colour.
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            pattern_type: CellFillPatternType::Solid,
            fg_color: Some(color.into()),
        }
    }
}

/// Cell fill pattern types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFillPatternType {
    None,
    Solid,
    Gray125,
}

impl CellFillPatternType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Gray125 => "gray125",
        }
    }
}

/// Border properties for a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellBorder {
    pub left: Option<CellBorderSide>,
    pub right: Option<CellBorderSide>,
    pub top: Option<CellBorderSide>,
    pub bottom: Option<CellBorderSide>,
}

impl CellBorder {
    /// Thin line on all four sides.
    pub fn thin() -> Self {
        let side = CellBorderSide {
            style: CellBorderLineStyle::Thin,
            color: None,
        };
        Self {
            left: Some(side.clone()),
            right: Some(side.clone()),
            top: Some(side.clone()),
            bottom: Some(side),
        }
    }
}

/// Border side properties.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBorderSide {
    pub style: CellBorderLineStyle,
    pub color: Option<String>,
}

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellBorderLineStyle {
    Thin,
    Medium,
    Thick,
}

impl CellBorderLineStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Thin => "thin",
            Self::Medium => "medium",
            Self::Thick => "thick",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// Alignment properties for a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellAlignment {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    pub wrap_text: bool,
    /// Degrees, 0..=180 as SpreadsheetML stores them.
    pub text_rotation: u16,
}

impl CellAlignment {
    /// Centered both ways with wrapping.
    pub fn centered() -> Self {
        Self {
            horizontal: Some(HorizontalAlignment::Center),
            vertical: Some(VerticalAlignment::Center),
            wrap_text: true,
            text_rotation: 0,
        }
    }

    /// Top-aligned with wrapping.
    pub fn top() -> Self {
        Self {
            horizontal: None,
            vertical: Some(VerticalAlignment::Top),
            wrap_text: true,
            text_rotation: 0,
        }
    }

    /// Left and vertically centered with wrapping.
    pub fn left_middle() -> Self {
        Self {
            horizontal: Some(HorizontalAlignment::Left),
            vertical: Some(VerticalAlignment::Center),
            wrap_text: true,
            text_rotation: 0,
        }
    }

    /// Centered text rotated to read bottom-up.
    pub fn vertical_text() -> Self {
        Self {
            text_rotation: 90,
            ..Self::centered()
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
