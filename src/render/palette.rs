use super::format::{CellAlignment, CellBorder, CellFill, CellFont, CellFormat};
use crate::layout::StyleRole;

/// Colours used to render style roles, as ARGB hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Descriptive column headers
    pub header: String,
    /// Group banners
    pub banner: String,
    /// Sub banners, reference headers and matrix headers
    pub reference: String,
    /// Input section headers
    pub section: String,
    /// Derived (formula) column headers
    pub derived: String,
    /// Assumption column headers
    pub assumption: String,
    /// Explanation column headers
    pub explanation: String,
    /// Trailing fixed rows
    pub trailing: String,
    /// Text on dark fills
    pub light_text: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header: "FF196E8C".to_string(),
            banner: "FF308144".to_string(),
            reference: "FFE7E6E6".to_string(),
            section: "FFACCDB4".to_string(),
            derived: "FFA6A6A6".to_string(),
            assumption: "FF00B0F0".to_string(),
            explanation: "FFF2F2CB".to_string(),
            trailing: "FFBFBFBF".to_string(),
            light_text: "FFFFFFFF".to_string(),
        }
    }
}

impl Palette {
    fn bold(&self) -> CellFont {
        CellFont {
            bold: true,
            ..Default::default()
        }
    }

    fn bold_light(&self) -> CellFont {
        CellFont {
            bold: true,
            color: Some(self.light_text.clone()),
            ..Default::default()
        }
    }

    fn header(&self, font: CellFont, fill: &str, alignment: CellAlignment) -> CellFormat {
        CellFormat {
            font: Some(font),
            fill: Some(CellFill::solid(fill)),
            border: None,
            alignment: Some(alignment),
        }
    }

    fn bordered(&self, alignment: CellAlignment) -> CellFormat {
        CellFormat {
            border: Some(CellBorder::thin()),
            alignment: Some(alignment),
            ..Default::default()
        }
    }

    /// Concrete format for a style role.
    pub fn format(&self, role: StyleRole) -> CellFormat {
        match role {
            StyleRole::Title => CellFormat {
                font: Some(CellFont {
                    bold: true,
                    size: Some(14.0),
                    ..Default::default()
                }),
                alignment: Some(CellAlignment::left_middle()),
                ..Default::default()
            },
            StyleRole::Instructions => CellFormat {
                font: Some(CellFont {
                    italic: true,
                    size: Some(11.0),
                    ..Default::default()
                }),
                alignment: Some(CellAlignment::left_middle()),
                ..Default::default()
            },
            StyleRole::Note => CellFormat {
                font: Some(self.bold()),
                alignment: Some(CellAlignment::left_middle()),
                ..Default::default()
            },
            StyleRole::GroupBanner => {
                self.header(self.bold_light(), &self.banner, CellAlignment::centered())
            },
            StyleRole::SubBanner | StyleRole::ReferenceHeader => {
                self.header(self.bold(), &self.reference, CellAlignment::centered())
            },
            StyleRole::ColumnHeader => {
                self.header(self.bold_light(), &self.header, CellAlignment::centered())
            },
            StyleRole::VerticalColumnHeader => {
                self.header(self.bold_light(), &self.header, CellAlignment::vertical_text())
            },
            StyleRole::SectionHeader => {
                self.header(self.bold(), &self.section, CellAlignment::centered())
            },
            StyleRole::QuestionHeader => CellFormat {
                font: Some(self.bold()),
                alignment: Some(CellAlignment::centered()),
                ..Default::default()
            },
            StyleRole::AssumptionHeader => {
                self.header(self.bold(), &self.assumption, CellAlignment::centered())
            },
            StyleRole::DerivedHeader => {
                self.header(self.bold(), &self.derived, CellAlignment::centered())
            },
            StyleRole::VerticalDerivedHeader => {
                self.header(self.bold(), &self.derived, CellAlignment::vertical_text())
            },
            StyleRole::ExplanationHeader => {
                self.header(self.bold(), &self.explanation, CellAlignment::centered())
            },
            StyleRole::MatrixHeader => {
                self.header(self.bold(), &self.reference, CellAlignment::left_middle())
            },
            StyleRole::GeneralObjectiveCell => self.bordered(CellAlignment::centered()),
            StyleRole::ObjectiveCell | StyleRole::IndicatorCell | StyleRole::InputCell => {
                self.bordered(CellAlignment::top())
            },
            StyleRole::MatrixCell => self.bordered(CellAlignment::left_middle()),
            StyleRole::TrailingBlock => CellFormat {
                fill: Some(CellFill::solid(self.trailing.as_str())),
                ..self.bordered(CellAlignment::top())
            },
        }
    }
}
