use phf::phf_map;
use serde::Deserialize;
use std::fmt;

/// Row-level tag of the hierarchy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ElementType {
    /// Top-level objective; contributes the sheet-wide label only.
    GeneralObjective,
    /// Objective that owns a block of indicators.
    SpecificObjective,
    /// Leaf indicator under a specific objective.
    ResultIndicator,
}

/// Labels as they appear in the `Element type` column, lower-cased.
static ELEMENT_TYPE_LABELS: phf::Map<&'static str, ElementType> = phf_map! {
    "general objective" => ElementType::GeneralObjective,
    "specific objective" => ElementType::SpecificObjective,
    "result indicator" => ElementType::ResultIndicator,
};

impl ElementType {
    /// Parse an `Element type` label. Matching ignores case and surrounding
    /// whitespace; unknown labels yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantilla::input::ElementType;
    ///
    /// assert_eq!(ElementType::from_label("Result indicator"), Some(ElementType::ResultIndicator));
    /// assert_eq!(ElementType::from_label(" specific objective "), Some(ElementType::SpecificObjective));
    /// assert_eq!(ElementType::from_label("Solution"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        ELEMENT_TYPE_LABELS
            .get(label.trim().to_lowercase().as_str())
            .copied()
    }

    /// Canonical label, as written by the source workbook.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralObjective => "General Objective",
            Self::SpecificObjective => "Specific Objective",
            Self::ResultIndicator => "Result indicator",
        }
    }
}

impl TryFrom<String> for ElementType {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_label(&value).ok_or_else(|| format!("unknown element type '{}'", value))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the "SDO & Result Indicators" table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementRow {
    pub element_type: ElementType,
    /// Dotted identifier such as `1.1` or `1.1.A`.
    pub number: String,
    pub name: String,
}

impl ElementRow {
    pub fn new(element_type: ElementType, number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            element_type,
            number: number.into(),
            name: name.into(),
        }
    }

    pub fn general(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ElementType::GeneralObjective, number, name)
    }

    pub fn objective(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ElementType::SpecificObjective, number, name)
    }

    pub fn indicator(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ElementType::ResultIndicator, number, name)
    }
}

/// One row of the "Solutions & Outputs" table.
///
/// The element type is kept verbatim; only rows whose type is `Solution`
/// (ignoring case) take part in the contribution matrix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentRow {
    pub name: String,
    pub id: String,
    pub element_type: String,
}

impl ComponentRow {
    pub fn new(name: impl Into<String>, id: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            element_type: element_type.into(),
        }
    }

    /// Shorthand for a `Solution` row.
    pub fn solution(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(name, id, "Solution")
    }

    /// Whether this row is a solution component.
    pub fn is_solution(&self) -> bool {
        self.element_type.trim().eq_ignore_ascii_case("solution")
    }
}
