//! End-to-end planning of a workbook from the two input tables.
//!
//! [`transform`] is the pure core: rows in, one [`GridPlan`] per requested
//! sheet out. [`render_workbook`] is the separate rendering step that turns
//! the plans into SpreadsheetML parts. A [`Project`] bundles both tables and
//! the options into one YAML document.

use serde::Deserialize;

use crate::common::{Error, Result};
use crate::hierarchy::Hierarchy;
use crate::input::{ComponentRow, ElementRow, Table};
use crate::layout::{DataLayout, GridPlan, TemplateKind, plan_empty_sheet, plan_headers, plan_sheet};
use crate::matrix::place_contribution_matrix;
use crate::render::Renderer;
use crate::validation::{CONTRIBUTION_CODE, attach_range, attach_template_lists};
use crate::writer::{Workbook, WorkbookParts};

/// Options controlling which sheets are planned and how.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Sheets to plan, in output order.
    pub sheets: Vec<TemplateKind>,
    /// Plan sheets without data rows instead of failing on an empty hierarchy.
    pub allow_empty_hierarchy: bool,
    /// Bind the 0/1/2 contribution codes over the matrix body.
    pub contribution_validation: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sheets: TemplateKind::ALL.to_vec(),
            allow_empty_hierarchy: false,
            contribution_validation: true,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, sheets: impl IntoIterator<Item = TemplateKind>) -> Self {
        self.sheets = sheets.into_iter().collect();
        self
    }

    pub fn with_allow_empty_hierarchy(mut self, allow: bool) -> Self {
        self.allow_empty_hierarchy = allow;
        self
    }

    pub fn with_contribution_validation(mut self, enabled: bool) -> Self {
        self.contribution_validation = enabled;
        self
    }
}

/// Both input tables plus options, as read from a YAML description.
///
/// ```yaml
/// hierarchy:
///   - { element_type: Specific Objective, number: "1.1", name: Improve health }
///   - { element_type: Result indicator, number: "1.1.A", name: Life expectancy }
/// components:
///   - { element_type: Solution, id: S1, name: Clinics }
/// options:
///   sheets: [theory-of-change, summary]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    pub hierarchy: Vec<ElementRow>,
    pub components: Vec<ComponentRow>,
    pub options: ReportOptions,
}

impl Project {
    /// Parse a project from YAML text.
    ///
    /// # Errors
    ///
    /// [`Error::Yaml`] when the document does not match the project shape,
    /// including unknown element types in the hierarchy.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|err| Error::Yaml(err.to_string()))
    }

    /// Plan the project's sheets.
    pub fn plans(&self) -> Result<Vec<GridPlan>> {
        transform_with(&self.hierarchy, &self.components, &self.options)
    }

    /// Plan and render the project in one go.
    pub fn render(&self) -> Result<WorkbookParts> {
        render_workbook(&self.plans()?)
    }
}

/// Plan every canonical sheet with default options.
///
/// # Errors
///
/// [`Error::MalformedNumber`] for an unparsable element number,
/// [`Error::EmptyHierarchy`] when a per-objective sheet has nothing to show.
///
/// # Example
///
/// ```
/// use plantilla::input::{ComponentRow, ElementRow};
/// use plantilla::report::transform;
///
/// let plans = transform(
///     &[
///         ElementRow::objective("1.1", "Improve health"),
///         ElementRow::indicator("1.1.A", "Life expectancy"),
///     ],
///     &[ComponentRow::solution("Clinics", "S1")],
/// )?;
/// let names: Vec<&str> = plans.iter().map(|p| p.sheet_name()).collect();
/// assert_eq!(names, ["C. Desafío", "D. Teoría de Cambio", "E. Medición", "F. Resumen"]);
/// # Ok::<(), plantilla::Error>(())
/// ```
pub fn transform(
    hierarchy_rows: &[ElementRow],
    component_rows: &[ComponentRow],
) -> Result<Vec<GridPlan>> {
    transform_with(hierarchy_rows, component_rows, &ReportOptions::default())
}

/// Plan the sheets named in `options`.
pub fn transform_with(
    hierarchy_rows: &[ElementRow],
    component_rows: &[ComponentRow],
    options: &ReportOptions,
) -> Result<Vec<GridPlan>> {
    let hierarchy = Hierarchy::build(hierarchy_rows)?;

    let mut plans = Vec::with_capacity(options.sheets.len());
    for &kind in &options.sheets {
        plans.push(plan_kind(kind, &hierarchy, component_rows, options)?);
    }
    Ok(plans)
}

/// Plan from header + row tables as delivered by a tabular reader.
///
/// # Errors
///
/// [`Error::InputSchema`] naming the table when a required column is missing
/// or a row is wider than its header, plus everything [`transform_with`]
/// reports.
pub fn transform_tables(
    hierarchy: &Table,
    components: &Table,
    options: &ReportOptions,
) -> Result<Vec<GridPlan>> {
    let element_rows = hierarchy.element_rows()?;
    let component_rows = components.component_rows()?;
    transform_with(&element_rows, &component_rows, options)
}

/// Render plans into SpreadsheetML parts with the default palette.
pub fn render_workbook(plans: &[GridPlan]) -> Result<WorkbookParts> {
    let mut workbook = Workbook::new();
    Renderer::new().render(plans, &mut workbook)?;
    workbook.to_parts()
}

fn plan_kind(
    kind: TemplateKind,
    hierarchy: &Hierarchy,
    components: &[ComponentRow],
    options: &ReportOptions,
) -> Result<GridPlan> {
    let template = kind.template();

    let mut plan = match template.layout {
        DataLayout::Components => {
            let mut plan = plan_headers(template)?;
            let matrix = place_contribution_matrix(&mut plan, hierarchy, components)?;
            match matrix.body() {
                Some(body) if options.contribution_validation => {
                    attach_range(&mut plan, body, &CONTRIBUTION_CODE)?;
                },
                _ => {},
            }
            plan
        },
        DataLayout::PerObjective => match plan_sheet(template, hierarchy) {
            Ok(plan) => plan,
            Err(Error::EmptyHierarchy) if options.allow_empty_hierarchy => {
                tracing::warn!(sheet = template.sheet_name, "empty hierarchy; planning fixed rows only");
                plan_empty_sheet(template)?
            },
            Err(err) => return Err(err),
        },
    };

    attach_template_lists(&mut plan)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CellRange, CellRef};
    use crate::input::{COL_ELEMENT_TYPE, COL_ID, COL_NAME, COL_NUMBER, COMPONENTS_TABLE, HIERARCHY_TABLE};
    use crate::layout::{FormulaKind, MergeRole};
    use proptest::prelude::*;

    fn two_objectives() -> Vec<ElementRow> {
        vec![
            ElementRow::general("1", "Better lives"),
            ElementRow::indicator("1.2.B", "Enrollment"),
            ElementRow::objective("1.1", "Improve health"),
            ElementRow::indicator("1.1.A", "Life expectancy"),
            ElementRow::objective("1.2", "Improve education"),
            ElementRow::indicator("1.2.A", "Literacy rate"),
        ]
    }

    fn components() -> Vec<ComponentRow> {
        vec![
            ComponentRow::solution("Clinics", "S1"),
            ComponentRow::new("Training", "O1", "Output"),
            ComponentRow::solution("Schools", "S2"),
        ]
    }

    fn plan_for(plans: &[GridPlan], kind: TemplateKind) -> &GridPlan {
        plans.iter().find(|p| p.kind() == kind).unwrap()
    }

    #[test]
    fn blocks_follow_sorted_keys_without_gaps() {
        let plans = transform(&two_objectives(), &components()).unwrap();
        let summary = plan_for(&plans, TemplateKind::Summary);

        let blocks = summary.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].start_row, blocks[0].end_row), (7, 7));
        assert_eq!((blocks[1].start_row, blocks[1].end_row), (8, 9));
        assert_eq!(summary.text(CellRef::new(8, 1)), Some("Improve education"));
        assert_eq!(summary.text(CellRef::new(8, 2)), Some("Enrollment"));
        assert_eq!(summary.text(CellRef::new(9, 2)), Some("Literacy rate"));
        assert_eq!(summary.last_data_row(), Some(9));
    }

    #[test]
    fn orphan_indicator_gets_placeholder_objective() {
        let rows = vec![
            ElementRow::objective("1.1", "Improve health"),
            ElementRow::indicator("2.3.A", "Orphan"),
        ];
        let plans = transform(&rows, &[]).unwrap();
        let measurement = plan_for(&plans, TemplateKind::ResultMeasurement);
        assert_eq!(measurement.text(CellRef::new(8, 1)), Some("[Objetivo 2.3]"));
        assert_eq!(measurement.text(CellRef::new(8, 2)), Some("Orphan"));
    }

    #[test]
    fn no_solutions_leaves_matrix_header_only() {
        let rows = two_objectives();
        let only_outputs = vec![ComponentRow::new("Training", "O1", "Output")];
        let plans = transform(&rows, &only_outputs).unwrap();
        let toc = plan_for(&plans, TemplateKind::TheoryOfChange);

        assert!(toc.formulas().is_empty());
        assert_eq!(toc.last_data_row(), None);
        assert!(toc.validations().is_empty());
        // Objective 1.1 column at R, its indicator at S.
        assert_eq!(toc.text(CellRef::new(5, 18)), Some("Improve health"));
        assert_eq!(toc.text(CellRef::new(5, 19)), Some("Life expectancy"));
    }

    #[test]
    fn malformed_number_is_reported() {
        let rows = vec![ElementRow::indicator("1.A", "Broken")];
        let err = transform(&rows, &[]).unwrap_err();
        assert!(matches!(err, Error::MalformedNumber { ref number, .. } if number == "1.A"));
    }

    #[test]
    fn empty_hierarchy_fails_unless_allowed() {
        let err = transform(&[], &components()).unwrap_err();
        assert!(matches!(err, Error::EmptyHierarchy));

        let options = ReportOptions::new().with_allow_empty_hierarchy(true);
        let plans = transform_with(&[], &components(), &options).unwrap();
        assert_eq!(plans.len(), 4);
        let summary = plan_for(&plans, TemplateKind::Summary);
        assert!(summary.blocks().is_empty());
        assert!(summary.validations().is_empty());

        // The matrix degrades to its boundary column.
        let toc = plan_for(&plans, TemplateKind::TheoryOfChange);
        assert_eq!(toc.formulas().len(), 4);
    }

    #[test]
    fn empty_hierarchy_keeps_challenge_trailing_rows() {
        let options = ReportOptions::new().with_allow_empty_hierarchy(true);
        let plans = transform_with(&[ElementRow::general("1", "Goal")], &[], &options).unwrap();
        let challenge = plan_for(&plans, TemplateKind::DevelopmentChallenge);
        assert_eq!(
            challenge.trailing(),
            Some(CellRange::from_coords(5, 1, 7, 6))
        );
        assert_eq!(challenge.text(CellRef::new(5, 1)), Some("Indicador GO 1"));
        assert_eq!(challenge.last_data_row(), None);
        assert!(challenge.validations().is_empty());
    }

    #[test]
    fn theory_of_change_formulas_cover_matrix_row() {
        let plans = transform(&two_objectives(), &components()).unwrap();
        let toc = plan_for(&plans, TemplateKind::TheoryOfChange);

        // Two solutions, five matrix columns (R..V).
        let formulas = toc.formulas();
        assert_eq!(formulas.len(), 4);
        let max_row7 = formulas
            .iter()
            .find(|f| f.kind == FormulaKind::MaxFlag && f.cell.row() == 7)
            .unwrap();
        assert_eq!(max_row7.expression(), "IF(MAX(R7:V7)=2,1,0)");
        let sum_row6 = formulas
            .iter()
            .find(|f| f.kind == FormulaKind::SumFlag && f.cell.row() == 6)
            .unwrap();
        assert_eq!(sum_row6.expression(), "IF(SUM(G6:K6)>0,1,0)");

        let codes = toc.validations();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].range(), CellRange::from_coords(6, 18, 7, 22));
    }

    #[test]
    fn contribution_codes_can_be_disabled() {
        let options = ReportOptions::new()
            .with_sheets([TemplateKind::TheoryOfChange])
            .with_contribution_validation(false);
        let plans = transform_with(&two_objectives(), &components(), &options).unwrap();
        assert_eq!(plans.len(), 1);
        assert!(plans[0].validations().is_empty());
    }

    #[test]
    fn general_objective_spans_challenge_data() {
        let plans = transform(&two_objectives(), &[]).unwrap();
        let challenge = plan_for(&plans, TemplateKind::DevelopmentChallenge);

        let region = challenge.merge_at(CellRef::new(5, 1)).unwrap();
        assert_eq!(region.role, MergeRole::GeneralObjective);
        assert_eq!(region.range, CellRange::column_span(1, 5, 7));
        assert_eq!(challenge.text(CellRef::new(5, 1)), Some("Better lives"));
        assert_eq!(challenge.text(CellRef::new(8, 1)), Some("Indicador GO 1"));

        let yes_no = challenge.validations()[0];
        assert_eq!(yes_no.range().to_a1(), "E5:E7");
    }

    #[test]
    fn tables_report_missing_columns() {
        let mut hierarchy = Table::new(HIERARCHY_TABLE, [COL_ELEMENT_TYPE, COL_NUMBER]);
        hierarchy.push_row(["Specific Objective", "1.1"]);
        let components = Table::new(COMPONENTS_TABLE, [COL_ELEMENT_TYPE, COL_ID, COL_NAME]);

        let err = transform_tables(&hierarchy, &components, &ReportOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InputSchema { ref table, .. } if table == HIERARCHY_TABLE));
    }

    #[test]
    fn tables_feed_the_planner() {
        let mut hierarchy = Table::new(HIERARCHY_TABLE, [COL_ELEMENT_TYPE, COL_NUMBER, COL_NAME]);
        hierarchy.push_row(["Specific Objective", "1.1", "Improve health"]);
        hierarchy.push_row(["Result Indicator", "1.1.A", "Life expectancy"]);
        let mut components = Table::new(COMPONENTS_TABLE, [COL_ELEMENT_TYPE, COL_ID, COL_NAME]);
        components.push_row(["Solution", "S1", "Clinics"]);

        let plans = transform_tables(&hierarchy, &components, &ReportOptions::default()).unwrap();
        let toc = plan_for(&plans, TemplateKind::TheoryOfChange);
        assert_eq!(toc.text(CellRef::new(6, 1)), Some("Clinics"));
        assert_eq!(toc.text(CellRef::new(6, 2)), Some("S1"));
    }

    #[test]
    fn renders_every_sheet_part() {
        let plans = transform(&two_objectives(), &components()).unwrap();
        let parts = render_workbook(&plans).unwrap();

        let workbook = parts.get("xl/workbook.xml").unwrap();
        assert!(workbook.contains(r#"name="F. Resumen""#));
        let toc = parts.get("xl/worksheets/sheet2.xml").unwrap();
        assert!(toc.contains("<f>IF(MAX(R6:V6)=2,1,0)</f>"));
        assert!(toc.contains(r#"sqref="R6:V7""#));
        let summary = parts.get("xl/worksheets/sheet4.xml").unwrap();
        assert!(summary.contains(r#"<mergeCell ref="A8:A9"/>"#));
        assert!(parts.get("xl/sharedStrings.xml").unwrap().contains("Improve education"));
    }

    #[test]
    fn project_loads_from_yaml() {
        let yaml = r#"
hierarchy:
  - { element_type: General Objective, number: "1", name: Better lives }
  - { element_type: Specific Objective, number: "1.1", name: Improve health }
  - { element_type: result indicator, number: "1.1.A", name: Life expectancy }
components:
  - { element_type: Solution, id: S1, name: Clinics }
options:
  sheets: [theory-of-change, summary]
  contribution_validation: false
"#;
        let project = Project::from_yaml_str(yaml).unwrap();
        assert_eq!(project.hierarchy.len(), 3);
        assert!(!project.options.contribution_validation);
        assert!(!project.options.allow_empty_hierarchy);

        let plans = project.plans().unwrap();
        let names: Vec<&str> = plans.iter().map(|p| p.sheet_name()).collect();
        assert_eq!(names, ["D. Teoría de Cambio", "F. Resumen"]);
        assert!(plans[0].validations().is_empty());
    }

    #[test]
    fn project_rejects_unknown_element_type() {
        let yaml = "hierarchy:\n  - { element_type: Activity, number: \"1.1\", name: x }\n";
        let err = Project::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    fn element_rows() -> impl Strategy<Value = Vec<ElementRow>> {
        prop::collection::vec((1u32..4, 1u32..12, 0usize..4), 1..10).prop_map(|specs| {
            let mut rows = Vec::new();
            for (major, minor, indicators) in specs {
                rows.push(ElementRow::objective(
                    format!("{major}.{minor}"),
                    format!("Objective {major}.{minor}"),
                ));
                for i in 0..indicators {
                    let suffix = (b'A' + i as u8) as char;
                    rows.push(ElementRow::indicator(
                        format!("{major}.{minor}.{suffix}"),
                        format!("Indicator {major}.{minor}.{suffix}"),
                    ));
                }
            }
            rows
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn validations_track_last_data_row(rows in element_rows()) {
            let plans = transform(&rows, &[]).unwrap();
            for plan in &plans {
                let Some(last) = plan.last_data_row() else {
                    prop_assert!(plan.validations().is_empty());
                    continue;
                };
                for binding in plan.validations() {
                    prop_assert_eq!(binding.first_row(), plan.first_data_row());
                    prop_assert_eq!(binding.last_row(), last);
                }
            }
        }

        #[test]
        fn summary_rows_equal_total_span(rows in element_rows()) {
            let hierarchy = Hierarchy::build(&rows).unwrap();
            let plans = transform(&rows, &[]).unwrap();
            let summary = plan_for(&plans, TemplateKind::Summary);
            let total: u32 = hierarchy.nodes().iter().map(|n| n.span()).sum();
            prop_assert_eq!(summary.data_row_count(), total);
        }
    }
}
