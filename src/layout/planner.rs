use super::plan::{Block, GridPlan, MergeRole, StyleRole};
use super::template::{ColumnRole, DataLayout, SheetTemplate};
use crate::common::{CellRange, CellRef, Error, Result};
use crate::hierarchy::{Hierarchy, ObjectiveNode};

/// Plan the fixed part of a sheet: titles, banners, headers, widths and
/// heights. The data region is left empty.
///
/// # Errors
///
/// [`Error::Layout`] when two fixed cells overlap.
pub fn plan_headers(template: &SheetTemplate) -> Result<GridPlan> {
    let mut plan = GridPlan::new(template.kind, template.sheet_name, template.first_data_row);

    for fixed in template.fixed {
        let anchor = fixed.range.start();
        plan.set_text(anchor, fixed.text);
        plan.style_range(fixed.range, fixed.role);
        if !fixed.range.is_single() {
            plan.merge(fixed.range, fixed.role.merge_role())?;
        }
    }
    for &(col, width) in template.column_widths {
        plan.set_column_width(col, width);
    }
    for &(row, height) in template.row_heights {
        plan.set_row_height(row, height);
    }

    Ok(plan)
}

/// Plan a sheet for the given hierarchy.
///
/// Per-objective sheets get one block per objective node, in key order, each
/// block as tall as its node's span. Component sheets only receive their
/// fixed part here; the contribution matrix fills the rest.
///
/// # Errors
///
/// [`Error::EmptyHierarchy`] when a per-objective sheet is planned for a
/// hierarchy without nodes, [`Error::Layout`] on a merge conflict.
pub fn plan_sheet(template: &SheetTemplate, hierarchy: &Hierarchy) -> Result<GridPlan> {
    let mut plan = plan_headers(template)?;
    if template.layout == DataLayout::Components {
        return Ok(plan);
    }
    if hierarchy.is_empty() {
        return Err(Error::EmptyHierarchy);
    }

    let mut cursor = template.first_data_row;
    for node in hierarchy.nodes() {
        let start = cursor;
        let end = start + node.span() - 1;
        place_block(&mut plan, template, node, start, end)?;
        plan.push_block(Block {
            key: node.key(),
            start_row: start,
            end_row: end,
        });
        cursor = end + 1;
    }
    plan.set_data_end(cursor);

    let first = template.first_data_row;
    let last = cursor - 1;
    for column in template.columns {
        if column.role == ColumnRole::GeneralObjective {
            let range = CellRange::column_span(column.col, first, last);
            plan.set_text(range.start(), hierarchy.general_objective());
            plan.style_range(range, StyleRole::GeneralObjectiveCell);
            plan.merge(range, MergeRole::GeneralObjective)?;
        }
    }

    place_trailing(&mut plan, template, cursor);

    tracing::debug!(
        sheet = template.sheet_name,
        blocks = plan.blocks().len(),
        first_data_row = first,
        last_data_row = last,
        "planned sheet"
    );

    Ok(plan)
}

/// Plan a per-objective sheet with no objectives: the fixed part plus the
/// trailing rows, which start right at the first data row.
///
/// # Errors
///
/// [`Error::Layout`] when two fixed cells overlap.
pub fn plan_empty_sheet(template: &SheetTemplate) -> Result<GridPlan> {
    let mut plan = plan_headers(template)?;
    if template.layout == DataLayout::PerObjective {
        place_trailing(&mut plan, template, template.first_data_row);
    }
    Ok(plan)
}

fn place_trailing(plan: &mut GridPlan, template: &SheetTemplate, row: u32) {
    let Some(trailing) = template.trailing else {
        return;
    };
    let height = trailing.labels.len() as u32;
    if height == 0 {
        return;
    }
    let range = CellRange::from_coords(row, trailing.first_col, row + height - 1, trailing.last_col);
    plan.style_range(range, StyleRole::TrailingBlock);
    for (offset, label) in trailing.labels.iter().enumerate() {
        plan.set_text(CellRef::new(row + offset as u32, trailing.label_col), *label);
    }
    plan.set_trailing(range);
}

fn place_block(
    plan: &mut GridPlan,
    template: &SheetTemplate,
    node: &ObjectiveNode,
    start: u32,
    end: u32,
) -> Result<()> {
    for column in template.columns {
        let span = CellRange::column_span(column.col, start, end);
        match column.role {
            ColumnRole::GeneralObjective => {},
            ColumnRole::ObjectiveName => {
                plan.set_text(span.start(), node.display_name());
                plan.style_range(span, StyleRole::ObjectiveCell);
                plan.merge(span, MergeRole::PerObjective)?;
            },
            ColumnRole::ObjectiveInput => {
                plan.style_range(span, StyleRole::InputCell);
                plan.merge(span, MergeRole::PerObjective)?;
            },
            ColumnRole::IndicatorName => {
                for (offset, indicator) in node.indicators().iter().enumerate() {
                    plan.set_text(CellRef::new(start + offset as u32, column.col), indicator.as_str());
                }
                plan.style_range(span, StyleRole::IndicatorCell);
            },
            ColumnRole::IndicatorInput => {
                plan.style_range(span, StyleRole::InputCell);
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ElementRow;
    use crate::layout::TemplateKind;
    use proptest::prelude::*;

    fn health_and_education() -> Hierarchy {
        Hierarchy::build(&[
            ElementRow::general("1", "Reduce poverty"),
            ElementRow::objective("1.1", "Improve health"),
            ElementRow::indicator("1.1.A", "Life expectancy"),
            ElementRow::indicator("1.1.B", "Infant mortality"),
            ElementRow::objective("1.2", "Improve education"),
            ElementRow::indicator("1.2.A", "Literacy rate"),
        ])
        .unwrap()
    }

    fn text(plan: &GridPlan, a1_row: u32, col: u32) -> Option<&str> {
        plan.text(CellRef::new(a1_row, col))
    }

    #[test]
    fn summary_blocks_follow_hierarchy() {
        let plan = plan_sheet(TemplateKind::Summary.template(), &health_and_education()).unwrap();

        assert_eq!(text(&plan, 7, 1), Some("Improve health"));
        assert_eq!(text(&plan, 7, 2), Some("Infant mortality"));
        assert_eq!(text(&plan, 8, 2), Some("Life expectancy"));
        assert_eq!(text(&plan, 9, 1), Some("Improve education"));
        assert_eq!(text(&plan, 9, 2), Some("Literacy rate"));

        let block_merges: Vec<String> = plan
            .merges()
            .iter()
            .filter(|m| m.role == MergeRole::PerObjective)
            .map(|m| m.range.to_a1())
            .collect();
        assert_eq!(block_merges, ["A7:A8", "A9"]);

        assert_eq!(plan.first_data_row(), 7);
        assert_eq!(plan.last_data_row(), Some(9));
    }

    #[test]
    fn summary_header_merges() {
        let plan = plan_headers(TemplateKind::Summary.template()).unwrap();
        let banners: Vec<String> = plan
            .merges()
            .iter()
            .filter(|m| m.role == MergeRole::Banner)
            .map(|m| m.range.to_a1())
            .collect();
        assert_eq!(banners, ["H4:K4", "L4:P4", "H5:K5", "L5:P5"]);
        assert_eq!(plan.style(CellRef::new(5, 8)), Some(StyleRole::SubBanner));
        assert_eq!(plan.style(CellRef::new(6, 1)), Some(StyleRole::ColumnHeader));
    }

    #[test]
    fn challenge_sheet_merges_general_objective() {
        let plan = plan_sheet(
            TemplateKind::DevelopmentChallenge.template(),
            &health_and_education(),
        )
        .unwrap();

        let general = plan
            .merges()
            .iter()
            .find(|m| m.role == MergeRole::GeneralObjective)
            .unwrap();
        assert_eq!(general.range.to_a1(), "A5:A7");
        assert_eq!(text(&plan, 5, 1), Some("Reduce poverty"));
        assert_eq!(text(&plan, 5, 3), Some("Improve health"));

        for col in [2, 3, 5, 6] {
            assert!(plan.merge_at(CellRef::new(6, col)).is_some());
        }

        assert_eq!(plan.trailing().map(|r| r.to_a1()), Some("A8:F10".to_string()));
        assert_eq!(text(&plan, 10, 1), Some("Indicador GO 3"));
        assert_eq!(plan.style(CellRef::new(8, 6)), Some(StyleRole::TrailingBlock));
        assert_eq!(plan.last_data_row(), Some(7));
    }

    #[test]
    fn empty_challenge_sheet_keeps_trailing_rows() {
        let plan = plan_empty_sheet(TemplateKind::DevelopmentChallenge.template()).unwrap();
        assert_eq!(plan.trailing().map(|r| r.to_a1()), Some("A5:F7".to_string()));
        assert_eq!(text(&plan, 5, 1), Some("Indicador GO 1"));
        assert_eq!(text(&plan, 7, 1), Some("Indicador GO 3"));
        assert_eq!(plan.style(CellRef::new(7, 6)), Some(StyleRole::TrailingBlock));
        assert_eq!(plan.last_data_row(), None);
        assert!(plan.blocks().is_empty());

        let summary = plan_empty_sheet(TemplateKind::Summary.template()).unwrap();
        assert_eq!(summary.trailing(), None);
    }

    #[test]
    fn objective_without_indicators_takes_one_row() {
        let hierarchy = Hierarchy::build(&[
            ElementRow::objective("1.1", "Solo"),
            ElementRow::objective("1.2", "Pair"),
            ElementRow::indicator("1.2.A", "a"),
            ElementRow::indicator("1.2.B", "b"),
        ])
        .unwrap();
        let plan = plan_sheet(TemplateKind::ResultMeasurement.template(), &hierarchy).unwrap();

        assert_eq!(plan.blocks()[0].height(), 1);
        assert_eq!(plan.blocks()[1].start_row, 8);
        assert_eq!(text(&plan, 7, 2), None);
        assert_eq!(plan.style(CellRef::new(7, 18)), Some(StyleRole::InputCell));
    }

    #[test]
    fn empty_hierarchy_is_rejected_for_block_sheets() {
        let empty = Hierarchy::default();
        assert!(matches!(
            plan_sheet(TemplateKind::Summary.template(), &empty),
            Err(Error::EmptyHierarchy)
        ));
        assert!(plan_sheet(TemplateKind::TheoryOfChange.template(), &empty).is_ok());
    }

    #[test]
    fn measurement_headers_span_two_rows() {
        let plan = plan_headers(TemplateKind::ResultMeasurement.template()).unwrap();
        let h5 = plan.merge_at(CellRef::new(6, 8)).unwrap();
        assert_eq!(h5.range.to_a1(), "H5:H6");
        assert_eq!(plan.merge_at(CellRef::new(4, 9)).unwrap().range.to_a1(), "I4:R4");
        assert!(plan.merge_at(CellRef::new(6, 13)).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_blocks_tile_the_data_region(
            counts in prop::collection::vec(0usize..5, 1..12)
        ) {
            let mut rows = Vec::new();
            for (minor, count) in counts.iter().enumerate() {
                rows.push(ElementRow::objective(format!("1.{minor}"), format!("Objective {minor}")));
                for i in 0..*count {
                    rows.push(ElementRow::indicator(format!("1.{minor}.{i}x"), format!("ind {i}")));
                }
            }
            let hierarchy = Hierarchy::build(&rows).unwrap();

            for kind in [TemplateKind::DevelopmentChallenge, TemplateKind::ResultMeasurement, TemplateKind::Summary] {
                let template = kind.template();
                let plan = plan_sheet(template, &hierarchy).unwrap();

                let mut expected_start = template.first_data_row;
                for (block, node) in plan.blocks().iter().zip(hierarchy.nodes()) {
                    prop_assert_eq!(block.start_row, expected_start);
                    prop_assert_eq!(block.height(), node.span());
                    expected_start = block.end_row + 1;
                }
                prop_assert_eq!(plan.data_end(), expected_start);

                let total: u32 = hierarchy.nodes().iter().map(|n| n.span()).sum();
                prop_assert_eq!(plan.data_row_count(), total);

                for merge in plan.merges().iter().filter(|m| m.role == MergeRole::PerObjective) {
                    let owner = plan
                        .blocks()
                        .iter()
                        .find(|b| b.start_row == merge.range.start().row())
                        .unwrap();
                    prop_assert_eq!(merge.range.end().row(), owner.end_row);
                }
            }
        }
    }
}
