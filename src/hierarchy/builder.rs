use std::collections::BTreeMap;

use super::number::ObjectiveKey;
use crate::common::Result;
use crate::input::{ElementRow, ElementType};

/// Top-level label used when no `General Objective` row is present.
pub const GENERAL_OBJECTIVE_PLACEHOLDER: &str = "[Objetivo General]";

/// One specific objective and its result indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveNode {
    key: ObjectiveKey,
    name: Option<String>,
    indicators: Vec<String>,
}

impl ObjectiveNode {
    pub fn key(&self) -> ObjectiveKey {
        self.key
    }

    /// Name from the specific-objective row, if one was supplied.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name to show in the sheets: the objective's own name or
    /// `[Objetivo <key>]`.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.key.placeholder_name())
    }

    /// Indicator names, sorted ascending.
    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    /// Rows this objective occupies in a per-objective layout.
    ///
    /// An objective without indicators still takes one row so that its
    /// merged cells are never zero-height.
    pub fn span(&self) -> u32 {
        (self.indicators.len() as u32).max(1)
    }

    /// Columns this objective occupies in the contribution matrix: the
    /// objective itself plus one per indicator.
    pub fn matrix_width(&self) -> u32 {
        1 + self.indicators.len() as u32
    }
}

#[derive(Default)]
struct NodeDraft {
    name: Option<String>,
    indicators: Vec<String>,
}

/// The ordered objective → indicator tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hierarchy {
    general_objective: Option<String>,
    nodes: Vec<ObjectiveNode>,
}

impl Hierarchy {
    /// Build the hierarchy from element rows in a single pass.
    ///
    /// Row order does not matter: an indicator may appear before the
    /// objective that owns it. Objectives are keyed by the first two numeric
    /// components of their number, so a key is created on first sight and
    /// named whenever its specific-objective row shows up. The first
    /// `General Objective` row provides the top-level label.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MalformedNumber`] when an objective or indicator number
    /// does not carry two leading integer components.
    pub fn build(rows: &[ElementRow]) -> Result<Self> {
        let mut general_objective: Option<String> = None;
        let mut drafts: BTreeMap<ObjectiveKey, NodeDraft> = BTreeMap::new();

        for row in rows {
            match row.element_type {
                ElementType::GeneralObjective => {
                    if general_objective.is_none() && !row.name.trim().is_empty() {
                        general_objective = Some(row.name.clone());
                    }
                },
                ElementType::SpecificObjective => {
                    let key = ObjectiveKey::from_number(&row.number)?;
                    let draft = drafts.entry(key).or_default();
                    if row.name.trim().is_empty() {
                        continue;
                    }
                    match draft.name {
                        None => draft.name = Some(row.name.clone()),
                        Some(ref existing) if existing != &row.name => {
                            tracing::warn!(
                                key = %key,
                                "ignoring second name '{}' for objective already named '{}'",
                                row.name,
                                existing
                            );
                        },
                        Some(_) => {},
                    }
                },
                ElementType::ResultIndicator => {
                    let key = ObjectiveKey::from_number(&row.number)?;
                    drafts
                        .entry(key)
                        .or_default()
                        .indicators
                        .push(row.name.clone());
                },
            }
        }

        // BTreeMap iteration already follows the integer ordering of keys.
        let nodes = drafts
            .into_iter()
            .map(|(key, mut draft)| {
                draft.indicators.sort();
                ObjectiveNode {
                    key,
                    name: draft.name,
                    indicators: draft.indicators,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            nodes = nodes.len(),
            indicators = nodes.iter().map(|n| n.indicators.len()).sum::<usize>(),
            "built objective hierarchy"
        );

        Ok(Self {
            general_objective,
            nodes,
        })
    }

    /// Top-level label, or [`GENERAL_OBJECTIVE_PLACEHOLDER`].
    pub fn general_objective(&self) -> &str {
        self.general_objective
            .as_deref()
            .unwrap_or(GENERAL_OBJECTIVE_PLACEHOLDER)
    }

    /// Objective nodes in key order.
    pub fn nodes(&self) -> &[ObjectiveNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of indicators across all objectives.
    pub fn indicator_count(&self) -> usize {
        self.nodes.iter().map(|n| n.indicators.len()).sum()
    }

    /// Number of data columns the contribution matrix needs.
    pub fn matrix_width(&self) -> u32 {
        self.nodes.iter().map(ObjectiveNode::matrix_width).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    fn scenario_rows() -> Vec<ElementRow> {
        vec![
            ElementRow::general("1", "Reduce poverty"),
            ElementRow::objective("1.1", "Improve health"),
            ElementRow::indicator("1.1.A", "Life expectancy"),
            ElementRow::indicator("1.1.B", "Infant mortality"),
            ElementRow::objective("1.2", "Improve education"),
            ElementRow::indicator("1.2.A", "Literacy rate"),
        ]
    }

    #[test]
    fn groups_and_sorts_indicators() {
        let hierarchy = Hierarchy::build(&scenario_rows()).unwrap();
        assert_eq!(hierarchy.general_objective(), "Reduce poverty");
        assert_eq!(hierarchy.len(), 2);

        let first = &hierarchy.nodes()[0];
        assert_eq!(first.key(), ObjectiveKey::new(1, 1));
        assert_eq!(first.display_name(), "Improve health");
        assert_eq!(first.indicators(), ["Infant mortality", "Life expectancy"]);
        assert_eq!(first.span(), 2);

        let second = &hierarchy.nodes()[1];
        assert_eq!(second.indicators(), ["Literacy rate"]);
        assert_eq!(second.span(), 1);
    }

    #[test]
    fn orphan_indicator_gets_placeholder_node() {
        let rows = vec![ElementRow::indicator("2.3.A", "Coverage")];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        let node = &hierarchy.nodes()[0];
        assert_eq!(node.name(), None);
        assert_eq!(node.display_name(), "[Objetivo 2.3]");
        assert_eq!(node.indicators(), ["Coverage"]);
    }

    #[test]
    fn zero_padded_number_is_its_own_node() {
        let rows = vec![
            ElementRow::objective("1.1", "Health"),
            ElementRow::indicator("1.01.A", "Orphan"),
        ];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        assert_eq!(hierarchy.len(), 2);

        let padded = &hierarchy.nodes()[0];
        assert_eq!(padded.display_name(), "[Objetivo 1.01]");
        assert_eq!(padded.indicators(), ["Orphan"]);

        let plain = &hierarchy.nodes()[1];
        assert_eq!(plain.display_name(), "Health");
        assert!(plain.indicators().is_empty());
    }

    #[test]
    fn late_objective_row_names_existing_node() {
        let rows = vec![
            ElementRow::indicator("2.3.A", "Coverage"),
            ElementRow::objective("2.3", "Expand water access"),
        ];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy.nodes()[0].display_name(), "Expand water access");
    }

    #[test]
    fn first_general_objective_wins() {
        let rows = vec![
            ElementRow::general("1", "First"),
            ElementRow::general("2", "Second"),
        ];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        assert_eq!(hierarchy.general_objective(), "First");
        assert!(hierarchy.is_empty());
    }

    #[test]
    fn missing_general_objective_uses_placeholder() {
        let rows = vec![ElementRow::objective("1.1", "Only objective")];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        assert_eq!(hierarchy.general_objective(), GENERAL_OBJECTIVE_PLACEHOLDER);
    }

    #[test]
    fn objective_without_indicators_spans_one_row() {
        let rows = vec![ElementRow::objective("3.1", "Lonely")];
        let hierarchy = Hierarchy::build(&rows).unwrap();
        assert_eq!(hierarchy.nodes()[0].span(), 1);
        assert_eq!(hierarchy.matrix_width(), 1);
    }

    #[test]
    fn malformed_indicator_number_fails() {
        let rows = vec![ElementRow::indicator("1.A", "Broken")];
        assert!(matches!(
            Hierarchy::build(&rows),
            Err(Error::MalformedNumber { .. })
        ));
    }

    fn key_strategy() -> impl Strategy<Value = (u32, u32)> {
        (0u32..15, 0u32..15)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_nodes_follow_integer_key_order(
            entries in prop::collection::vec((key_strategy(), "[a-z]{1,6}", any::<bool>()), 0..40)
        ) {
            let rows: Vec<ElementRow> = entries
                .iter()
                .map(|((major, minor), name, is_objective)| {
                    if *is_objective {
                        ElementRow::objective(format!("{major}.{minor}"), name.clone())
                    } else {
                        ElementRow::indicator(format!("{major}.{minor}.X"), name.clone())
                    }
                })
                .collect();

            let hierarchy = Hierarchy::build(&rows).unwrap();

            for pair in hierarchy.nodes().windows(2) {
                prop_assert!(pair[0].key().sort_key() < pair[1].key().sort_key());
            }
            for node in hierarchy.nodes() {
                prop_assert!(node.indicators().windows(2).all(|w| w[0] <= w[1]));
            }

            let indicator_rows = entries.iter().filter(|(_, _, objective)| !objective).count();
            prop_assert_eq!(hierarchy.indicator_count(), indicator_rows);
            prop_assert_eq!(
                hierarchy.matrix_width() as usize,
                hierarchy.len() + hierarchy.indicator_count()
            );
        }
    }
}
