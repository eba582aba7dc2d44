//! Update merging: applies caller text to a copy of the original segment
//! map, matching runs by id.

use crate::config::CustomizationGate;
use crate::edit::{EditPayload, RunEdit, ShapeEdit};
use crate::segment::{CellKey, CellLocation, Segment, SegmentMap, TextBody};
use std::collections::HashMap;

/// Identifies one text container inside a segment map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerRef {
    pub shape_id: String,
    pub cell: Option<CellLocation>,
}

impl ContainerRef {
    pub fn shape(shape_id: impl Into<String>) -> Self {
        Self {
            shape_id: shape_id.into(),
            cell: None,
        }
    }

    pub fn cell(shape_id: impl Into<String>, cell: CellLocation) -> Self {
        Self {
            shape_id: shape_id.into(),
            cell: Some(cell),
        }
    }

    /// Resolve this reference against a segment map.
    pub fn resolve<'a>(&self, map: &'a SegmentMap) -> Option<&'a TextBody> {
        match (map.get(&self.shape_id)?, self.cell) {
            (Segment::Text { body }, None) => Some(body),
            (Segment::Table { cells }, Some(cell)) => cells.get(&CellKey(cell)),
            _ => None,
        }
    }

    pub fn resolve_mut<'a>(&self, map: &'a mut SegmentMap) -> Option<&'a mut TextBody> {
        match (map.get_mut(&self.shape_id)?, self.cell) {
            (Segment::Text { body }, None) => Some(body),
            (Segment::Table { cells }, Some(cell)) => cells.get_mut(&CellKey(cell)),
            _ => None,
        }
    }
}

/// Result of merging: the working copy plus the containers an edit was
/// actually applied to, in map order.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub map: SegmentMap,
    pub touched: Vec<ContainerRef>,
}

/// Replace run text in `body` from `edits`. Runs without an edit are
/// dropped; edits without a run are ignored. Styles are left untouched.
pub fn merge_runs(body: &mut TextBody, edits: &[RunEdit]) {
    let mut by_id: HashMap<&str, &str> = HashMap::with_capacity(edits.len());
    for edit in edits {
        by_id.entry(edit.id.as_str()).or_insert(edit.text.as_str());
    }

    for paragraph in &mut body.paragraphs {
        paragraph.runs.retain_mut(|run| match by_id.get(run.id.as_str()) {
            Some(text) => {
                run.text = text.to_string();
                true
            }
            None => {
                log::debug!("Dropping run {} absent from the edit", run.id);
                false
            }
        });
    }
}

/// Merge `edits` into a clone of `original`.
///
/// Unknown shapes, mismatched shape kinds, unknown cells, and gated
/// shapes are skipped and leave their containers untouched.
pub fn merge_updates(original: &SegmentMap, edits: &EditPayload, gate: CustomizationGate) -> MergeOutcome {
    let mut map = original.clone();
    let mut touched = Vec::new();

    for (shape_id, edit) in edits {
        let Some(segment) = map.get_mut(shape_id) else {
            log::warn!("Edit references unknown shape {}; skipping", shape_id);
            continue;
        };
        if !gate.allows(edit) {
            log::debug!("Shape {} is not marked as customized; skipping", shape_id);
            continue;
        }

        match (segment, edit) {
            (Segment::Text { body }, ShapeEdit::Text { runs, .. }) => {
                merge_runs(body, runs);
                touched.push(ContainerRef::shape(shape_id.as_str()));
            }
            (Segment::Table { cells }, ShapeEdit::Table { cells: cell_edits, .. }) => {
                for (key, cell_edit) in cell_edits {
                    match cells.get_mut(key) {
                        Some(body) => {
                            merge_runs(body, &cell_edit.runs);
                            touched.push(ContainerRef::cell(shape_id.as_str(), key.0));
                        }
                        None => log::warn!("Edit references unknown cell {} of {}; skipping", key.0, shape_id),
                    }
                }
            }
            (segment, _) => {
                log::warn!(
                    "Edit for {} does not match its {} segment; skipping",
                    shape_id,
                    segment.kind_name()
                );
            }
        }
    }

    MergeOutcome { map, touched }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{CellEdit, Customization};
    use crate::segment::{CellKey, Paragraph, Run};
    use crate::types::TextStyle;
    use std::collections::BTreeMap;

    fn run(id: &str, text: &str) -> Run {
        Run {
            id: id.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn body(runs: Vec<Run>) -> TextBody {
        TextBody::new(vec![Paragraph {
            id: "paragraph-0".to_string(),
            runs,
            ..Default::default()
        }])
    }

    fn text_map() -> SegmentMap {
        let mut map = SegmentMap::new();
        let mut bold = run("r0", "A");
        bold.style = TextStyle {
            bold: Some(true),
            ..Default::default()
        };
        map.insert("s1".to_string(), Segment::Text { body: body(vec![bold, run("r1", "B")]) });
        map
    }

    fn text_edit(runs: Vec<RunEdit>, customization: Option<Customization>) -> ShapeEdit {
        ShapeEdit::Text { runs, customization }
    }

    #[test]
    fn test_merge_deletes_absent_runs() {
        let original = text_map();
        let mut edits = EditPayload::new();
        edits.insert("s1".to_string(), text_edit(vec![RunEdit::new("r0", "X")], None));

        let outcome = merge_updates(&original, &edits, CustomizationGate::All);
        let merged = ContainerRef::shape("s1").resolve(&outcome.map).unwrap();

        assert_eq!(merged.paragraphs[0].runs.len(), 1);
        assert_eq!(merged.paragraphs[0].runs[0].text, "X");
        assert_eq!(merged.paragraphs[0].runs[0].style.bold, Some(true));
        assert_eq!(outcome.touched, vec![ContainerRef::shape("s1")]);

        // The original stays pristine.
        assert_eq!(ContainerRef::shape("s1").resolve(&original).unwrap().text(), "AB");
    }

    #[test]
    fn test_merge_ignores_unknown_runs_and_shapes() {
        let original = text_map();
        let mut edits = EditPayload::new();
        edits.insert(
            "s1".to_string(),
            text_edit(
                vec![RunEdit::new("r0", "A2"), RunEdit::new("r1", "B2"), RunEdit::new("r9", "ghost")],
                None,
            ),
        );
        edits.insert("nope".to_string(), text_edit(vec![RunEdit::new("r0", "Z")], None));

        let outcome = merge_updates(&original, &edits, CustomizationGate::All);
        let merged = ContainerRef::shape("s1").resolve(&outcome.map).unwrap();

        assert_eq!(merged.text(), "A2B2");
        assert_eq!(outcome.touched.len(), 1);
    }

    #[test]
    fn test_merge_respects_customization_gate() {
        let original = text_map();
        let mut edits = EditPayload::new();
        edits.insert(
            "s1".to_string(),
            text_edit(vec![RunEdit::new("r0", "X")], Some(Customization::Original)),
        );

        let gated = merge_updates(&original, &edits, CustomizationGate::All);
        assert!(gated.touched.is_empty());
        assert_eq!(gated.map, original);

        let ignored = merge_updates(&original, &edits, CustomizationGate::Ignore);
        assert_eq!(ContainerRef::shape("s1").resolve(&ignored.map).unwrap().text(), "X");
    }

    #[test]
    fn test_merge_table_cells() {
        let mut cells = BTreeMap::new();
        cells.insert(CellKey(CellLocation::new(0, 0)), body(vec![run("r0", "old\n")]));
        cells.insert(CellKey(CellLocation::new(0, 1)), body(vec![run("r0", "keep\n")]));
        let mut original = SegmentMap::new();
        original.insert("t1".to_string(), Segment::Table { cells });

        let mut cell_edits = BTreeMap::new();
        cell_edits.insert(
            CellKey(CellLocation::new(0, 0)),
            CellEdit {
                runs: vec![RunEdit::new("r0", "new\n")],
            },
        );
        cell_edits.insert(CellKey(CellLocation::new(5, 5)), CellEdit::default());
        let mut edits = EditPayload::new();
        edits.insert(
            "t1".to_string(),
            ShapeEdit::Table {
                cells: cell_edits,
                customization: None,
            },
        );

        let outcome = merge_updates(&original, &edits, CustomizationGate::All);

        let edited = ContainerRef::cell("t1", CellLocation::new(0, 0));
        let untouched = ContainerRef::cell("t1", CellLocation::new(0, 1));
        assert_eq!(edited.resolve(&outcome.map).unwrap().text(), "new\n");
        assert_eq!(untouched.resolve(&outcome.map).unwrap().text(), "keep\n");
        assert_eq!(outcome.touched, vec![edited]);
    }

    #[test]
    fn test_merge_kind_mismatch_is_skipped() {
        let original = text_map();
        let mut edits = EditPayload::new();
        edits.insert(
            "s1".to_string(),
            ShapeEdit::Table {
                cells: BTreeMap::new(),
                customization: None,
            },
        );

        let outcome = merge_updates(&original, &edits, CustomizationGate::All);
        assert!(outcome.touched.is_empty());
        assert_eq!(outcome.map, original);
    }
}
