//! Edit payloads: the runs-only view of a segment map that callers edit
//! and send back.

use crate::segment::{CellKey, Segment, SegmentMap, TextBody};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// New text for one run, matched by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEdit {
    pub id: String,
    pub text: String,
}

impl RunEdit {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Per-shape opt-in marker. Anything other than `CUSTOM` reads as
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Customization {
    Custom,
    #[serde(other)]
    Original,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellEdit {
    #[serde(default)]
    pub runs: Vec<RunEdit>,
}

/// Edits for one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeEdit {
    Text {
        #[serde(default)]
        runs: Vec<RunEdit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customization: Option<Customization>,
    },
    Table {
        #[serde(default)]
        cells: BTreeMap<CellKey, CellEdit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        customization: Option<Customization>,
    },
}

impl ShapeEdit {
    pub fn customization(&self) -> Option<Customization> {
        match self {
            ShapeEdit::Text { customization, .. } | ShapeEdit::Table { customization, .. } => {
                *customization
            }
        }
    }

    pub fn set_customization(&mut self, value: Option<Customization>) {
        match self {
            ShapeEdit::Text { customization, .. } | ShapeEdit::Table { customization, .. } => {
                *customization = value
            }
        }
    }
}

/// Shape id to edits.
pub type EditPayload = BTreeMap<String, ShapeEdit>;

fn run_edits(body: &TextBody) -> Vec<RunEdit> {
    body.runs().map(|r| RunEdit::new(&r.id, &r.text)).collect()
}

/// Build the runs-only template for a segment map: every run's id and
/// current text, per text shape and per table cell. Images and unknown
/// elements are left out since they cannot be edited.
pub fn runs_template(map: &SegmentMap) -> EditPayload {
    map.iter()
        .filter_map(|(shape_id, segment)| {
            let edit = match segment {
                Segment::Text { body } => ShapeEdit::Text {
                    runs: run_edits(body),
                    customization: None,
                },
                Segment::Table { cells } => ShapeEdit::Table {
                    cells: cells
                        .iter()
                        .map(|(key, body)| (*key, CellEdit { runs: run_edits(body) }))
                        .collect(),
                    customization: None,
                },
                Segment::Image { .. } | Segment::Unknown => return None,
            };
            Some((shape_id.clone(), edit))
        })
        .collect()
}

/// Customization descriptor for one shape, as kept by the caller's own
/// shape records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeCustomization {
    pub shape_id: String,
    #[serde(default)]
    pub customization: Option<Customization>,
}

/// Copy customization flags onto matching shapes of `payload`. Descriptors
/// for shapes the payload does not mention are ignored.
pub fn merge_customization(payload: &mut EditPayload, shapes: &[ShapeCustomization]) {
    for shape in shapes {
        if let Some(edit) = payload.get_mut(&shape.shape_id) {
            edit.set_customization(shape.customization);
        }
    }
}
