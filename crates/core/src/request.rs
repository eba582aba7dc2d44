//! Range-addressed edit operations, serialized in the Document Store's
//! batch update request format.

use crate::bullets::BulletPreset;
use crate::segment::CellLocation;
use crate::types::{ParagraphStyle, TextStyle};
use serde::{Deserialize, Serialize};

/// The span an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextRange {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "FIXED_RANGE", rename_all = "camelCase")]
    FixedRange { start_index: usize, end_index: usize },
}

impl TextRange {
    /// A half-open range, or `None` when it would be empty or inverted.
    pub fn fixed(start_index: usize, end_index: usize) -> Option<Self> {
        (end_index > start_index).then_some(TextRange::FixedRange {
            start_index,
            end_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteText {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text_range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertText {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub insertion_index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub style: TextStyle,
    pub text_range: TextRange,
    /// Comma-separated field mask naming exactly the fields set in `style`.
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text_range: TextRange,
    pub bullet_preset: BulletPreset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParagraphBullets {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub text_range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub object_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<CellLocation>,
    pub style: ParagraphStyle,
    pub text_range: TextRange,
    pub fields: String,
}

/// One entry of a batch update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    DeleteText(DeleteText),
    InsertText(InsertText),
    UpdateTextStyle(UpdateTextStyle),
    CreateParagraphBullets(CreateParagraphBullets),
    DeleteParagraphBullets(DeleteParagraphBullets),
    UpdateParagraphStyle(UpdateParagraphStyle),
}

impl Request {
    pub fn object_id(&self) -> &str {
        match self {
            Request::DeleteText(r) => &r.object_id,
            Request::InsertText(r) => &r.object_id,
            Request::UpdateTextStyle(r) => &r.object_id,
            Request::CreateParagraphBullets(r) => &r.object_id,
            Request::DeleteParagraphBullets(r) => &r.object_id,
            Request::UpdateParagraphStyle(r) => &r.object_id,
        }
    }

    pub fn cell_location(&self) -> Option<CellLocation> {
        match self {
            Request::DeleteText(r) => r.cell_location,
            Request::InsertText(r) => r.cell_location,
            Request::UpdateTextStyle(r) => r.cell_location,
            Request::CreateParagraphBullets(r) => r.cell_location,
            Request::DeleteParagraphBullets(r) => r.cell_location,
            Request::UpdateParagraphStyle(r) => r.cell_location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_range_rejects_empty() {
        assert_eq!(TextRange::fixed(3, 3), None);
        assert_eq!(TextRange::fixed(4, 3), None);
        assert!(TextRange::fixed(0, 1).is_some());
    }

    #[test]
    fn test_request_wire_format() {
        let delete = Request::DeleteText(DeleteText {
            object_id: "t1".to_string(),
            cell_location: Some(CellLocation::new(1, 2)),
            text_range: TextRange::All,
        });
        assert_eq!(
            serde_json::to_value(&delete).unwrap(),
            json!({ "deleteText": {
                "objectId": "t1",
                "cellLocation": { "rowIndex": 1, "columnIndex": 2 },
                "textRange": { "type": "ALL" }
            } })
        );

        let style = Request::UpdateTextStyle(UpdateTextStyle {
            object_id: "s1".to_string(),
            cell_location: None,
            style: TextStyle {
                bold: Some(true),
                ..Default::default()
            },
            text_range: TextRange::FixedRange {
                start_index: 0,
                end_index: 3,
            },
            fields: "bold".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&style).unwrap(),
            json!({ "updateTextStyle": {
                "objectId": "s1",
                "style": { "bold": true },
                "textRange": { "type": "FIXED_RANGE", "startIndex": 0, "endIndex": 3 },
                "fields": "bold"
            } })
        );
        assert_eq!(style.object_id(), "s1");
        assert_eq!(delete.cell_location(), Some(CellLocation::new(1, 2)));
    }
}
