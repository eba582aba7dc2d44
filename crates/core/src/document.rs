//! Raw presentation tree as returned by the Document Store.
//!
//! Mirrors the subset of the Slides API resource that text synchronization
//! needs. Deserialization is lenient: every field defaults, so partial or
//! oddly-shaped elements still load and are dealt with during extraction.

use crate::types::{Bullet, ParagraphStyle, TextStyle};
use serde::{Deserialize, Serialize};

/// A whole presentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_id: Option<String>,
    #[serde(default)]
    pub slides: Vec<Page>,
}

impl Presentation {
    /// Find a page by its object id.
    pub fn page(&self, object_id: &str) -> Option<&Page> {
        self.slides
            .iter()
            .find(|p| p.object_id.as_deref() == Some(object_id))
    }
}

/// A single slide.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub page_elements: Vec<PageElement>,
}

/// A page element. Exactly one of the content fields is expected to be
/// set; [`PageElement::kind`] resolves which.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_group: Option<Group>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

/// What a page element holds, in extraction priority order.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind<'a> {
    Text(&'a TextContent),
    Table(&'a Table),
    Group(&'a Group),
    Image(&'a Image),
    Unknown,
}

impl PageElement {
    /// Classify this element. A shape without a text body is unknown.
    pub fn kind(&self) -> ElementKind<'_> {
        if let Some(text) = self.shape.as_ref().and_then(|s| s.text.as_ref()) {
            ElementKind::Text(text)
        } else if let Some(table) = &self.table {
            ElementKind::Table(table)
        } else if let Some(group) = &self.element_group {
            ElementKind::Group(group)
        } else if let Some(image) = &self.image {
            ElementKind::Image(image)
        } else {
            ElementKind::Unknown
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

/// A text body: a flat token stream of paragraph markers and text runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_marker: Option<ParagraphMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMarker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParagraphStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub children: Vec<PageElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}
