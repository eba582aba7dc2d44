//! Read-only views of extracted content: per-page shape listings and
//! plain-text rendering.

use crate::document::{ElementKind, Page, PageElement, Presentation};
use crate::error::{Error, Result};
use crate::extract::extract_page;
use crate::segment::{text_len, CellLocation, Segment, SegmentMap, TextBody};
use serde::{Deserialize, Serialize};

/// Plain text of one table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSummary {
    pub row_index: usize,
    pub column_index: usize,
    pub text: String,
}

/// One visible shape on a page, in visit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSummary {
    pub shape_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// 1-based position in visit order. Groups take a number too even
    /// though they are not listed themselves.
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub character_count: usize,
    /// Hex color of the first explicitly colored run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Every cell of a table in row, then column order; empty cells
    /// have empty text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_cells: Vec<CellSummary>,
}

/// Shapes of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// 1-based slide number.
    pub slide_number: usize,
    pub page_object_id: Option<String>,
    pub shapes: Vec<ShapeSummary>,
}

fn collect_shapes(element: &PageElement, map: &SegmentMap, order: &mut usize, out: &mut Vec<ShapeSummary>) {
    let Some(id) = element.object_id.as_deref() else {
        return;
    };
    let position = *order;
    *order += 1;
    if let ElementKind::Group(group) = element.kind() {
        for child in &group.children {
            collect_shapes(child, map, order, out);
        }
        return;
    }
    let Some(segment) = map.get(id) else {
        return;
    };

    let mut summary = ShapeSummary {
        shape_id: id.to_string(),
        kind: segment.kind_name().to_string(),
        order: position,
        text: None,
        character_count: 0,
        font_color: None,
        image_url: None,
        table_cells: Vec::new(),
    };

    match segment {
        Segment::Text { body } => {
            let text = body.text();
            summary.character_count = text_len(&text);
            summary.font_color = body
                .runs()
                .find_map(|r| r.style.foreground_color.as_ref().and_then(|c| c.hex()));
            summary.text = Some(text);
        }
        Segment::Table { cells } => {
            summary.character_count = cells.values().map(TextBody::char_count).sum();
            summary.table_cells = cells
                .iter()
                .map(|(key, body)| {
                    let CellLocation {
                        row_index,
                        column_index,
                    } = key.0;
                    CellSummary {
                        row_index,
                        column_index,
                        text: body.text(),
                    }
                })
                .collect();
        }
        Segment::Image { image_url } => summary.image_url = image_url.clone(),
        Segment::Unknown => {}
    }
    out.push(summary);
}

/// List the shapes of every page, or of the page with `page_id`.
pub fn summarize(presentation: &Presentation, page_id: Option<&str>) -> Result<Vec<PageSummary>> {
    let pages: Vec<(usize, &Page)> = presentation
        .slides
        .iter()
        .enumerate()
        .filter(|(_, page)| page_id.is_none() || page.object_id.as_deref() == page_id)
        .map(|(i, page)| (i + 1, page))
        .collect();

    if let (Some(id), true) = (page_id, pages.is_empty()) {
        return Err(Error::PageNotFound(id.to_string()));
    }

    Ok(pages
        .into_iter()
        .map(|(slide_number, page)| {
            let map = extract_page(page);
            let mut order = 1;
            let mut shapes = Vec::new();
            for element in &page.page_elements {
                collect_shapes(element, &map, &mut order, &mut shapes);
            }
            PageSummary {
                slide_number,
                page_object_id: page.object_id.clone(),
                shapes,
            }
        })
        .collect())
}

fn paragraph_lines(body: &TextBody, separator: &str) -> String {
    body.paragraphs
        .iter()
        .map(|p| p.runs.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Leaf element ids in slide order, groups flattened in place.
fn leaf_ids<'a>(elements: &'a [PageElement], out: &mut Vec<&'a str>) {
    for element in elements {
        let Some(id) = element.object_id.as_deref() else {
            continue;
        };
        match element.kind() {
            ElementKind::Group(group) => leaf_ids(&group.children, out),
            _ => out.push(id),
        }
    }
}

/// Render a page as plain text in slide order: text shapes line by line,
/// table cells space-separated on one line. Images and unknown shapes are
/// skipped.
pub fn page_text(page: &Page) -> String {
    let map = extract_page(page);
    let mut ids = Vec::new();
    leaf_ids(&page.page_elements, &mut ids);

    let mut out = String::new();
    for segment in ids.into_iter().filter_map(|id| map.get(id)) {
        match segment {
            Segment::Text { body } => {
                out.push_str(&paragraph_lines(body, "\n"));
                out.push('\n');
            }
            Segment::Table { cells } => {
                for body in cells.values() {
                    out.push_str(&paragraph_lines(body, " "));
                    out.push(' ');
                }
                out.push('\n');
            }
            Segment::Image { .. } | Segment::Unknown => {}
        }
    }
    out.trim().to_string()
}

/// Plain text of every page (or one page), pages separated by a blank line.
pub fn presentation_text(presentation: &Presentation, page_id: Option<&str>) -> Result<String> {
    let pages: Vec<&Page> = match page_id {
        Some(id) => vec![presentation
            .page(id)
            .ok_or_else(|| Error::PageNotFound(id.to_string()))?],
        None => presentation.slides.iter().collect(),
    };

    Ok(pages
        .into_iter()
        .map(page_text)
        .collect::<Vec<_>>()
        .join("\n\n"))
}
