//! Segment extraction: walks the raw element tree and builds a segment map.

use crate::document::{ElementKind, Page, PageElement, Presentation, TextContent};
use crate::error::{Error, Result};
use crate::segment::{text_len, CellKey, CellLocation, Paragraph, Run, Segment, SegmentMap, TextBody};
use crate::types::ParagraphStyle;
use std::collections::BTreeMap;

/// Build paragraphs and runs from a flat token stream.
///
/// Each paragraph marker closes the open paragraph and opens a new one.
/// Each non-empty text run is appended to the open paragraph and advances
/// the cursor. Ids are sequential and only unique within this call.
pub fn extract_paragraphs(content: &TextContent) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;
    let mut paragraph_counter = 0usize;
    let mut run_counter = 0usize;
    let mut cursor = 0usize;

    for element in &content.text_elements {
        if let Some(marker) = &element.paragraph_marker {
            if let Some(mut open) = current.take() {
                open.end_index = cursor;
                paragraphs.push(open);
            }
            current = Some(Paragraph {
                id: format!("paragraph-{}", paragraph_counter),
                start_index: cursor,
                end_index: cursor,
                paragraph_style: marker.style.clone().unwrap_or_default(),
                bullet: marker.bullet.clone(),
                runs: Vec::new(),
            });
            paragraph_counter += 1;
        }

        let Some(run) = &element.text_run else {
            continue;
        };
        let text = match run.content.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => continue,
        };

        // Runs before the first marker still belong somewhere.
        let open = current.get_or_insert_with(|| {
            let paragraph = Paragraph {
                id: format!("paragraph-{}", paragraph_counter),
                start_index: cursor,
                end_index: cursor,
                paragraph_style: ParagraphStyle::default(),
                bullet: None,
                runs: Vec::new(),
            };
            paragraph_counter += 1;
            paragraph
        });

        let length = text_len(text);
        open.runs.push(Run {
            id: format!("run-{}", run_counter),
            start_index: cursor,
            end_index: cursor + length,
            text: text.to_string(),
            style: run.style.clone().unwrap_or_default(),
        });
        run_counter += 1;
        cursor += length;
    }

    if let Some(mut open) = current {
        open.end_index = cursor;
        paragraphs.push(open);
    }

    paragraphs
}

/// Visit one element, adding leaf segments to `map`.
///
/// Groups contribute no entry of their own; their children land in the
/// same map keyed by their own ids. Elements without an id are skipped.
pub fn visit_element(element: &PageElement, map: &mut SegmentMap) {
    let Some(object_id) = element.object_id.as_deref() else {
        log::warn!("Skipping page element without an object id");
        return;
    };

    let segment = match element.kind() {
        ElementKind::Text(content) => Segment::Text {
            body: TextBody::new(extract_paragraphs(content)),
        },
        ElementKind::Table(table) => {
            let mut cells = BTreeMap::new();
            for (row_index, row) in table.table_rows.iter().enumerate() {
                for (column_index, cell) in row.table_cells.iter().enumerate() {
                    let body = cell
                        .text
                        .as_ref()
                        .map(|content| TextBody::new(extract_paragraphs(content)))
                        .unwrap_or_default();
                    cells.insert(CellKey(CellLocation::new(row_index, column_index)), body);
                }
            }
            Segment::Table { cells }
        }
        ElementKind::Group(group) => {
            if group.children.is_empty() {
                log::warn!("Group {} has no children", object_id);
            }
            for child in &group.children {
                visit_element(child, map);
            }
            return;
        }
        ElementKind::Image(image) => Segment::Image {
            image_url: image.content_url.clone(),
        },
        ElementKind::Unknown => Segment::Unknown,
    };

    if map.insert(object_id.to_string(), segment).is_some() {
        log::warn!("Duplicate element id {}; keeping the later element", object_id);
    }
}

/// Extract the segment map of a single page.
pub fn extract_page(page: &Page) -> SegmentMap {
    let mut map = SegmentMap::new();
    for element in &page.page_elements {
        visit_element(element, &mut map);
    }
    log::debug!(
        "Extracted {} segments from page {}",
        map.len(),
        page.object_id.as_deref().unwrap_or("<unnamed>")
    );
    map
}

/// Extract segments from one page (when `page_id` is given) or from every
/// page of the presentation.
pub fn extract_presentation(presentation: &Presentation, page_id: Option<&str>) -> Result<SegmentMap> {
    match page_id {
        Some(id) => presentation
            .page(id)
            .map(extract_page)
            .ok_or_else(|| Error::PageNotFound(id.to_string())),
        None => {
            let mut map = SegmentMap::new();
            for page in &presentation.slides {
                for element in &page.page_elements {
                    visit_element(element, &mut map);
                }
            }
            Ok(map)
        }
    }
}
