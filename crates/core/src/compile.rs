//! Formatting compiler: turns a finalized container into ordered batch
//! requests that rewrite its text and reapply the original formatting.

use crate::bullets::BulletPreset;
use crate::merge::ContainerRef;
use crate::request::{
    CreateParagraphBullets, DeleteParagraphBullets, DeleteText, InsertText, Request, TextRange,
    UpdateParagraphStyle, UpdateTextStyle,
};
use crate::segment::{Run, TextBody};
use std::collections::HashMap;

/// Compile requests for one container.
///
/// `edited` must carry final text and recalculated offsets; `original` is
/// the pristine container used to look up run styles by id. Requests come
/// out as: delete, insert, run styles in run order, then bullet and
/// paragraph style per paragraph. Style ranges refer to the text as it
/// stands after the insert.
pub fn compile_container(target: &ContainerRef, edited: &TextBody, original: &TextBody) -> Vec<Request> {
    let text = edited.text();
    if text.is_empty() {
        log::debug!("{:?} is empty after the edit; nothing to emit", target);
        return Vec::new();
    }

    let object_id = target.shape_id.clone();
    let cell_location = target.cell;
    let mut requests = Vec::new();

    requests.push(Request::DeleteText(DeleteText {
        object_id: object_id.clone(),
        cell_location,
        text_range: TextRange::All,
    }));
    requests.push(Request::InsertText(InsertText {
        object_id: object_id.clone(),
        cell_location,
        insertion_index: 0,
        text,
    }));

    let original_runs: HashMap<&str, &Run> = original.runs().map(|r| (r.id.as_str(), r)).collect();

    for run in edited.runs() {
        let Some(text_range) = TextRange::fixed(run.start_index, run.end_index) else {
            continue;
        };
        let Some(source) = original_runs.get(run.id.as_str()) else {
            log::debug!("Run {} has no original; leaving its style alone", run.id);
            continue;
        };
        let (style, fields) = source.style.sparse_update();
        if fields.is_empty() {
            continue;
        }
        requests.push(Request::UpdateTextStyle(UpdateTextStyle {
            object_id: object_id.clone(),
            cell_location,
            style,
            text_range,
            fields: fields.join(","),
        }));
    }

    for paragraph in &edited.paragraphs {
        if paragraph.runs.is_empty() {
            continue;
        }
        let Some(text_range) = TextRange::fixed(paragraph.start_index, paragraph.end_index) else {
            continue;
        };

        let bullet = paragraph
            .bullet
            .as_ref()
            .filter(|b| b.bullet_style.is_some() && paragraph.has_visible_text());
        match bullet {
            Some(bullet) => requests.push(Request::CreateParagraphBullets(CreateParagraphBullets {
                object_id: object_id.clone(),
                cell_location,
                text_range,
                bullet_preset: BulletPreset::from_glyph(bullet.glyph.as_deref()),
            })),
            None => requests.push(Request::DeleteParagraphBullets(DeleteParagraphBullets {
                object_id: object_id.clone(),
                cell_location,
                text_range,
            })),
        }

        let (style, fields) = paragraph.paragraph_style.sparse_update();
        if !fields.is_empty() {
            requests.push(Request::UpdateParagraphStyle(UpdateParagraphStyle {
                object_id: object_id.clone(),
                cell_location,
                style,
                text_range,
                fields: fields.join(","),
            }));
        }
    }

    requests
}
