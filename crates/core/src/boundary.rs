//! Paragraph boundary preservation after a merge.
//!
//! The Document Store marks paragraph boundaries with line breaks only, so
//! an edited container must end up with the original paragraph count and
//! the original per-paragraph newline convention. Otherwise paragraphs
//! silently collapse, or a stray empty paragraph trails the text.

use crate::segment::Paragraph;

/// Make `edited` match `original` in paragraph count and newline usage.
///
/// When `trim_final_newline` is set, the last non-empty run of the
/// container loses exactly one trailing line break: the store always keeps
/// an implicit final terminator, so emitting ours too would add an empty
/// paragraph. Trailing paragraphs whose runs were all deleted are passed
/// over so the break before them is the one removed.
pub fn preserve_paragraph_boundaries(original: &[Paragraph], edited: &mut Vec<Paragraph>, trim_final_newline: bool) {
    let original_count = original.len();

    while edited.len() > original_count {
        let Some(surplus) = edited.pop() else {
            break;
        };
        match edited.last_mut() {
            Some(last) => last.runs.extend(surplus.runs),
            None => {
                // Nothing to fold into: the original had no paragraphs.
                log::debug!("Dropping surplus paragraph {}", surplus.id);
            }
        }
    }

    while edited.len() < original_count {
        edited.push(Paragraph::placeholder(format!("paragraph-extra-{}", edited.len())));
    }

    for (orig, upd) in original.iter().zip(edited.iter_mut()) {
        let (Some(orig_last), Some(upd_last)) = (orig.runs.last(), upd.runs.last_mut()) else {
            continue;
        };
        if orig_last.text.ends_with('\n') {
            if !upd_last.text.ends_with('\n') {
                upd_last.text.push('\n');
            }
        } else {
            let trimmed = upd_last.text.trim_end_matches('\n').len();
            upd_last.text.truncate(trimmed);
        }
    }

    if trim_final_newline {
        let last_run = edited
            .iter_mut()
            .rev()
            .flat_map(|p| p.runs.iter_mut().rev())
            .find(|r| !r.text.is_empty());
        if let Some(last_run) = last_run {
            if last_run.text.ends_with('\n') {
                last_run.text.pop();
            }
        }
    }
}
