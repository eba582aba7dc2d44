//! Offset recalculation for edited containers.

use crate::segment::TextBody;

/// Reassign contiguous offsets in one left-to-right pass.
///
/// Runs are laid end to end from zero; a paragraph spans its first run's
/// start to its last run's end, and an empty paragraph sits at the cursor.
pub fn recalc_indices(body: &mut TextBody) {
    let mut cursor = 0usize;
    for paragraph in &mut body.paragraphs {
        paragraph.start_index = cursor;
        for run in &mut paragraph.runs {
            run.start_index = cursor;
            run.end_index = cursor + run.len();
            cursor = run.end_index;
        }
        paragraph.end_index = cursor;
    }
}
