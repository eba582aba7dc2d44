//! The synchronization pipeline: extract, merge, repair, recalculate,
//! compile, and submit as one batch.

use crate::boundary::preserve_paragraph_boundaries;
use crate::compile::compile_container;
use crate::config::SyncOptions;
use crate::document::Presentation;
use crate::edit::EditPayload;
use crate::error::Result;
use crate::extract::extract_presentation;
use crate::indices::recalc_indices;
use crate::merge::merge_updates;
use crate::request::Request;
use crate::segment::SegmentMap;
use crate::store::DocumentStore;

/// What one synchronization did.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Containers an edit was applied to.
    pub containers: usize,
    /// The batch that was (or, when empty, was not) submitted.
    pub requests: Vec<Request>,
}

impl SyncReport {
    pub fn submitted(&self) -> bool {
        !self.requests.is_empty()
    }
}

/// Runs the edit pipeline with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Extract the segment map this engine works on.
    pub fn extract(&self, presentation: &Presentation) -> Result<SegmentMap> {
        extract_presentation(presentation, self.options.page.as_deref())
    }

    /// Compile edits against an already extracted segment map.
    ///
    /// Only containers an edit was applied to produce requests. The
    /// original map is never modified.
    pub fn compile(&self, original: &SegmentMap, edits: &EditPayload) -> Vec<Request> {
        self.run(original, edits).requests
    }

    fn run(&self, original: &SegmentMap, edits: &EditPayload) -> SyncReport {
        let mut outcome = merge_updates(original, edits, self.options.customization_gate);
        let mut requests = Vec::new();

        for target in &outcome.touched {
            let (Some(pristine), Some(working)) = (target.resolve(original), target.resolve_mut(&mut outcome.map))
            else {
                continue;
            };

            preserve_paragraph_boundaries(
                &pristine.paragraphs,
                &mut working.paragraphs,
                self.options.trim_final_newline,
            );
            recalc_indices(working);

            let compiled = compile_container(target, working, pristine);
            log::debug!("{:?}: {} requests", target, compiled.len());
            requests.extend(compiled);
        }

        SyncReport {
            containers: outcome.touched.len(),
            requests,
        }
    }

    /// Extract from a raw presentation and compile edits against it.
    pub fn plan(&self, presentation: &Presentation, edits: &EditPayload) -> Result<Vec<Request>> {
        let original = self.extract(presentation)?;
        Ok(self.compile(&original, edits))
    }

    /// Fetch `document_id`, compile `edits`, and submit every request in a
    /// single batch. Nothing is submitted when there is nothing to change.
    pub fn synchronize<S: DocumentStore + ?Sized>(
        &self,
        store: &mut S,
        document_id: &str,
        edits: &EditPayload,
    ) -> Result<SyncReport> {
        let presentation = store.fetch(document_id)?;
        let original = self.extract(&presentation)?;
        let report = self.run(&original, edits);

        if report.submitted() {
            store.submit(document_id, &report.requests)?;
        } else {
            log::info!("No updates to perform for {}", document_id);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomizationGate;
    use crate::edit::{runs_template, RunEdit, ShapeEdit};
    use crate::error::Error;
    use crate::request::TextRange;
    use serde_json::json;

    fn hello_world() -> Presentation {
        serde_json::from_value(json!({
            "presentationId": "deck",
            "slides": [ { "objectId": "p1", "pageElements": [
                { "objectId": "s1", "shape": { "text": { "textElements": [
                    { "paragraphMarker": { "style": { "direction": "LEFT_TO_RIGHT" } } },
                    { "textRun": { "content": "Hello ", "style": { "bold": true } } },
                    { "textRun": { "content": "World\n", "style": { "bold": false } } }
                ] } } },
                { "objectId": "t1", "table": { "tableRows": [ { "tableCells": [
                    { "text": { "textElements": [
                        { "paragraphMarker": { "bullet": { "glyph": "●", "bulletStyle": {} } } },
                        { "textRun": { "content": "Cell\n", "style": { "italic": true } } }
                    ] } },
                    {}
                ] } ] } }
            ] } ]
        }))
        .unwrap()
    }

    fn hi_earth() -> EditPayload {
        let mut edits = EditPayload::new();
        edits.insert(
            "s1".to_string(),
            ShapeEdit::Text {
                runs: vec![RunEdit::new("run-0", "Hi "), RunEdit::new("run-1", "Earth\n")],
                customization: None,
            },
        );
        edits
    }

    fn fixed(start_index: usize, end_index: usize) -> TextRange {
        TextRange::FixedRange {
            start_index,
            end_index,
        }
    }

    fn inserted_text(requests: &[Request], object_id: &str) -> Option<String> {
        requests.iter().find_map(|r| match r {
            Request::InsertText(i) if i.object_id == object_id => Some(i.text.clone()),
            _ => None,
        })
    }

    #[derive(Default)]
    struct RecordingStore {
        presentation: Presentation,
        batches: Vec<Vec<Request>>,
        reject: bool,
    }

    impl DocumentStore for RecordingStore {
        fn fetch(&self, document_id: &str) -> Result<Presentation> {
            match self.presentation.presentation_id.as_deref() {
                Some(id) if id == document_id => Ok(self.presentation.clone()),
                _ => Err(Error::DocumentNotFound(document_id.to_string())),
            }
        }

        fn submit(&mut self, _document_id: &str, requests: &[Request]) -> Result<()> {
            if self.reject {
                return Err(Error::StoreError("quota exceeded".to_string()));
            }
            self.batches.push(requests.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_hello_world_keeping_final_newline() {
        let engine = SyncEngine::new(SyncOptions::new().with_trim_final_newline(false));
        let requests = engine.plan(&hello_world(), &hi_earth()).unwrap();

        assert!(matches!(&requests[0], Request::DeleteText(d) if d.object_id == "s1"));
        assert_eq!(inserted_text(&requests, "s1").as_deref(), Some("Hi Earth\n"));
        match (&requests[2], &requests[3]) {
            (Request::UpdateTextStyle(a), Request::UpdateTextStyle(b)) => {
                assert_eq!((a.style.bold, a.text_range), (Some(true), fixed(0, 3)));
                assert_eq!((b.style.bold, b.text_range), (Some(false), fixed(3, 9)));
            }
            other => panic!("unexpected requests: {:?}", other),
        }
        assert!(matches!(&requests[4], Request::DeleteParagraphBullets(d) if d.text_range == fixed(0, 9)));
        assert!(matches!(&requests[5], Request::UpdateParagraphStyle(u) if u.fields == "direction"));
        assert_eq!(requests.len(), 6);
    }

    #[test]
    fn test_hello_world_trims_final_newline_by_default() {
        let requests = SyncEngine::default().plan(&hello_world(), &hi_earth()).unwrap();

        assert_eq!(inserted_text(&requests, "s1").as_deref(), Some("Hi Earth"));
        let ranges: Vec<TextRange> = requests
            .iter()
            .filter_map(|r| match r {
                Request::UpdateTextStyle(u) => Some(u.text_range),
                _ => None,
            })
            .collect();
        assert_eq!(ranges, vec![fixed(0, 3), fixed(3, 8)]);
    }

    #[test]
    fn test_identity_round_trip() {
        let engine = SyncEngine::new(SyncOptions::new().with_trim_final_newline(false));
        let original = engine.extract(&hello_world()).unwrap();
        let requests = engine.compile(&original, &runs_template(&original));

        assert_eq!(inserted_text(&requests, "s1").as_deref(), Some("Hello World\n"));
        assert_eq!(inserted_text(&requests, "t1").as_deref(), Some("Cell\n"));

        let cell_requests: Vec<&Request> = requests.iter().filter(|r| r.object_id() == "t1").collect();
        assert!(cell_requests.iter().all(|r| r.cell_location().is_some()));
        assert!(cell_requests.iter().any(|r| matches!(r,
            Request::UpdateTextStyle(u) if u.style.italic == Some(true) && u.text_range == fixed(0, 5))));
        assert!(cell_requests
            .iter()
            .any(|r| matches!(r, Request::CreateParagraphBullets(c) if c.text_range == fixed(0, 5))));
    }

    #[test]
    fn test_empty_cell_emits_no_text_requests() {
        let requests = SyncEngine::default()
            .plan(&hello_world(), &runs_template(&SyncEngine::default().extract(&hello_world()).unwrap()))
            .unwrap();

        assert!(!requests
            .iter()
            .any(|r| r.cell_location() == Some(crate::segment::CellLocation::new(0, 1))));
    }

    #[test]
    fn test_compile_leaves_original_untouched() {
        let engine = SyncEngine::default();
        let original = engine.extract(&hello_world()).unwrap();
        let snapshot = original.clone();

        engine.compile(&original, &hi_earth());
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_gated_edit_produces_nothing() {
        let mut edits = hi_earth();
        let payload: EditPayload = serde_json::from_value(json!({
            "s1": { "type": "text", "runs": [ { "id": "run-0", "text": "Nope" } ], "customization": "ORIGINAL" }
        }))
        .unwrap();
        edits.extend(payload);

        let engine = SyncEngine::new(SyncOptions::new().with_customization_gate(CustomizationGate::All));
        assert!(engine.plan(&hello_world(), &edits).unwrap().is_empty());
    }

    #[test]
    fn test_synchronize_submits_one_batch() {
        let mut store = RecordingStore {
            presentation: hello_world(),
            ..Default::default()
        };
        let engine = SyncEngine::default();

        let report = engine.synchronize(&mut store, "deck", &hi_earth()).unwrap();

        assert!(report.submitted());
        assert_eq!(report.containers, 1);
        assert_eq!(store.batches.len(), 1);
        assert_eq!(store.batches[0], report.requests);
    }

    #[test]
    fn test_synchronize_skips_empty_batch() {
        let mut store = RecordingStore {
            presentation: hello_world(),
            ..Default::default()
        };

        let report = SyncEngine::default()
            .synchronize(&mut store, "deck", &EditPayload::new())
            .unwrap();

        assert!(!report.submitted());
        assert!(store.batches.is_empty());
    }

    #[test]
    fn test_synchronize_propagates_store_errors() {
        let mut store = RecordingStore {
            presentation: hello_world(),
            reject: true,
            ..Default::default()
        };
        let engine = SyncEngine::default();

        assert!(matches!(
            engine.synchronize(&mut store, "deck", &hi_earth()),
            Err(Error::StoreError(_))
        ));
        assert!(matches!(
            engine.synchronize(&mut store, "other", &hi_earth()),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_deleting_last_paragraph_leaves_no_trailing_break() {
        let presentation: Presentation = serde_json::from_value(json!({
            "slides": [ { "objectId": "p1", "pageElements": [
                { "objectId": "s1", "shape": { "text": { "textElements": [
                    { "paragraphMarker": {} },
                    { "textRun": { "content": "a\n" } },
                    { "paragraphMarker": {} },
                    { "textRun": { "content": "b\n" } }
                ] } } }
            ] } ]
        }))
        .unwrap();
        let mut edits = EditPayload::new();
        edits.insert(
            "s1".to_string(),
            ShapeEdit::Text {
                runs: vec![RunEdit::new("run-0", "a\n")],
                customization: None,
            },
        );

        let requests = SyncEngine::default().plan(&presentation, &edits).unwrap();
        assert_eq!(inserted_text(&requests, "s1").as_deref(), Some("a"));
    }

    #[test]
    fn test_page_option_restricts_extraction() {
        let engine = SyncEngine::new(SyncOptions::new().with_page("missing"));
        assert!(matches!(engine.plan(&hello_world(), &hi_earth()), Err(Error::PageNotFound(_))));
    }
}
