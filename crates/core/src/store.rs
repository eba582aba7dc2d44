//! Document Store collaborator: where presentations come from and where
//! compiled batches go.

use crate::document::Presentation;
use crate::error::{Error, Result};
use crate::request::Request;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A store of presentations that accepts atomic batch updates.
///
/// `submit` receives the complete request list for one synchronization
/// and must apply all of it or none. Failures are reported as-is; callers
/// do not retry.
pub trait DocumentStore {
    fn fetch(&self, document_id: &str) -> Result<Presentation>;

    fn submit(&mut self, document_id: &str, requests: &[Request]) -> Result<()>;
}

/// Request body of one batch submission.
#[derive(Debug, Serialize)]
struct BatchBody<'a> {
    requests: &'a [Request],
}

/// A directory of `<document_id>.json` presentations. Submitted batches
/// are written whole to `<document_id>.batch.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, document_id: &str) -> Result<PathBuf> {
        if document_id.is_empty() || document_id.contains(['/', '\\']) || document_id.starts_with('.') {
            return Err(Error::DocumentNotFound(document_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", document_id)))
    }

    /// Where the last batch submitted for `document_id` is written.
    pub fn batch_path(&self, document_id: &str) -> PathBuf {
        self.root.join(format!("{}.batch.json", document_id))
    }
}

impl DocumentStore for JsonFileStore {
    fn fetch(&self, document_id: &str) -> Result<Presentation> {
        let path = self.document_path(document_id)?;
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::DocumentNotFound(document_id.to_string()),
            _ => Error::IoError(e),
        })?;
        log::debug!("Fetched {}", path.display());
        Ok(serde_json::from_str(&content)?)
    }

    fn submit(&mut self, document_id: &str, requests: &[Request]) -> Result<()> {
        // Only known documents accept batches.
        let path = self.document_path(document_id)?;
        if !path.exists() {
            return Err(Error::DocumentNotFound(document_id.to_string()));
        }

        let body = serde_json::to_string_pretty(&BatchBody { requests })?;
        let batch_path = self.batch_path(document_id);
        let staging = batch_path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &batch_path)?;

        log::info!("Submitted {} requests for {}", requests.len(), document_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{DeleteText, TextRange};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slidesync-store-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_fetch_and_submit() {
        let dir = temp_dir("roundtrip");
        fs::write(dir.join("deck.json"), r#"{"presentationId":"deck","slides":[{"objectId":"p1"}]}"#).unwrap();
        let mut store = JsonFileStore::new(&dir);

        let presentation = store.fetch("deck").unwrap();
        assert_eq!(presentation.slides.len(), 1);

        let requests = vec![Request::DeleteText(DeleteText {
            object_id: "s1".to_string(),
            cell_location: None,
            text_range: TextRange::All,
        })];
        store.submit("deck", &requests).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.batch_path("deck")).unwrap()).unwrap();
        assert_eq!(written["requests"][0]["deleteText"]["objectId"], "s1");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_document() {
        let dir = temp_dir("missing");
        let mut store = JsonFileStore::new(&dir);

        assert!(matches!(store.fetch("nope"), Err(Error::DocumentNotFound(_))));
        assert!(matches!(store.submit("nope", &[]), Err(Error::DocumentNotFound(_))));
        assert!(matches!(store.fetch("../etc"), Err(Error::DocumentNotFound(_))));

        fs::remove_dir_all(dir).ok();
    }
}
