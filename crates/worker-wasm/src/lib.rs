//! WASM-compatible wrapper for slide segment extraction and edit compilation.
//!
//! This crate exposes the synchronization engine to JavaScript for use in
//! Cloudflare Workers. The worker owns the Slides API calls; this side only
//! turns presentation JSON plus edits into a batch of update requests.

use serde::{Deserialize, Serialize};
use slidesync_core::{runs_template as template, EditPayload, Presentation, Request, SegmentMap, SyncEngine, SyncOptions};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of compiling edits for one presentation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    /// Requests to send in a single batchUpdate call, in order.
    pub requests: Vec<Request>,
    /// Number of requests; zero means there is nothing to submit.
    pub request_count: usize,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than JS Maps for the segment and edit maps
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| js_error(&format!("Serialization error: {}", e)))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Extract the segment map of a presentation.
///
/// # Arguments
/// * `presentation` - Presentation resource JSON, as returned by the Slides API
/// * `page` - Optional slide object id to restrict extraction to
#[wasm_bindgen]
pub fn extract_segments(presentation: &str, page: Option<String>) -> Result<JsValue, JsValue> {
    let map = extract_segments_impl(presentation, page).map_err(|e| js_error(&e))?;
    to_js(&map)
}

fn extract_segments_impl(presentation: &str, page: Option<String>) -> Result<SegmentMap, String> {
    let presentation: Presentation =
        serde_json::from_str(presentation).map_err(|e| format!("Invalid presentation: {}", e))?;

    let mut options = SyncOptions::new();
    if let Some(page) = page {
        options = options.with_page(page);
    }
    SyncEngine::new(options).extract(&presentation).map_err(|e| e.to_string())
}

/// Extract the runs-only edit template of a presentation: the payload a
/// client fills in with new text and sends back to `compile_requests`.
#[wasm_bindgen]
pub fn runs_template(presentation: &str, page: Option<String>) -> Result<JsValue, JsValue> {
    let payload = runs_template_impl(presentation, page).map_err(|e| js_error(&e))?;
    to_js(&payload)
}

fn runs_template_impl(presentation: &str, page: Option<String>) -> Result<EditPayload, String> {
    let map = extract_segments_impl(presentation, page)?;
    Ok(template(&map))
}

/// Compile edits into batch update requests.
///
/// # Arguments
/// * `presentation` - Presentation resource JSON
/// * `edits` - Edit payload JSON (runs-only segment map)
/// * `options` - Optional `{ customizationGate, trimFinalNewline, page }` object
#[wasm_bindgen]
pub fn compile_requests(presentation: &str, edits: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: SyncOptions = if options.is_undefined() || options.is_null() {
        SyncOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| js_error(&format!("Invalid options: {}", e)))?
    };

    let result = compile_requests_impl(presentation, edits, options).map_err(|e| js_error(&e))?;
    to_js(&result)
}

fn compile_requests_impl(presentation: &str, edits: &str, options: SyncOptions) -> Result<CompileResult, String> {
    let presentation: Presentation =
        serde_json::from_str(presentation).map_err(|e| format!("Invalid presentation: {}", e))?;
    let edits: EditPayload = serde_json::from_str(edits).map_err(|e| format!("Invalid edits: {}", e))?;

    let requests = SyncEngine::new(options)
        .plan(&presentation, &edits)
        .map_err(|e| e.to_string())?;

    Ok(CompileResult {
        request_count: requests.len(),
        requests,
    })
}
