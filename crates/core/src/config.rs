//! Synchronization options.

use crate::edit::{Customization, ShapeEdit};
use serde::{Deserialize, Serialize};

/// Which shape edits consult their customization flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomizationGate {
    /// Never consult the flag; every edit applies.
    Ignore,
    /// Consult the flag for text shapes only.
    TextOnly,
    /// Consult the flag for text and table shapes alike.
    #[default]
    All,
}

impl CustomizationGate {
    /// Whether `edit` may be applied. A flag that is absent never blocks.
    pub fn allows(&self, edit: &ShapeEdit) -> bool {
        let consulted = match (self, edit) {
            (CustomizationGate::Ignore, _) => false,
            (CustomizationGate::TextOnly, ShapeEdit::Table { .. }) => false,
            (CustomizationGate::TextOnly, ShapeEdit::Text { .. }) | (CustomizationGate::All, _) => true,
        };
        if !consulted {
            return true;
        }
        !matches!(edit.customization(), Some(Customization::Original))
    }
}

/// Options for one synchronization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncOptions {
    /// Customization gate applied by the merger.
    pub customization_gate: CustomizationGate,
    /// Strip the container's implicit final line break from the last run.
    pub trim_final_newline: bool,
    /// Restrict extraction to one page.
    pub page: Option<String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            customization_gate: CustomizationGate::default(),
            trim_final_newline: true,
            page: None,
        }
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customization_gate(mut self, gate: CustomizationGate) -> Self {
        self.customization_gate = gate;
        self
    }

    pub fn with_trim_final_newline(mut self, trim: bool) -> Self {
        self.trim_final_newline = trim;
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}
