//! Segment model and formatting synchronization engine for writing edited
//! text back into slide documents without losing their formatting.

pub mod boundary;
pub mod bullets;
pub mod compile;
pub mod config;
pub mod document;
pub mod edit;
pub mod error;
pub mod extract;
pub mod indices;
pub mod merge;
pub mod request;
pub mod segment;
pub mod store;
pub mod summary;
pub mod sync;
pub mod types;

pub use bullets::BulletPreset;
pub use config::{CustomizationGate, SyncOptions};
pub use document::Presentation;
pub use edit::{runs_template, Customization, EditPayload, ShapeCustomization, ShapeEdit};
pub use error::{Error, Result};
pub use extract::extract_presentation;
pub use merge::ContainerRef;
pub use request::{Request, TextRange};
pub use segment::{CellLocation, Paragraph, Run, Segment, SegmentMap, TextBody};
pub use store::{DocumentStore, JsonFileStore};
pub use summary::{presentation_text, summarize, CellSummary, PageSummary, ShapeSummary};
pub use sync::{SyncEngine, SyncReport};
