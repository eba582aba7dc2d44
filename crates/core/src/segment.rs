//! The segment map: addressable paragraphs and runs with stable ids and
//! character offsets, keyed by shape and table cell.

use crate::error::Error;
use crate::types::{Bullet, ParagraphStyle, TextStyle};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Length of `text` in the units the Document Store indexes by (UTF-16
/// code units).
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// The smallest styled span of text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,
    pub start_index: usize,
    pub end_index: usize,
    pub text: String,
    #[serde(default)]
    pub style: TextStyle,
}

impl Run {
    pub fn len(&self) -> usize {
        text_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An ordered group of runs sharing paragraph style and bullet state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub id: String,
    pub start_index: usize,
    pub end_index: usize,
    #[serde(default)]
    pub paragraph_style: ParagraphStyle,
    #[serde(default)]
    pub bullet: Option<Bullet>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// An empty paragraph with neutral style and no bullet.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether any run holds something other than whitespace.
    pub fn has_visible_text(&self) -> bool {
        self.runs.iter().any(|r| !r.text.trim().is_empty())
    }
}

/// A shape's or a table cell's text: an ordered list of paragraphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }

    pub fn char_count(&self) -> usize {
        self.runs().map(Run::len).sum()
    }

    pub fn find_run(&self, id: &str) -> Option<&Run> {
        self.runs().find(|r| r.id == id)
    }
}

/// Address of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellLocation {
    pub row_index: usize,
    pub column_index: usize,
}

impl CellLocation {
    pub fn new(row_index: usize, column_index: usize) -> Self {
        Self {
            row_index,
            column_index,
        }
    }
}

/// `row-col`, the key form used in segment maps and edit payloads.
impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row_index, self.column_index)
    }
}

impl FromStr for CellLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once('-')
            .ok_or_else(|| Error::InvalidCellKey(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidCellKey(s.to_string()))
        };
        Ok(Self::new(parse(row)?, parse(col)?))
    }
}

/// Map key wrapper so table cells serialize as `"row-col"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey(pub CellLocation);

impl From<CellLocation> for CellKey {
    fn from(location: CellLocation) -> Self {
        Self(location)
    }
}

impl Serialize for CellKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<CellLocation>()
            .map(CellKey)
            .map_err(serde::de::Error::custom)
    }
}

/// Per-shape entry of a segment map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text {
        #[serde(flatten)]
        body: TextBody,
    },
    Table {
        cells: BTreeMap<CellKey, TextBody>,
    },
    Image {
        #[serde(rename = "imageUrl", default)]
        image_url: Option<String>,
    },
    Unknown,
}

impl Segment {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Table { .. } => "table",
            Segment::Image { .. } => "image",
            Segment::Unknown => "unknown",
        }
    }
}

/// Shape id to segment, for one page or a whole presentation.
pub type SegmentMap = BTreeMap<String, Segment>;
