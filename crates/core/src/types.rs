//! Sparse style records shared by the raw document tree, the segment map,
//! and the compiled batch requests.
//!
//! Every attribute is an `Option`: `None` means "not specified, leave the
//! document alone". Compiled style updates only ever name defined fields.

use serde::{Deserialize, Serialize};

/// A magnitude with a unit, e.g. `{ "magnitude": 14, "unit": "PT" }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Dimension {
    /// Create a dimension in points.
    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some("PT".to_string()),
        }
    }

    /// A dimension carries a value when either its unit or a non-zero
    /// magnitude is present.
    fn is_meaningful(&self) -> bool {
        self.unit.is_some() || self.magnitude.is_some_and(|m| m != 0.0)
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<f32>,
}

impl RgbColor {
    /// Format as `#rrggbb`. Missing components count as zero.
    pub fn to_hex(&self) -> String {
        let component = |c: Option<f32>| (c.unwrap_or(0.0).clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            component(self.red),
            component(self.green),
            component(self.blue)
        )
    }
}

/// A solid color, either explicit RGB or a theme reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb_color: Option<RgbColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
}

/// A color that may be transparent (no `opaqueColor`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opaque_color: Option<OpaqueColor>,
}

impl OptionalColor {
    /// Hex form of an explicit RGB color, if any.
    pub fn hex(&self) -> Option<String> {
        self.opaque_color
            .as_ref()
            .and_then(|c| c.rgb_color.as_ref())
            .map(RgbColor::to_hex)
    }
}

/// Font family with an explicit weight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

/// Character-level style of a text run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_offset: Option<String>,
}

impl TextStyle {
    /// Build the update payload for this style: a copy holding only the
    /// attributes that carry a value, plus the matching field mask.
    ///
    /// Colors without an `opaqueColor` and empty strings are treated as
    /// unset so an update never clears something the source left alone.
    pub fn sparse_update(&self) -> (TextStyle, Vec<&'static str>) {
        let mut style = TextStyle::default();
        let mut fields = Vec::new();

        if let Some(v) = self.bold {
            style.bold = Some(v);
            fields.push("bold");
        }
        if let Some(v) = self.italic {
            style.italic = Some(v);
            fields.push("italic");
        }
        if let Some(v) = self.underline {
            style.underline = Some(v);
            fields.push("underline");
        }
        if let Some(v) = self.strikethrough {
            style.strikethrough = Some(v);
            fields.push("strikethrough");
        }
        if let Some(family) = self.font_family.as_ref().filter(|f| !f.is_empty()) {
            style.font_family = Some(family.clone());
            fields.push("fontFamily");
        }
        if let Some(size) = &self.font_size {
            style.font_size = Some(size.clone());
            fields.push("fontSize");
        }
        if let Some(color) = self.foreground_color.as_ref().filter(|c| c.opaque_color.is_some()) {
            style.foreground_color = Some(color.clone());
            fields.push("foregroundColor");
        }
        if let Some(color) = self.background_color.as_ref().filter(|c| c.opaque_color.is_some()) {
            style.background_color = Some(color.clone());
            fields.push("backgroundColor");
        }
        if let Some(family) = &self.weighted_font_family {
            style.weighted_font_family = Some(family.clone());
            fields.push("weightedFontFamily");
        }
        if let Some(offset) = self.baseline_offset.as_ref().filter(|o| !o.is_empty()) {
            style.baseline_offset = Some(offset.clone());
            fields.push("baselineOffset");
        }
        if let Some(v) = self.small_caps {
            style.small_caps = Some(v);
            fields.push("smallCaps");
        }

        (style, fields)
    }
}

/// Paragraph-level style carried by a paragraph marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_end: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_first_line: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_mode: Option<String>,
}

impl ParagraphStyle {
    /// Same contract as [`TextStyle::sparse_update`].
    ///
    /// Indents need a unit to be meaningful; spacing needs a unit or a
    /// non-zero magnitude.
    pub fn sparse_update(&self) -> (ParagraphStyle, Vec<&'static str>) {
        let mut style = ParagraphStyle::default();
        let mut fields = Vec::new();

        if let Some(alignment) = self.alignment.as_ref().filter(|a| !a.is_empty()) {
            style.alignment = Some(alignment.clone());
            fields.push("alignment");
        }
        if let Some(spacing) = self.line_spacing {
            style.line_spacing = Some(spacing);
            fields.push("lineSpacing");
        }
        let with_unit = |d: &Option<Dimension>| d.as_ref().filter(|d| d.unit.is_some()).cloned();
        if let Some(indent) = with_unit(&self.indent_start) {
            style.indent_start = Some(indent);
            fields.push("indentStart");
        }
        if let Some(indent) = with_unit(&self.indent_end) {
            style.indent_end = Some(indent);
            fields.push("indentEnd");
        }
        if let Some(indent) = with_unit(&self.indent_first_line) {
            style.indent_first_line = Some(indent);
            fields.push("indentFirstLine");
        }
        if let Some(space) = self.space_above.as_ref().filter(|d| d.is_meaningful()) {
            style.space_above = Some(space.clone());
            fields.push("spaceAbove");
        }
        if let Some(space) = self.space_below.as_ref().filter(|d| d.is_meaningful()) {
            style.space_below = Some(space.clone());
            fields.push("spaceBelow");
        }
        if let Some(direction) = self.direction.as_ref().filter(|d| !d.is_empty()) {
            style.direction = Some(direction.clone());
            fields.push("direction");
        }
        if let Some(mode) = self.spacing_mode.as_ref().filter(|m| !m.is_empty()) {
            style.spacing_mode = Some(mode.clone());
            fields.push("spacingMode");
        }

        (style, fields)
    }
}

/// Bullet state of a paragraph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nesting_level: Option<u32>,
    /// Rendered glyph, e.g. `"●"`, `"1."`, `"iii."`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_style: Option<TextStyle>,
}
