//! Glyph to bullet preset mapping.
//!
//! The Document Store only creates bullets from a fixed set of presets, so
//! the glyph seen on a paragraph is mapped to the closest one. Custom
//! sequences such as lowercase roman numerals degrade to the nearest
//! numbered preset.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Bullet presets understood by the Document Store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulletPreset {
    #[default]
    BulletDiscCircleSquare,
    BulletDiamondxArrow3dSquare,
    BulletCheckbox,
    BulletArrowDiamondDisc,
    BulletStarCircleSquare,
    BulletArrow3dCircleSquare,
    BulletLefttriangleDiamondDisc,
    BulletDiamondxHollowdiamondSquare,
    BulletDiamondCircleSquare,
    NumberedDigitAlphaRoman,
    NumberedDigitAlphaRomanParens,
    NumberedDigitNested,
    NumberedUpperalphaAlphaRoman,
    NumberedUpperromanUpperalphaDigit,
    NumberedZerodigitAlphaRoman,
}

/// Numbered glyph shapes, checked in order. Roman numerals come before
/// letters so `i.` and `v.` read as numerals.
static NUMBERED_GLYPHS: LazyLock<Vec<(Regex, BulletPreset)>> = LazyLock::new(|| {
    [
        (r"^\d+\.\d+", BulletPreset::NumberedDigitNested),
        (r"^0\d+\.?$", BulletPreset::NumberedZerodigitAlphaRoman),
        (r"^\(?\d+\)$", BulletPreset::NumberedDigitAlphaRomanParens),
        (r"^\d+\.?$", BulletPreset::NumberedDigitAlphaRoman),
        (r"^(?i)[ivxlcdm]+[.)]?$", BulletPreset::NumberedUpperromanUpperalphaDigit),
        (r"^\(?[a-z]\)$", BulletPreset::NumberedDigitAlphaRomanParens),
        (r"^[A-Z]+[.)]?$", BulletPreset::NumberedUpperalphaAlphaRoman),
        (r"^[a-z]+[.)]?$", BulletPreset::NumberedUpperalphaAlphaRoman),
    ]
    .into_iter()
    .map(|(pattern, preset)| (Regex::new(pattern).expect("valid glyph pattern"), preset))
    .collect()
});

impl BulletPreset {
    /// Best-effort preset for a rendered glyph. Unknown or missing glyphs
    /// fall back to the default disc preset.
    pub fn from_glyph(glyph: Option<&str>) -> Self {
        let Some(glyph) = glyph.map(str::trim).filter(|g| !g.is_empty()) else {
            return Self::default();
        };

        match glyph {
            "●" | "•" | "○" | "■" | "▪" => return Self::BulletDiscCircleSquare,
            "❖" => return Self::BulletDiamondxArrow3dSquare,
            "❑" | "☐" | "□" => return Self::BulletCheckbox,
            "➔" | "→" => return Self::BulletArrowDiamondDisc,
            "★" | "☆" => return Self::BulletStarCircleSquare,
            "➢" => return Self::BulletArrow3dCircleSquare,
            "►" | "▸" => return Self::BulletLefttriangleDiamondDisc,
            "◇" => return Self::BulletDiamondxHollowdiamondSquare,
            "◆" | "♦" => return Self::BulletDiamondCircleSquare,
            _ => {}
        }

        NUMBERED_GLYPHS
            .iter()
            .find(|(pattern, _)| pattern.is_match(glyph))
            .map(|(_, preset)| *preset)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_glyphs() {
        assert_eq!(BulletPreset::from_glyph(Some("●")), BulletPreset::BulletDiscCircleSquare);
        assert_eq!(BulletPreset::from_glyph(Some("★")), BulletPreset::BulletStarCircleSquare);
        assert_eq!(BulletPreset::from_glyph(Some("❑")), BulletPreset::BulletCheckbox);
        assert_eq!(BulletPreset::from_glyph(Some(" ◆ ")), BulletPreset::BulletDiamondCircleSquare);
    }

    #[test]
    fn test_numbered_glyphs() {
        assert_eq!(BulletPreset::from_glyph(Some("1.")), BulletPreset::NumberedDigitAlphaRoman);
        assert_eq!(BulletPreset::from_glyph(Some("12")), BulletPreset::NumberedDigitAlphaRoman);
        assert_eq!(BulletPreset::from_glyph(Some("3)")), BulletPreset::NumberedDigitAlphaRomanParens);
        assert_eq!(BulletPreset::from_glyph(Some("01.")), BulletPreset::NumberedZerodigitAlphaRoman);
        assert_eq!(BulletPreset::from_glyph(Some("1.2.")), BulletPreset::NumberedDigitNested);
        assert_eq!(BulletPreset::from_glyph(Some("B.")), BulletPreset::NumberedUpperalphaAlphaRoman);
        assert_eq!(BulletPreset::from_glyph(Some("b)")), BulletPreset::NumberedDigitAlphaRomanParens);
    }

    #[test]
    fn test_roman_glyphs_degrade_to_numbered_preset() {
        for glyph in ["i.", "ii.", "iii.", "IV.", "x"] {
            assert_eq!(
                BulletPreset::from_glyph(Some(glyph)),
                BulletPreset::NumberedUpperromanUpperalphaDigit,
                "{}",
                glyph
            );
        }
    }

    #[test]
    fn test_unknown_glyph_falls_back() {
        assert_eq!(BulletPreset::from_glyph(None), BulletPreset::BulletDiscCircleSquare);
        assert_eq!(BulletPreset::from_glyph(Some("")), BulletPreset::BulletDiscCircleSquare);
        assert_eq!(BulletPreset::from_glyph(Some("✿")), BulletPreset::BulletDiscCircleSquare);
    }

    #[test]
    fn test_preset_wire_names() {
        assert_eq!(
            serde_json::to_value(BulletPreset::NumberedUpperromanUpperalphaDigit).unwrap(),
            "NUMBERED_UPPERROMAN_UPPERALPHA_DIGIT"
        );
        assert_eq!(
            serde_json::to_value(BulletPreset::BulletDiamondxArrow3dSquare).unwrap(),
            "BULLET_DIAMONDX_ARROW3D_SQUARE"
        );
    }
}
