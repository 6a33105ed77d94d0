//! Native measurement tier backed by a font database.
//!
//! Faces are resolved through `usvg::fontdb` (CSS-like family list + weight) and glyph advances
//! are summed from the face's `hmtx` table. Kerning and shaping are not applied.

use crate::measure::{HeuristicTextMeasurer, NativeTextMeasurer, TextMetrics, TextStyle};
use usvg::fontdb::{Database, Family, Query, Stretch, Style, Weight};

pub struct FontDbTextMeasurer {
    db: Database,
}

impl std::fmt::Debug for FontDbTextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontDbTextMeasurer")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontDbTextMeasurer {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::new(db)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.db
    }
}

/// Splits a CSS `font-family` list into fontdb families; generic names map to generic families.
fn css_families(font_family: Option<&str>) -> Vec<Family<'_>> {
    let mut out: Vec<Family<'_>> = Vec::new();
    for raw in font_family.unwrap_or_default().split(',') {
        let name = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if name.is_empty() {
            continue;
        }
        out.push(match name.to_ascii_lowercase().as_str() {
            "serif" => Family::Serif,
            "sans-serif" => Family::SansSerif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(name),
        });
    }
    if out.is_empty() {
        out.push(Family::SansSerif);
    }
    out
}

fn measure_face(data: &[u8], index: u32, text: &str, font_size: f64) -> Option<TextMetrics> {
    let face = ttf_parser::Face::parse(data, index).ok()?;
    let units_per_em = f64::from(face.units_per_em());
    if units_per_em <= 0.0 {
        return None;
    }
    let scale = font_size / units_per_em;

    let lines = HeuristicTextMeasurer::normalized_text_lines(text);
    let mut max_advance = 0.0f64;
    for line in &lines {
        let mut advance = 0.0f64;
        for ch in line.chars() {
            let glyph = face.glyph_index(ch)?;
            advance += f64::from(face.glyph_hor_advance(glyph)?);
        }
        max_advance = max_advance.max(advance);
    }

    let line_units = f64::from(face.ascender()) - f64::from(face.descender())
        + f64::from(face.line_gap());
    Some(TextMetrics {
        width: max_advance * scale,
        height: lines.len() as f64 * line_units * scale,
        line_count: lines.len(),
    })
}

impl NativeTextMeasurer for FontDbTextMeasurer {
    fn try_measure(&self, text: &str, style: &TextStyle) -> Option<TextMetrics> {
        let families = css_families(style.font_family.as_deref());
        let query = Query {
            families: &families,
            weight: Weight(style.weight_number()),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let font_size = style.font_size.max(1.0);
        self.db
            .with_face_data(id, |data, index| measure_face(data, index, text, font_size))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_family_list_maps_generic_names() {
        let families = css_families(Some("\"Trebuchet MS\", verdana, sans-serif"));
        assert_eq!(families.len(), 3);
        assert!(matches!(families[0], Family::Name("Trebuchet MS")));
        assert!(matches!(families[1], Family::Name("verdana")));
        assert!(matches!(families[2], Family::SansSerif));
    }

    #[test]
    fn missing_family_defaults_to_sans_serif() {
        let families = css_families(None);
        assert!(matches!(families.as_slice(), [Family::SansSerif]));
    }

    #[test]
    fn empty_database_declines() {
        let measurer = FontDbTextMeasurer::new(Database::new());
        assert!(measurer.try_measure("abc", &TextStyle::default()).is_none());
    }

    #[test]
    fn database_is_reachable_for_loading_fonts() {
        let mut measurer = FontDbTextMeasurer::new(Database::new());
        assert_eq!(measurer.database().len(), 0);
        measurer.database_mut().load_font_data(b"not a font".to_vec());
        assert_eq!(measurer.database().len(), 0);
        assert!(measurer.try_measure("abc", &TextStyle::default()).is_none());
        assert!(format!("{measurer:?}").contains("faces: 0"));
    }
}
