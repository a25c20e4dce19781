//! System font lookup, text measurement and glyph outlines.

use crate::text_layout::{ApproximateMeasure, FontSpec, TextMeasure};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::{BezPath, Point};
use rusttype::{Font, OutlineBuilder, Scale, point as rt_point};
use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    weight: u16,
    italic: bool,
}

impl FontKey {
    fn new(spec: &FontSpec) -> Self {
        Self {
            family: spec.family.clone(),
            weight: spec.weight,
            italic: spec.italic,
        }
    }
}

/// Font database with a cache of parsed faces.
///
/// CSS family lists (`"Playfair Display, serif"`) are matched in order,
/// with the system sans-serif face as the last resort. When no face can
/// be found at all, measurement falls back to [`ApproximateMeasure`] and
/// text is not outlined.
pub struct FontBook {
    db: Database,
    cache: Mutex<HashMap<FontKey, Option<Arc<Font<'static>>>>>,
}

impl FontBook {
    /// Font book over the installed system fonts.
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system font faces", db.len());
        Self::with_database(db)
    }

    /// Font book with no faces; all text uses approximate metrics.
    pub fn empty() -> Self {
        Self::with_database(Database::new())
    }

    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Register additional font data (TTF/OTF/TTC).
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        self.cache.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve `spec` to a parsed font, caching misses too.
    pub fn font(&self, spec: &FontSpec) -> Option<Arc<Font<'static>>> {
        let key = FontKey::new(spec);
        if let Some(entry) = self.cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
            return entry.clone();
        }

        let loaded = self.load(spec).map(Arc::new);
        if loaded.is_none() {
            log::debug!("No font face for '{}', using approximate metrics", spec.family);
        }
        self.cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key, loaded.clone());
        loaded
    }

    fn load(&self, spec: &FontSpec) -> Option<Font<'static>> {
        let families = parse_families(&spec.family);
        let query = Query {
            families: &families,
            weight: Weight(spec.weight),
            stretch: Stretch::Normal,
            style: if spec.italic { Style::Italic } else { Style::Normal },
        };

        let id = self.db.query(&query)?;
        let face = self.db.face(id)?;
        let bytes = match &face.source {
            fontdb::Source::File(path) => fs::read(path).ok()?,
            fontdb::Source::SharedFile(path, _) => fs::read(path).ok()?,
            fontdb::Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
        };
        Font::try_from_vec_and_index(bytes, face.index)
    }

    /// Outline of `text` as a single path in canvas coordinates.
    ///
    /// `origin` is the top-left of the line box; the baseline sits one
    /// ascent below it.
    pub fn glyph_path(&self, text: &str, spec: &FontSpec, origin: Point) -> Option<BezPath> {
        let font = self.font(spec)?;
        let scale = css_scale(&font, spec.size);
        let ascent = font.v_metrics(scale).ascent;
        let start = rt_point(origin.x as f32, origin.y as f32 + ascent);

        let mut builder = PathBuilder::default();
        for glyph in font.layout(text, scale, start) {
            glyph.build_outline(&mut builder);
        }
        Some(builder.path)
    }
}

impl TextMeasure for FontBook {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        match self.font(font) {
            Some(face) => {
                let scale = css_scale(&face, font.size);
                face.layout(text, scale, rt_point(0.0, 0.0))
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0) as f64
            }
            None => ApproximateMeasure.measure(text, font),
        }
    }
}

/// rusttype scales by ascent-to-descent height; CSS sizes by the em box.
fn css_scale(font: &Font<'_>, size: f64) -> Scale {
    let metrics = font.v_metrics_unscaled();
    let units_per_em = font.units_per_em() as f32;
    let height = metrics.ascent - metrics.descent;
    if units_per_em <= 0.0 || height <= 0.0 {
        return Scale::uniform(size as f32);
    }
    Scale::uniform(size as f32 * height / units_per_em)
}

/// Split a CSS family list into fontdb families, ending with sans-serif.
fn parse_families(list: &str) -> Vec<Family<'_>> {
    let mut families: Vec<Family<'_>> = list
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|name| !name.is_empty())
        .map(|name| match name.to_ascii_lowercase().as_str() {
            "serif" => Family::Serif,
            "sans-serif" | "system-ui" => Family::SansSerif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(name),
        })
        .collect();
    if !families.contains(&Family::SansSerif) {
        families.push(Family::SansSerif);
    }
    families
}

/// Collects glyph outlines into a kurbo path.
#[derive(Default)]
struct PathBuilder {
    path: BezPath,
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to((x1 as f64, y1 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            (x1 as f64, y1 as f64),
            (x2 as f64, y2 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_core::model::TextProps;

    #[test]
    fn test_parse_families() {
        let families = parse_families("'Playfair Display', serif");
        assert_eq!(
            families,
            vec![Family::Name("Playfair Display"), Family::Serif, Family::SansSerif]
        );
        assert_eq!(parse_families(""), vec![Family::SansSerif]);
        assert_eq!(parse_families("sans-serif"), vec![Family::SansSerif]);
    }

    #[test]
    fn test_empty_book_falls_back_to_approximate() {
        let book = FontBook::empty();
        let spec = FontSpec::from_props(&TextProps::default());
        assert!(book.font(&spec).is_none());
        assert!(
            (book.measure("Menu", &spec) - ApproximateMeasure.measure("Menu", &spec)).abs()
                < f64::EPSILON
        );
        assert!(book.glyph_path("Menu", &spec, Point::ZERO).is_none());
    }
}
