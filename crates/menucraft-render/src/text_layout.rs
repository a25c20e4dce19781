//! Text measurement and word wrapping.

use kurbo::{Point, Rect};
use menucraft_core::model::{FontStyle, TextAlign, TextProps};

/// Resolved font request for measuring and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// CSS family list, e.g. "Playfair Display, serif".
    pub family: String,
    pub size: f64,
    pub weight: u16,
    pub italic: bool,
}

impl FontSpec {
    pub fn from_props(props: &TextProps) -> Self {
        Self {
            family: props.font_family.clone(),
            size: props.font_size,
            weight: props.font_weight.value(),
            italic: props.font_style == FontStyle::Italic,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

/// Measures rendered text width.
pub trait TextMeasure {
    /// Advance width of `text` in canvas pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> f64;
}

/// Width estimate from average glyph proportions, used when no font is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMeasure;

impl ApproximateMeasure {
    const AVERAGE_ADVANCE: f64 = 0.5;
    const BOLD_ADVANCE: f64 = 0.55;
}

impl TextMeasure for ApproximateMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let factor = if font.is_bold() { Self::BOLD_ADVANCE } else { Self::AVERAGE_ADVANCE };
        text.chars().count() as f64 * font.size * factor
    }
}

/// One laid-out line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Top-left of the line box; glyphs hang below this point.
    pub origin: Point,
    pub width: f64,
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Words are separated by single spaces;
/// a word wider than the box stays on its own line.
pub fn wrap_lines(
    text: &str,
    max_width: f64,
    font: &FontSpec,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if !line.is_empty() && measure.measure(&candidate, font) > max_width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

/// Lay out a text object's content inside `bounds`.
///
/// Lines start at the top edge and advance by `font_size * line_height`;
/// alignment is against the left edge, center or right edge of the box.
pub fn layout_text(props: &TextProps, bounds: Rect, measure: &dyn TextMeasure) -> Vec<TextLine> {
    let font = FontSpec::from_props(props);
    let advance = props.line_advance();
    wrap_lines(&props.text, bounds.width(), &font, measure)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.measure(&text, &font);
            let x = match props.text_align {
                TextAlign::Left => bounds.x0,
                TextAlign::Center => bounds.x0 + (bounds.width() - width) / 2.0,
                TextAlign::Right => bounds.x1 - width,
            };
            TextLine {
                text,
                origin: Point::new(x, bounds.y0 + i as f64 * advance),
                width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is 10px wide.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure(&self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64 * 10.0
        }
    }

    fn font() -> FontSpec {
        FontSpec::from_props(&TextProps::default())
    }

    #[test]
    fn test_wraps_on_width() {
        // "aaa bbb" is 70px, wider than 60
        let lines = wrap_lines("aaa bbb ccc", 60.0, &font(), &FixedMeasure);
        assert_eq!(lines, vec!["aaa", "bbb", "ccc"]);
        let lines = wrap_lines("aaa bbb ccc", 70.0, &font(), &FixedMeasure);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_explicit_newlines() {
        let lines = wrap_lines("Soup\nof the day", 1000.0, &font(), &FixedMeasure);
        assert_eq!(lines, vec!["Soup", "of the day"]);
    }

    #[test]
    fn test_long_word_not_split() {
        let lines = wrap_lines("extraordinarily", 30.0, &font(), &FixedMeasure);
        assert_eq!(lines, vec!["extraordinarily"]);
    }

    #[test]
    fn test_alignment_and_advance() {
        let mut props = TextProps::new("ab\ncd");
        props.font_size = 10.0;
        props.line_height = 1.5;
        let bounds = Rect::new(100.0, 50.0, 200.0, 100.0);

        props.text_align = TextAlign::Left;
        let lines = layout_text(&props, bounds, &FixedMeasure);
        assert_eq!(lines[0].origin, Point::new(100.0, 50.0));
        assert_eq!(lines[1].origin, Point::new(100.0, 65.0));

        props.text_align = TextAlign::Center;
        let lines = layout_text(&props, bounds, &FixedMeasure);
        assert!((lines[0].origin.x - 140.0).abs() < f64::EPSILON);

        props.text_align = TextAlign::Right;
        let lines = layout_text(&props, bounds, &FixedMeasure);
        assert!((lines[0].origin.x - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_approximate_measure() {
        let mut spec = font();
        spec.size = 20.0;
        assert!((ApproximateMeasure.measure("abcd", &spec) - 40.0).abs() < f64::EPSILON);
    }
}
