//! Shape object properties.

use super::SerializableColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default fill for new shapes (`#e2e2e2`).
pub const DEFAULT_SHAPE_FILL: SerializableColor = SerializableColor::rgb(0xe2, 0xe2, 0xe2);

/// Primitive drawn by a shape object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
    Path,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Line => "line",
            ShapeKind::Path => "path",
        }
    }
}

/// Shape-specific fields of an editor object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    pub shape_type: ShapeKind,
    pub fill: SerializableColor,
    pub stroke: SerializableColor,
    #[serde(default)]
    pub stroke_width: f64,
    /// Polyline vertices relative to the object's top-left, used by `Path`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
}

impl ShapeProps {
    pub fn new(shape_type: ShapeKind) -> Self {
        Self {
            shape_type,
            fill: DEFAULT_SHAPE_FILL,
            stroke: SerializableColor::black(),
            stroke_width: 0.0,
            points: Vec::new(),
        }
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0
    }

    /// Whether a path's polyline ends on its first vertex.
    pub fn is_closed_path(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() >= 3 => {
                (first.x - last.x).abs() < f64::EPSILON && (first.y - last.y).abs() < f64::EPSILON
            }
            _ => false,
        }
    }
}

impl Default for ShapeProps {
    fn default() -> Self {
        Self::new(ShapeKind::Rectangle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = ShapeProps::new(ShapeKind::Circle);
        assert_eq!(props.fill.to_hex(), "#e2e2e2");
        assert_eq!(props.stroke, SerializableColor::black());
        assert!(!props.has_stroke());
    }

    #[test]
    fn test_closed_path() {
        let mut props = ShapeProps::new(ShapeKind::Path);
        props.points = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert!(!props.is_closed_path());

        props.points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 0.0),
        ];
        assert!(props.is_closed_path());
    }
}
