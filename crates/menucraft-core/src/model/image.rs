//! Image object properties.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// How a bitmap is fitted into the object's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    Cover,
    #[default]
    Contain,
    Fill,
}

/// Clip mask applied to an image before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipShape {
    #[default]
    Rectangle,
    Circle,
    Triangle,
    Hexagon,
    Star,
    Heart,
}

impl ClipShape {
    /// All clip shapes, in picker order.
    pub const ALL: [ClipShape; 6] = [
        ClipShape::Rectangle,
        ClipShape::Circle,
        ClipShape::Triangle,
        ClipShape::Hexagon,
        ClipShape::Star,
        ClipShape::Heart,
    ];

    /// Object size the image picker uses when placing an image with this mask.
    pub fn preferred_size(self) -> Size {
        match self {
            ClipShape::Circle | ClipShape::Hexagon | ClipShape::Star | ClipShape::Heart => {
                Size::new(200.0, 200.0)
            }
            ClipShape::Triangle => Size::new(250.0, 200.0),
            ClipShape::Rectangle => Size::new(300.0, 200.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClipShape::Rectangle => "Rectangle",
            ClipShape::Circle => "Circle",
            ClipShape::Triangle => "Triangle",
            ClipShape::Hexagon => "Hexagon",
            ClipShape::Star => "Star",
            ClipShape::Heart => "Heart",
        }
    }
}

/// Source crop rectangle in bitmap pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRect {
    pub crop_x: f64,
    pub crop_y: f64,
    pub crop_width: f64,
    pub crop_height: f64,
}

impl CropRect {
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.crop_x,
            self.crop_y,
            self.crop_x + self.crop_width,
            self.crop_y + self.crop_height,
        )
    }
}

/// Image-specific fields of an editor object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    #[serde(default, flatten, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropRect>,
    #[serde(default)]
    pub object_fit: ObjectFit,
    #[serde(default, rename = "shapeType", skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipShape>,
}

impl ImageProps {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            crop: None,
            object_fit: ObjectFit::Contain,
            clip: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferred_sizes() {
        assert_eq!(ClipShape::Circle.preferred_size(), Size::new(200.0, 200.0));
        assert_eq!(ClipShape::Heart.preferred_size(), Size::new(200.0, 200.0));
        assert_eq!(ClipShape::Triangle.preferred_size(), Size::new(250.0, 200.0));
        assert_eq!(ClipShape::Rectangle.preferred_size(), Size::new(300.0, 200.0));
    }

    #[test]
    fn test_deserialize_with_crop_and_mask() {
        let json = r#"{
            "src": "photo.jpg",
            "cropX": 10, "cropY": 20, "cropWidth": 100, "cropHeight": 50,
            "objectFit": "cover",
            "shapeType": "star"
        }"#;
        let props: ImageProps = serde_json::from_str(json).unwrap();
        assert_eq!(props.object_fit, ObjectFit::Cover);
        assert_eq!(props.clip, Some(ClipShape::Star));
        let crop = props.crop.unwrap().to_rect();
        assert!((crop.x1 - 110.0).abs() < f64::EPSILON);
        assert!((crop.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_minimal() {
        let props: ImageProps = serde_json::from_str(r#"{"src": "a.png"}"#).unwrap();
        assert_eq!(props.object_fit, ObjectFit::Contain);
        assert!(props.crop.is_none());
        assert!(props.clip.is_none());
    }
}
