//! Construction of fully-defaulted editor objects.

use crate::model::{
    ClipShape, EditorObject, ImageProps, ObjectFit, ObjectKind, ShapeKind, ShapeProps, TextProps,
};
use kurbo::{Point, Size};

/// Position used when the caller does not supply one.
pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);
/// Default text box size.
pub const TEXT_SIZE: Size = Size::new(200.0, 50.0);
/// Default image box size.
pub const IMAGE_SIZE: Size = Size::new(300.0, 200.0);
/// Default shape box size.
pub const SHAPE_SIZE: Size = Size::new(100.0, 100.0);

/// Placement options for an image, as chosen in the image picker.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub src: String,
    pub clip: Option<ClipShape>,
    pub object_fit: ObjectFit,
    /// Explicit size; otherwise the clip mask's preferred size.
    pub size: Option<Size>,
    pub position: Option<Point>,
}

impl ImagePlacement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            clip: None,
            object_fit: ObjectFit::Contain,
            size: None,
            position: None,
        }
    }

    pub fn with_clip(mut self, clip: ClipShape) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_fit(mut self, fit: ObjectFit) -> Self {
        self.object_fit = fit;
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    fn resolved_size(&self) -> Size {
        self.size
            .or_else(|| self.clip.map(ClipShape::preferred_size))
            .unwrap_or(IMAGE_SIZE)
    }
}

/// A text object with default styling.
pub fn text_object(text: Option<&str>, position: Option<Point>) -> EditorObject {
    let props = match text {
        Some(text) => TextProps::new(text),
        None => TextProps::default(),
    };
    let p = position.unwrap_or(DEFAULT_POSITION);
    EditorObject::new(ObjectKind::Text(props), p.x, p.y, TEXT_SIZE.width, TEXT_SIZE.height)
}

/// A `contain`-fitted image object.
pub fn image_object(src: &str, position: Option<Point>) -> EditorObject {
    let p = position.unwrap_or(DEFAULT_POSITION);
    EditorObject::new(
        ObjectKind::Image(ImageProps::new(src)),
        p.x,
        p.y,
        IMAGE_SIZE.width,
        IMAGE_SIZE.height,
    )
}

/// An image object configured from picker options.
pub fn placed_image_object(placement: &ImagePlacement) -> EditorObject {
    let p = placement.position.unwrap_or(DEFAULT_POSITION);
    let size = placement.resolved_size();
    let props = ImageProps {
        object_fit: placement.object_fit,
        clip: placement.clip,
        ..ImageProps::new(placement.src.clone())
    };
    EditorObject::new(ObjectKind::Image(props), p.x, p.y, size.width, size.height)
}

/// A light-gray shape with a zero-width black stroke.
pub fn shape_object(shape_type: ShapeKind, position: Option<Point>) -> EditorObject {
    let p = position.unwrap_or(DEFAULT_POSITION);
    EditorObject::new(
        ObjectKind::Shape(ShapeProps::new(shape_type)),
        p.x,
        p.y,
        SHAPE_SIZE.width,
        SHAPE_SIZE.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SerializableColor;

    #[test]
    fn test_text_defaults() {
        let obj = text_object(None, None);
        assert_eq!(obj.position(), DEFAULT_POSITION);
        assert!((obj.width - 200.0).abs() < f64::EPSILON);
        assert!((obj.height - 50.0).abs() < f64::EPSILON);
        let text = obj.as_text().unwrap();
        assert_eq!(text.text, "Text");
        assert_eq!(text.color, SerializableColor::black());
        assert!(!obj.locked);
        assert!(obj.visible);
    }

    #[test]
    fn test_image_defaults() {
        let obj = image_object("menu.jpg", Some(Point::new(5.0, 6.0)));
        assert_eq!(obj.position(), Point::new(5.0, 6.0));
        assert!((obj.width - 300.0).abs() < f64::EPSILON);
        let image = obj.as_image().unwrap();
        assert_eq!(image.object_fit, ObjectFit::Contain);
        assert!(image.clip.is_none());
    }

    #[test]
    fn test_shape_defaults() {
        let obj = shape_object(ShapeKind::Circle, None);
        let shape = obj.as_shape().unwrap();
        assert_eq!(shape.shape_type, ShapeKind::Circle);
        assert_eq!(shape.fill.to_hex(), "#e2e2e2");
        assert!((shape.stroke_width).abs() < f64::EPSILON);
    }

    #[test]
    fn test_placed_image_uses_clip_size() {
        let obj = placed_image_object(&ImagePlacement::new("a.png").with_clip(ClipShape::Triangle));
        assert!((obj.width - 250.0).abs() < f64::EPSILON);
        assert!((obj.height - 200.0).abs() < f64::EPSILON);
        assert_eq!(obj.as_image().unwrap().clip, Some(ClipShape::Triangle));

        let mut placement = ImagePlacement::new("a.png").with_clip(ClipShape::Circle);
        placement.size = Some(Size::new(50.0, 60.0));
        let obj = placed_image_object(&placement);
        assert!((obj.width - 50.0).abs() < f64::EPSILON);
    }
}
