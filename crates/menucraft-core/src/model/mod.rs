//! Document model: editor objects, their variant properties and the design.

mod background;
mod color;
mod design;
mod image;
mod patch;
mod shape;
mod text;

pub use background::BackgroundProps;
pub use color::SerializableColor;
pub use design::{CanvasSize, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MenuDesign};
pub use image::{ClipShape, CropRect, ImageProps, ObjectFit};
pub use patch::{BackgroundPatch, ImagePatch, KindPatch, ObjectPatch, ShapePatch, TextPatch};
pub use shape::{DEFAULT_SHAPE_FILL, ShapeKind, ShapeProps};
pub use text::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_LINE_HEIGHT, FontStyle, FontWeight, TextAlign,
    TextProps,
};

use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for editor objects.
pub type ObjectId = Uuid;

/// Variant-specific part of an editor object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Text(TextProps),
    Image(ImageProps),
    Shape(ShapeProps),
    Background(BackgroundProps),
}

impl ObjectKind {
    /// Variant tag as written in design files.
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Text(_) => "text",
            ObjectKind::Image(_) => "image",
            ObjectKind::Shape(_) => "shape",
            ObjectKind::Background(_) => "background",
        }
    }
}

/// A single placed element on a design.
///
/// Geometry is in canvas space: `x`/`y` is the top-left corner of the
/// unrotated box and `rotation` (degrees) turns the box about its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorObject {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub z_index: i32,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl EditorObject {
    /// Create an unlocked, visible, opaque object with a fresh id.
    pub fn new(kind: ObjectKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            locked: false,
            visible: true,
            z_index: 0,
            kind,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Axis-aligned box, ignoring rotation.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rotation about the object's center.
    pub fn transform(&self) -> Affine {
        if self.rotation == 0.0 {
            Affine::IDENTITY
        } else {
            Affine::rotate_about(self.rotation.to_radians(), self.center())
        }
    }

    /// Closed-interval containment on the unrotated box.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match &self.kind {
            ObjectKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageProps> {
        match &self.kind {
            ObjectKind::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeProps> {
        match &self.kind {
            ObjectKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    /// Clamp geometry and style into valid ranges.
    ///
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self, min_size: f64) -> bool {
        let mut changed = false;

        if !(self.width >= min_size) {
            log::warn!(
                "Object {} width {} below minimum, clamping to {}",
                self.id,
                self.width,
                min_size
            );
            self.width = min_size;
            changed = true;
        }
        if !(self.height >= min_size) {
            log::warn!(
                "Object {} height {} below minimum, clamping to {}",
                self.id,
                self.height,
                min_size
            );
            self.height = min_size;
            changed = true;
        }

        if !self.x.is_finite() {
            log::warn!("Object {} x {} is not finite, resetting to 0", self.id, self.x);
            self.x = 0.0;
            changed = true;
        }
        if !self.y.is_finite() {
            log::warn!("Object {} y {} is not finite, resetting to 0", self.id, self.y);
            self.y = 0.0;
            changed = true;
        }

        let opacity = if self.opacity.is_finite() { self.opacity.clamp(0.0, 1.0) } else { 1.0 };
        if opacity != self.opacity {
            log::warn!("Object {} opacity {} clamped to {}", self.id, self.opacity, opacity);
            self.opacity = opacity;
            changed = true;
        }

        let rotation = normalize_rotation(self.rotation);
        if rotation != self.rotation {
            self.rotation = rotation;
            changed = true;
        }

        if let ObjectKind::Shape(shape) = &mut self.kind {
            if !(shape.stroke_width >= 0.0) {
                log::warn!("Object {} stroke width {} clamped to 0", self.id, shape.stroke_width);
                shape.stroke_width = 0.0;
                changed = true;
            }
        }

        changed
    }
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}
