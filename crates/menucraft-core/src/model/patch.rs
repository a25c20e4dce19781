//! Partial updates merged into existing objects.

use super::{
    BackgroundProps, ClipShape, CropRect, EditorObject, FontStyle, FontWeight, ImageProps,
    ObjectFit, ObjectKind, SerializableColor, ShapeKind, ShapeProps, TextAlign, TextProps,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Changed fields for an object; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub z_index: Option<i32>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindPatch>,
}

/// Variant-specific changes, tagged like [`ObjectKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindPatch {
    Text(TextPatch),
    Image(ImagePatch),
    Shape(ShapePatch),
    Background(BackgroundPatch),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPatch {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub color: Option<SerializableColor>,
    pub line_height: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePatch {
    pub src: Option<String>,
    /// `Some(None)` removes an existing crop.
    pub crop: Option<Option<CropRect>>,
    pub object_fit: Option<ObjectFit>,
    /// `Some(None)` removes the clip mask.
    #[serde(rename = "shapeType")]
    pub clip: Option<Option<ClipShape>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapePatch {
    pub shape_type: Option<ShapeKind>,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub points: Option<Vec<Point>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackgroundPatch {
    pub fill: Option<SerializableColor>,
    pub image: Option<Option<String>>,
}

impl ObjectPatch {
    /// Patch that moves an object.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Patch that resizes an object.
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Default::default()
        }
    }

    pub fn visible(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Default::default()
        }
    }

    pub fn z_index(z_index: i32) -> Self {
        Self {
            z_index: Some(z_index),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: KindPatch) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Shallow-merge this patch into `object`.
    ///
    /// The variant tag never changes: a variant patch for a different kind
    /// is ignored.
    pub fn apply_to(&self, object: &mut EditorObject) {
        if let Some(x) = self.x {
            object.x = x;
        }
        if let Some(y) = self.y {
            object.y = y;
        }
        if let Some(width) = self.width {
            object.width = width;
        }
        if let Some(height) = self.height {
            object.height = height;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            object.opacity = opacity;
        }
        if let Some(locked) = self.locked {
            object.locked = locked;
        }
        if let Some(visible) = self.visible {
            object.visible = visible;
        }
        if let Some(z_index) = self.z_index {
            object.z_index = z_index;
        }

        let Some(kind_patch) = &self.kind else {
            return;
        };
        match (&mut object.kind, kind_patch) {
            (ObjectKind::Text(props), KindPatch::Text(patch)) => patch.apply_to(props),
            (ObjectKind::Image(props), KindPatch::Image(patch)) => patch.apply_to(props),
            (ObjectKind::Shape(props), KindPatch::Shape(patch)) => patch.apply_to(props),
            (ObjectKind::Background(props), KindPatch::Background(patch)) => patch.apply_to(props),
            (kind, _) => {
                log::debug!(
                    "Ignoring {} fields for {} object {}",
                    kind_patch.type_name(),
                    kind.type_name(),
                    object.id
                );
            }
        }
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl KindPatch {
    pub fn type_name(&self) -> &'static str {
        match self {
            KindPatch::Text(_) => "text",
            KindPatch::Image(_) => "image",
            KindPatch::Shape(_) => "shape",
            KindPatch::Background(_) => "background",
        }
    }
}

impl TextPatch {
    pub fn apply_to(&self, props: &mut TextProps) {
        if let Some(text) = &self.text {
            props.text = text.clone();
        }
        if let Some(font_size) = self.font_size {
            props.font_size = font_size;
        }
        if let Some(font_family) = &self.font_family {
            props.font_family = font_family.clone();
        }
        if let Some(font_weight) = self.font_weight {
            props.font_weight = font_weight;
        }
        if let Some(font_style) = self.font_style {
            props.font_style = font_style;
        }
        if let Some(text_align) = self.text_align {
            props.text_align = text_align;
        }
        if let Some(color) = self.color {
            props.color = color;
        }
        if let Some(line_height) = self.line_height {
            props.line_height = line_height;
        }
    }
}

impl ImagePatch {
    pub fn apply_to(&self, props: &mut ImageProps) {
        if let Some(src) = &self.src {
            props.src = src.clone();
        }
        if let Some(crop) = self.crop {
            props.crop = crop;
        }
        if let Some(object_fit) = self.object_fit {
            props.object_fit = object_fit;
        }
        if let Some(clip) = self.clip {
            props.clip = clip;
        }
    }
}

impl ShapePatch {
    pub fn apply_to(&self, props: &mut ShapeProps) {
        if let Some(shape_type) = self.shape_type {
            props.shape_type = shape_type;
        }
        if let Some(fill) = self.fill {
            props.fill = fill;
        }
        if let Some(stroke) = self.stroke {
            props.stroke = stroke;
        }
        if let Some(stroke_width) = self.stroke_width {
            props.stroke_width = stroke_width;
        }
        if let Some(points) = &self.points {
            props.points = points.clone();
        }
    }
}

impl BackgroundPatch {
    pub fn apply_to(&self, props: &mut BackgroundProps) {
        if let Some(fill) = self.fill {
            props.fill = fill;
        }
        if let Some(image) = &self.image {
            props.image = image.clone();
        }
    }
}
