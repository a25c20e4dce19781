//! Design document and canvas size.

use super::{BackgroundProps, EditorObject, ObjectId, ObjectKind};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default design surface width.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default design surface height.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1200;

/// Pixel size of the design surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
    pub name: String,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            name: "Menu".to_string(),
        }
    }
}

impl CanvasSize {
    pub fn new(width: u32, height: u32, name: impl Into<String>) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            name: name.into(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    pub fn rect(&self) -> Rect {
        self.size().to_rect()
    }
}

/// A complete menu design: canvas, background and placed objects.
///
/// The background is kept outside `objects`; object order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDesign {
    pub id: String,
    pub name: String,
    pub canvas_size: CanvasSize,
    pub objects: Vec<EditorObject>,
    pub background: EditorObject,
}

impl MenuDesign {
    /// Create an empty design with a white, locked background.
    pub fn new(name: impl Into<String>, canvas_size: CanvasSize) -> Self {
        let background = Self::background_for(&canvas_size, BackgroundProps::default());
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            canvas_size,
            objects: Vec::new(),
            background,
        }
    }

    /// A background object covering the whole canvas.
    pub fn background_for(canvas_size: &CanvasSize, props: BackgroundProps) -> EditorObject {
        let size = canvas_size.size();
        let mut background = EditorObject::new(
            ObjectKind::Background(props),
            0.0,
            0.0,
            size.width,
            size.height,
        );
        background.locked = true;
        background.z_index = 0;
        background
    }

    pub fn background_props(&self) -> Option<&BackgroundProps> {
        match &self.background.kind {
            ObjectKind::Background(props) => Some(props),
            _ => None,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&EditorObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut EditorObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Image URLs referenced by objects and the background.
    pub fn image_sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = self
            .objects
            .iter()
            .filter_map(|o| o.as_image().map(|i| i.src.as_str()))
            .collect();
        if let Some(image) = self.background_props().and_then(|b| b.image.as_deref()) {
            sources.push(image);
        }
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}

impl Default for MenuDesign {
    fn default() -> Self {
        Self::new("Untitled", CanvasSize::default())
    }
}
