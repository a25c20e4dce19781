//! Backend-independent display list.

use crate::image_cache::Bitmap;
use crate::text_layout::FontSpec;
use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;
use std::sync::Arc;

/// One drawing operation. Geometry is in canvas space; `transform` maps it
/// to surface pixels.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Fill {
        path: BezPath,
        color: Color,
        transform: Affine,
    },
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
        transform: Affine,
    },
    /// Draw `src` of `bitmap` stretched onto `dest`, optionally masked.
    Image {
        bitmap: Arc<Bitmap>,
        src: Rect,
        dest: Rect,
        opacity: f64,
        clip: Option<BezPath>,
        transform: Affine,
    },
    /// A single laid-out line; `origin` is the top-left of the line box.
    Text {
        text: String,
        origin: Point,
        font: FontSpec,
        color: Color,
        transform: Affine,
    },
}

impl DrawCommand {
    pub fn transform(&self) -> Affine {
        match self {
            DrawCommand::Fill { transform, .. }
            | DrawCommand::Stroke { transform, .. }
            | DrawCommand::Image { transform, .. }
            | DrawCommand::Text { transform, .. } => *transform,
        }
    }
}

/// Ordered draw commands for one frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Surface size in pixels.
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every text command, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
