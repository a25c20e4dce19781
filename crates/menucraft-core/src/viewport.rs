//! Fit-to-container scaling between screen and canvas coordinates.

use crate::model::CanvasSize;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Uniform scale that fits `canvas` inside `container` without upscaling.
pub fn fit_scale(canvas: &CanvasSize, container: Size) -> f64 {
    let canvas = canvas.size();
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return 1.0;
    }
    let scale = (container.width / canvas.width)
        .min(container.height / canvas.height)
        .min(1.0);
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

/// Maps between on-screen surface pixels and canvas space.
///
/// The drawing surface is the canvas scaled by `scale`; the view-only zoom
/// level never enters this mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Canvas-to-screen scale factor.
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Viewport {
    /// Scales that are not finite and positive fall back to 1.
    pub fn new(scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            log::warn!("Invalid viewport scale {}, using 1.0", scale);
            Self::default()
        }
    }

    /// Viewport for `canvas` shown in a container of the given size.
    pub fn fit(canvas: &CanvasSize, container: Size) -> Self {
        Self::new(fit_scale(canvas, container))
    }

    /// Canvas-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Convert a surface point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        Point::new(screen_point.x / self.scale, screen_point.y / self.scale)
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        Point::new(canvas_point.x * self.scale, canvas_point.y * self.scale)
    }

    /// Convert a screen-space movement to canvas space.
    pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Pixel size of the drawing surface for `canvas`.
    pub fn surface_size(&self, canvas: &CanvasSize) -> (u32, u32) {
        let size = canvas.size() * self.scale;
        (
            size.width.round().max(1.0) as u32,
            size.height.round().max(1.0) as u32,
        )
    }
}
