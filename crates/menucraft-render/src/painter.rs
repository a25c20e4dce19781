//! Turns a design into a display list.

use crate::clip::clip_path;
use crate::image_cache::{Bitmap, ImageCache};
use crate::scene::{DrawCommand, Scene};
use crate::text_layout::{FontSpec, TextMeasure, layout_text};
use kurbo::{Affine, BezPath, Circle, Line, Rect, Shape};
use menucraft_core::Viewport;
use menucraft_core::hit::paint_order;
use menucraft_core::model::{
    EditorObject, ImageProps, MenuDesign, ObjectFit, ObjectKind, SerializableColor, ShapeKind,
    ShapeProps, TextProps,
};
use peniko::Color;

/// Flattening tolerance for curve-to-path conversion.
const TOLERANCE: f64 = 0.1;

/// Stroke width used for lines whose own width is not positive.
const HAIRLINE_WIDTH: f64 = 1.0;

/// Inputs for building one frame.
pub struct RenderContext<'a> {
    pub design: &'a MenuDesign,
    pub viewport: Viewport,
    /// Resolved bitmaps; images without one are skipped.
    pub images: Option<&'a ImageCache>,
}

impl<'a> RenderContext<'a> {
    pub fn new(design: &'a MenuDesign) -> Self {
        Self {
            design,
            viewport: Viewport::default(),
            images: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_images(mut self, images: &'a ImageCache) -> Self {
        self.images = Some(images);
        self
    }

    fn bitmap(&self, src: &str) -> Option<std::sync::Arc<Bitmap>> {
        self.images.and_then(|cache| cache.get(src))
    }
}

/// Build the display list for `ctx.design`.
///
/// Painting never loads anything: images that are not yet in the cache are
/// left out and appear once a later frame finds them resolved.
pub fn build_scene(ctx: &RenderContext<'_>, measure: &dyn TextMeasure) -> Scene {
    let design = ctx.design;
    let (width, height) = ctx.viewport.surface_size(&design.canvas_size);
    let mut scene = Scene::new(width, height);
    let view = ctx.viewport.transform();
    let canvas_rect = design.canvas_size.rect();

    scene.push(DrawCommand::Fill {
        path: canvas_rect.to_path(TOLERANCE),
        color: SerializableColor::white().into(),
        transform: view,
    });
    paint_background(&mut scene, ctx, canvas_rect, view);

    for obj in paint_order(&design.objects) {
        let transform = view * obj.transform();
        match &obj.kind {
            ObjectKind::Text(text) => paint_text(&mut scene, obj, text, transform, measure),
            ObjectKind::Shape(shape) => paint_shape(&mut scene, obj, shape, transform),
            ObjectKind::Image(image) => paint_image(&mut scene, ctx, obj, image, transform),
            ObjectKind::Background(_) => {
                log::debug!("Skipping stray background object {}", obj.id);
            }
        }
    }

    scene
}

fn paint_background(scene: &mut Scene, ctx: &RenderContext<'_>, canvas_rect: Rect, view: Affine) {
    let background = &ctx.design.background;
    if !background.visible {
        return;
    }
    let Some(props) = ctx.design.background_props() else {
        return;
    };

    scene.push(DrawCommand::Fill {
        path: canvas_rect.to_path(TOLERANCE),
        color: tint(props.fill, background.opacity),
        transform: view,
    });

    if let Some(bitmap) = props.image.as_deref().and_then(|src| ctx.bitmap(src)) {
        let src = full_rect(&bitmap);
        scene.push(DrawCommand::Image {
            bitmap,
            src,
            dest: canvas_rect,
            opacity: background.opacity,
            clip: None,
            transform: view,
        });
    }
}

fn paint_text(
    scene: &mut Scene,
    obj: &EditorObject,
    props: &TextProps,
    transform: Affine,
    measure: &dyn TextMeasure,
) {
    let font = FontSpec::from_props(props);
    let color = tint(props.color, obj.opacity);
    for line in layout_text(props, obj.bounds(), measure) {
        if line.text.trim().is_empty() {
            continue;
        }
        scene.push(DrawCommand::Text {
            text: line.text,
            origin: line.origin,
            font: font.clone(),
            color,
            transform,
        });
    }
}

fn paint_shape(scene: &mut Scene, obj: &EditorObject, props: &ShapeProps, transform: Affine) {
    let bounds = obj.bounds();
    let fill = tint(props.fill, obj.opacity);
    let stroke = tint(props.stroke, obj.opacity);

    let (path, filled) = match props.shape_type {
        ShapeKind::Rectangle => (bounds.to_path(TOLERANCE), true),
        ShapeKind::Circle => {
            let radius = bounds.width().min(bounds.height()) / 2.0;
            (Circle::new(bounds.center(), radius).to_path(TOLERANCE), true)
        }
        ShapeKind::Line => {
            let line = Line::new((bounds.x0, bounds.y0), (bounds.x1, bounds.y1));
            let width = if props.has_stroke() { props.stroke_width } else { HAIRLINE_WIDTH };
            scene.push(DrawCommand::Stroke {
                path: line.to_path(TOLERANCE),
                color: stroke,
                width,
                transform,
            });
            return;
        }
        ShapeKind::Path => (polyline(props), props.is_closed_path()),
    };

    if filled {
        scene.push(DrawCommand::Fill {
            path: path.clone(),
            color: fill,
            transform,
        });
    }
    if props.has_stroke() {
        scene.push(DrawCommand::Stroke {
            path,
            color: stroke,
            width: props.stroke_width,
            transform,
        });
    }
}

/// Path through the shape's points, closed when the last repeats the first.
fn polyline(props: &ShapeProps) -> BezPath {
    let mut path = BezPath::new();
    let mut points = props.points.iter();
    if let Some(first) = points.next() {
        path.move_to(*first);
        for p in points {
            path.line_to(*p);
        }
        if props.is_closed_path() {
            path.close_path();
        }
    }
    path
}

fn paint_image(
    scene: &mut Scene,
    ctx: &RenderContext<'_>,
    obj: &EditorObject,
    props: &ImageProps,
    transform: Affine,
) {
    let Some(bitmap) = ctx.bitmap(&props.src) else {
        return;
    };
    let bounds = obj.bounds();

    let src = props
        .crop
        .map(|c| c.to_rect().intersect(full_rect(&bitmap)))
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .unwrap_or_else(|| full_rect(&bitmap));

    let dest = match props.object_fit {
        ObjectFit::Contain => letterbox(src, bounds),
        ObjectFit::Cover | ObjectFit::Fill => bounds,
    };

    scene.push(DrawCommand::Image {
        bitmap,
        src,
        dest,
        opacity: obj.opacity,
        clip: props.clip.map(|shape| clip_path(shape, bounds)),
        transform,
    });
}

/// Largest rect with `src`'s aspect ratio centered in `bounds`.
fn letterbox(src: Rect, bounds: Rect) -> Rect {
    let image_ratio = src.width() / src.height();
    let box_ratio = bounds.width() / bounds.height();
    if image_ratio > box_ratio {
        let height = bounds.width() / image_ratio;
        let y = bounds.y0 + (bounds.height() - height) / 2.0;
        Rect::new(bounds.x0, y, bounds.x1, y + height)
    } else {
        let width = bounds.height() * image_ratio;
        let x = bounds.x0 + (bounds.width() - width) / 2.0;
        Rect::new(x, bounds.y0, x + width, bounds.y1)
    }
}

fn full_rect(bitmap: &Bitmap) -> Rect {
    Rect::new(0.0, 0.0, bitmap.width() as f64, bitmap.height() as f64)
}

fn tint(color: SerializableColor, opacity: f64) -> Color {
    color.with_opacity(opacity).into()
}
