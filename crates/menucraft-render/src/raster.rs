//! Software rasterization of scenes with tiny-skia.

use crate::fonts::FontBook;
use crate::image_cache::{Bitmap, ImageCache};
use crate::painter::{RenderContext, build_scene};
use crate::scene::{DrawCommand, Scene};
use kurbo::{Affine, BezPath, PathEl, Rect};
use menucraft_core::Viewport;
use menucraft_core::model::MenuDesign;
use peniko::Color;
use thiserror::Error;
use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Path, PathBuilder, Pattern, Pixmap, PixmapRef,
    SpreadMode, Stroke, Transform,
};

/// Rasterizer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Result type for rasterizer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendered frame as straight (non-premultiplied) RGBA pixels.
#[derive(Debug)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PngRenderResult {
    pub fn encode(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.rgba_data, self.width, self.height)
    }
}

/// CPU renderer for [`Scene`]s.
pub struct PixmapRenderer {
    fonts: FontBook,
}

impl PixmapRenderer {
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Build and rasterize `design` in one step.
    pub fn render_design(
        &self,
        design: &MenuDesign,
        viewport: Viewport,
        images: &ImageCache,
    ) -> RenderResult<PngRenderResult> {
        let ctx = RenderContext::new(design)
            .with_viewport(viewport)
            .with_images(images);
        let scene = build_scene(&ctx, &self.fonts);
        self.render(&scene)
    }

    /// Rasterize `scene` onto a white surface.
    pub fn render(&self, scene: &Scene) -> RenderResult<PngRenderResult> {
        let mut pixmap = Pixmap::new(scene.width, scene.height).ok_or(RenderError::InvalidSize {
            width: scene.width,
            height: scene.height,
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        for command in &scene.commands {
            self.draw(&mut pixmap, command);
        }

        let rgba_data = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Ok(PngRenderResult {
            rgba_data,
            width: scene.width,
            height: scene.height,
        })
    }

    fn draw(&self, pixmap: &mut Pixmap, command: &DrawCommand) {
        match command {
            DrawCommand::Fill {
                path,
                color,
                transform,
            } => {
                if let Some(path) = to_skia_path(path) {
                    pixmap.fill_path(
                        &path,
                        &solid(*color),
                        FillRule::Winding,
                        to_skia_transform(*transform),
                        None,
                    );
                }
            }
            DrawCommand::Stroke {
                path,
                color,
                width,
                transform,
            } => {
                if let Some(path) = to_skia_path(path) {
                    let stroke = Stroke {
                        width: *width as f32,
                        ..Default::default()
                    };
                    pixmap.stroke_path(
                        &path,
                        &solid(*color),
                        &stroke,
                        to_skia_transform(*transform),
                        None,
                    );
                }
            }
            DrawCommand::Image {
                bitmap,
                src,
                dest,
                opacity,
                clip,
                transform,
            } => draw_image(pixmap, bitmap, *src, *dest, *opacity, clip.as_ref(), *transform),
            DrawCommand::Text {
                text,
                origin,
                font,
                color,
                transform,
            } => {
                let Some(outline) = self.fonts.glyph_path(text, font, *origin) else {
                    return;
                };
                if let Some(path) = to_skia_path(&outline) {
                    pixmap.fill_path(
                        &path,
                        &solid(*color),
                        FillRule::Winding,
                        to_skia_transform(*transform),
                        None,
                    );
                }
            }
        }
    }
}

fn draw_image(
    pixmap: &mut Pixmap,
    bitmap: &Bitmap,
    src: Rect,
    dest: Rect,
    opacity: f64,
    clip: Option<&BezPath>,
    transform: Affine,
) {
    let Some(source) = PixmapRef::from_bytes(bitmap.data(), bitmap.width(), bitmap.height()) else {
        log::warn!("Bitmap {}x{} has mismatched data", bitmap.width(), bitmap.height());
        return;
    };
    if src.width() <= 0.0 || src.height() <= 0.0 {
        return;
    }

    // Bitmap pixels -> canvas space; the path transform is applied on top.
    let local = Affine::translate(dest.origin().to_vec2())
        * Affine::scale_non_uniform(dest.width() / src.width(), dest.height() / src.height())
        * Affine::translate(-src.origin().to_vec2());

    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.shader = Pattern::new(
        source,
        SpreadMode::Pad,
        FilterQuality::Bilinear,
        opacity.clamp(0.0, 1.0) as f32,
        to_skia_transform(local),
    );

    let ts = to_skia_transform(transform);
    let mask = clip.and_then(|clip| {
        let path = to_skia_path(clip)?;
        let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
        mask.fill_path(&path, FillRule::Winding, true, ts);
        Some(mask)
    });
    if clip.is_some() && mask.is_none() {
        return;
    }

    let Some(rect) =
        tiny_skia::Rect::from_ltrb(dest.x0 as f32, dest.y0 as f32, dest.x1 as f32, dest.y1 as f32)
    else {
        return;
    };
    pixmap.fill_path(&PathBuilder::from_rect(rect), &paint, FillRule::Winding, ts, mask.as_ref());
}

fn solid(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

/// kurbo and tiny-skia share the column layout `[a, b, c, d, e, f]`.
fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p) => pb.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(p1, p2, p) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Encode straight RGBA8 pixels as PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().inspect_err(|e| {
            log::error!("Failed to write PNG header: {:?}", e);
        })?;
        writer.write_image_data(rgba_data).inspect_err(|e| {
            log::error!("Failed to write PNG data: {:?}", e);
        })?;
    }
    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Shape};
    use menucraft_core::Editor;
    use menucraft_core::model::{ClipShape, ShapeKind, SerializableColor};

    fn renderer() -> PixmapRenderer {
        PixmapRenderer::new(FontBook::empty())
    }

    fn pixel(result: &PngRenderResult, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * result.width + x) * 4) as usize;
        let d = &result.rgba_data[i..i + 4];
        [d[0], d[1], d[2], d[3]]
    }

    #[test]
    fn test_transform_conversion() {
        let affine = Affine::translate((5.0, 7.0)) * Affine::scale(2.0);
        let ts = to_skia_transform(affine);
        let mut p = [tiny_skia::Point::from_xy(1.0, 1.0)];
        ts.map_points(&mut p);
        assert_eq!((p[0].x, p[0].y), (7.0, 9.0));
    }

    #[test]
    fn test_empty_path_skipped() {
        assert!(to_skia_path(&BezPath::new()).is_none());
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1);
        assert!(to_skia_path(&rect).is_some());
    }

    #[test]
    fn test_renders_shape_fill() {
        let mut editor = Editor::default();
        editor.add_shape_object(ShapeKind::Rectangle, Some(Point::new(10.0, 10.0)));
        let design = editor.design().unwrap();
        let result = renderer()
            .render_design(design, Viewport::new(0.25), &ImageCache::new())
            .unwrap();
        assert_eq!((result.width, result.height), (200, 300));
        // Inside the 100x100 shape at (10, 10), scaled by 0.25
        assert_eq!(pixel(&result, 10, 10), [0xe2, 0xe2, 0xe2, 255]);
        assert_eq!(pixel(&result, 100, 200), [255, 255, 255, 255]);
    }

    #[test]
    fn test_clipped_image_masked() {
        let mut editor = Editor::default();
        let placement = menucraft_core::ImagePlacement::new("red.png")
            .with_clip(ClipShape::Circle)
            .at(Point::new(0.0, 0.0));
        editor.add_image_with_options(&placement);
        let design = editor.design().unwrap();

        let mut cache = ImageCache::new();
        let red = Bitmap::from_rgba8(2, 2, [255, 0, 0, 255].repeat(4)).unwrap();
        cache.insert("red.png", red);
        let result = renderer().render_design(design, Viewport::default(), &cache).unwrap();

        // 200x200 circle: center is red, the corner stays white
        assert_eq!(pixel(&result, 100, 100), [255, 0, 0, 255]);
        assert_eq!(pixel(&result, 2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_without_fonts_is_skipped() {
        let mut editor = Editor::default();
        editor.add_text_object(Some("Soup"), Some(Point::new(0.0, 0.0)));
        let design = editor.design().unwrap();
        let result = renderer()
            .render_design(design, Viewport::default(), &ImageCache::new())
            .unwrap();
        assert!(result.rgba_data.chunks_exact(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_background_fill_painted() {
        let mut editor = Editor::default();
        editor.update_background(&menucraft_core::model::BackgroundPatch {
            fill: Some(SerializableColor::rgb(10, 20, 30)),
            ..Default::default()
        });
        let result = renderer()
            .render_design(editor.design().unwrap(), Viewport::new(0.1), &ImageCache::new())
            .unwrap();
        assert_eq!(pixel(&result, 40, 60), [10, 20, 30, 255]);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&[0, 0, 0, 255], 1, 1).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
        assert!(encode_png(&[0, 0, 0], 1, 1).is_err());
    }
}
