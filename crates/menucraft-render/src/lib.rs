//! MenuCraft Render Library
//!
//! Builds display lists from designs and rasterizes them on the CPU with
//! tiny-skia. Bitmaps come from a URL-keyed cache that is filled ahead of
//! painting; text is measured and outlined with system fonts.

pub mod clip;
pub mod fonts;
pub mod image_cache;
mod painter;
mod raster;
pub mod scene;
pub mod text_layout;

pub use fonts::FontBook;
pub use image_cache::{Bitmap, FileLoader, ImageCache, ImageError, ImageLoader, ImageState};
pub use painter::{RenderContext, build_scene};
pub use raster::{PixmapRenderer, PngRenderResult, RenderError, RenderResult, encode_png};
pub use scene::{DrawCommand, Scene};
pub use text_layout::{ApproximateMeasure, FontSpec, TextLine, TextMeasure, layout_text, wrap_lines};
