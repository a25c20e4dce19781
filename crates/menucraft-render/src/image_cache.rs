//! URL-keyed cache of decoded bitmaps.
//!
//! Loading happens ahead of painting: [`ImageCache::prefetch`] walks a
//! design's image sources through an [`ImageLoader`], and the painter only
//! reads bitmaps that are already resolved.

use base64::Engine;
use menucraft_core::model::MenuDesign;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Image loading errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] ::image::ImageError),
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Unsupported image source: {0}")]
    Unsupported(String),
}

/// A decoded bitmap with premultiplied RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Build from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        for px in rgba.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a < 255 {
                px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
                px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
                px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
            }
        }
        Some(Self {
            width,
            height,
            data: rgba,
        })
    }

    /// Decode PNG, JPEG or WebP bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImageError> {
        let rgba = ::image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
            .ok_or_else(|| ImageError::Unsupported("empty image".to_string()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Load state of a cached URL.
#[derive(Debug, Clone)]
pub enum ImageState {
    Pending,
    Ready(Arc<Bitmap>),
    Failed(String),
}

/// Fetches raw image bytes for a URL.
pub trait ImageLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, ImageError>;
}

/// Loads `data:` URLs and local files (plain paths or `file://`).
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_dir: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// With a base dir, leading slashes are site-relative (`/images/a.png`).
    fn resolve_path(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path.trim_start_matches('/')),
            None => Path::new(path).to_path_buf(),
        }
    }
}

impl ImageLoader for FileLoader {
    fn load(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        if let Some(rest) = url.strip_prefix("data:") {
            return decode_data_url(rest);
        }
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(std::fs::read(path)?);
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            return Err(ImageError::Unsupported(url.to_string()));
        }
        Ok(std::fs::read(self.resolve_path(url))?)
    }
}

/// Decode the part of a `data:` URL after the scheme.
fn decode_data_url(rest: &str) -> Result<Vec<u8>, ImageError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::InvalidDataUrl("missing ','".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(ImageError::InvalidDataUrl(format!("not base64: {}", meta)));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))
}

/// Decoded bitmaps keyed by source URL.
#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageState>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` as wanted. Returns true if it was not known before.
    pub fn request(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_string(), ImageState::Pending);
        true
    }

    /// Store the outcome of a load for `url`.
    ///
    /// Results for URLs nothing asked for are still cached; the painter
    /// only looks up sources its objects reference.
    pub fn resolve(&mut self, url: &str, result: Result<Vec<u8>, ImageError>) {
        let state = match result.and_then(|bytes| Bitmap::decode(&bytes)) {
            Ok(bitmap) => {
                log::debug!("Image {} ready ({}x{})", url, bitmap.width(), bitmap.height());
                ImageState::Ready(Arc::new(bitmap))
            }
            Err(e) => {
                log::warn!("Failed to load image {}: {}", url, e);
                ImageState::Failed(e.to_string())
            }
        };
        if !self.entries.contains_key(url) {
            log::debug!("Image {} resolved without a pending request", url);
        }
        self.entries.insert(url.to_string(), state);
    }

    /// Insert an already-decoded bitmap.
    pub fn insert(&mut self, url: &str, bitmap: Bitmap) {
        self.entries.insert(url.to_string(), ImageState::Ready(Arc::new(bitmap)));
    }

    pub fn state(&self, url: &str) -> Option<&ImageState> {
        self.entries.get(url)
    }

    /// The bitmap for `url` if it has finished loading.
    pub fn get(&self, url: &str) -> Option<Arc<Bitmap>> {
        match self.entries.get(url) {
            Some(ImageState::Ready(bitmap)) => Some(Arc::clone(bitmap)),
            _ => None,
        }
    }

    /// URLs requested but not yet resolved.
    pub fn pending(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, ImageState::Pending))
            .map(|(url, _)| url.as_str())
            .collect()
    }

    /// Load every image `design` references that is not cached yet.
    ///
    /// Returns how many loads were attempted.
    pub fn prefetch(&mut self, design: &MenuDesign, loader: &dyn ImageLoader) -> usize {
        let mut attempted = 0;
        for url in design.image_sources() {
            if self.request(url) {
                attempted += 1;
                let result = loader.load(url);
                self.resolve(url, result);
            }
        }
        attempted
    }

    /// Forget entries `design` no longer references.
    pub fn retain_referenced(&mut self, design: &MenuDesign) {
        let sources = design.image_sources();
        self.entries.retain(|url, _| sources.contains(&url.as_str()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucraft_core::Editor;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([255, 0, 0, 128]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ::image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn data_url(bytes: &[u8]) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    #[test]
    fn test_decode_premultiplies() {
        let bitmap = Bitmap::decode(&png_bytes(2, 3)).unwrap();
        assert_eq!(bitmap.width(), 2);
        assert_eq!(bitmap.height(), 3);
        assert_eq!(&bitmap.data()[..4], &[128, 0, 0, 128]);
    }

    #[test]
    fn test_data_url_loading() {
        let bytes = png_bytes(1, 1);
        let loaded = FileLoader::new().load(&data_url(&bytes)).unwrap();
        assert_eq!(loaded, bytes);
        assert!(matches!(
            FileLoader::new().load("data:image/png,abc"),
            Err(ImageError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn test_file_loading_with_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dish.png"), png_bytes(4, 4)).unwrap();
        let loader = FileLoader::with_base_dir(dir.path());
        assert!(loader.load("dish.png").is_ok());
        assert!(loader.load("/dish.png").is_ok());
        assert!(matches!(loader.load("missing.png"), Err(ImageError::Io(_))));
        assert!(matches!(
            loader.load("https://example.com/a.png"),
            Err(ImageError::Unsupported(_))
        ));
    }

    #[test]
    fn test_resolve_failure_is_remembered() {
        let mut cache = ImageCache::new();
        assert!(cache.request("broken.png"));
        assert!(!cache.request("broken.png"));
        assert_eq!(cache.pending(), vec!["broken.png"]);
        cache.resolve("broken.png", Ok(vec![1, 2, 3]));
        assert!(matches!(cache.state("broken.png"), Some(ImageState::Failed(_))));
        assert!(cache.get("broken.png").is_none());
        assert!(cache.pending().is_empty());
    }

    #[test]
    fn test_stale_resolve_tolerated() {
        let mut cache = ImageCache::new();
        cache.resolve("never-requested.png", Ok(png_bytes(1, 1)));
        assert!(cache.get("never-requested.png").is_some());
    }

    #[test]
    fn test_prefetch_and_retain() {
        let bytes = png_bytes(2, 2);
        let url = data_url(&bytes);
        let mut editor = Editor::default();
        let id = editor.add_image_object(&url, None);
        let design = editor.design().unwrap().clone();

        let mut cache = ImageCache::new();
        assert_eq!(cache.prefetch(&design, &FileLoader::new()), 1);
        assert_eq!(cache.prefetch(&design, &FileLoader::new()), 0);
        assert!(cache.get(&url).is_some());

        editor.delete_object(id);
        cache.retain_referenced(editor.design().unwrap());
        assert!(cache.is_empty());
    }
}
