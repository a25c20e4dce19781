//! Headless application shell: session, input routing and PNG export.

use crate::shortcuts::{ShortcutRegistry, apply_action};
use kurbo::Size;
use menucraft_core::{
    ConfigError, EditorConfig, EditorSession, HostLayout, InteractionController, KeyPress,
    PointerEvent, TemplateCatalog, TouchEvent, Viewport,
};
use menucraft_render::{FileLoader, FontBook, ImageCache, PixmapRenderer, RenderError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Nothing to render: no design loaded")]
    NoDesign,
}

pub type AppResult<T> = Result<T, AppError>;

/// Application configuration, read from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Size of the area the canvas is fitted into.
    pub container_width: f64,
    pub container_height: f64,
    /// Where exported PNGs are written.
    pub output: PathBuf,
    /// Directory relative image paths resolve against.
    pub image_dir: Option<PathBuf>,
    /// Use installed system fonts for text.
    pub system_fonts: bool,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            container_width: 1280.0,
            container_height: 800.0,
            output: PathBuf::from("menu.png"),
            image_dir: None,
            system_fonts: true,
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.editor.validate()?;
        if !(config.container_width > 0.0 && config.container_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "container size {}x{} must be positive",
                config.container_width, config.container_height
            ))
            .into());
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn container_size(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }
}

/// Host without page chrome; footer changes are only logged.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost {
    footer_visible: bool,
}

impl ConsoleHost {
    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }
}

impl HostLayout for ConsoleHost {
    fn set_footer_visible(&mut self, visible: bool) {
        log::debug!("Host footer {}", if visible { "shown" } else { "hidden" });
        self.footer_visible = visible;
    }
}

/// The application: one editor session plus rendering state.
pub struct App {
    config: AppConfig,
    session: EditorSession<ConsoleHost>,
    controller: InteractionController,
    images: ImageCache,
    loader: FileLoader,
    renderer: PixmapRenderer,
}

impl App {
    /// Open the editor, optionally on a built-in template.
    pub fn new(config: AppConfig, template_id: Option<&str>) -> Self {
        let catalog = TemplateCatalog::builtin();
        let session = EditorSession::mount(
            ConsoleHost::default(),
            config.editor.clone(),
            template_id,
            &catalog,
        );
        let fonts = if config.system_fonts {
            FontBook::system()
        } else {
            FontBook::empty()
        };
        let loader = match &config.image_dir {
            Some(dir) => FileLoader::with_base_dir(dir),
            None => FileLoader::new(),
        };

        let mut app = Self {
            config,
            session,
            controller: InteractionController::new(Viewport::default()),
            images: ImageCache::new(),
            loader,
            renderer: PixmapRenderer::new(fonts),
        };
        app.refit();
        app
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &EditorSession<ConsoleHost> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession<ConsoleHost> {
        &mut self.session
    }

    pub fn viewport(&self) -> Viewport {
        self.controller.viewport()
    }

    /// Recompute the fit-to-container viewport.
    fn refit(&mut self) {
        if let Some(design) = self.session.editor().design() {
            let viewport = Viewport::fit(&design.canvas_size, self.config.container_size());
            self.controller.set_viewport(viewport);
        }
    }

    /// Change the container size and refit the canvas.
    pub fn resize(&mut self, size: Size) {
        self.config.container_width = size.width;
        self.config.container_height = size.height;
        self.refit();
    }

    /// Route a key press to its shortcut. Returns true if it was handled.
    pub fn handle_key(&mut self, press: &KeyPress) -> bool {
        match ShortcutRegistry::lookup(press) {
            Some(action) => {
                apply_action(self.session.editor_mut(), action);
                true
            }
            None => false,
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.refit();
        self.controller.handle_pointer(self.session.editor_mut(), event)
    }

    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        self.refit();
        self.controller.handle_touch(self.session.editor_mut(), event)
    }

    /// Rasterize the current design at the fitted scale and encode it.
    pub fn render_png(&mut self) -> AppResult<Vec<u8>> {
        self.refit();
        let design = self.session.editor().design().ok_or(AppError::NoDesign)?;
        self.images.prefetch(design, &self.loader);
        self.images.retain_referenced(design);
        let frame = self
            .renderer
            .render_design(design, self.controller.viewport(), &self.images)?;
        Ok(frame.encode()?)
    }

    /// Write the rendered design to the configured output path.
    pub fn export(&mut self) -> AppResult<PathBuf> {
        let png = self.render_png()?;
        let path = self.config.output.clone();
        std::fs::write(&path, &png)?;
        log::info!("Exported {} bytes to {}", png.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use menucraft_core::Modifiers;

    fn headless() -> AppConfig {
        AppConfig {
            system_fonts: false,
            container_width: 400.0,
            container_height: 600.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"container_width": 640, "editor": {"max_zoom": 2.0}}"#;
        let config = AppConfig::from_json(json).unwrap();
        assert!((config.container_width - 640.0).abs() < f64::EPSILON);
        assert!((config.container_height - 800.0).abs() < f64::EPSILON);
        assert!((config.editor.max_zoom - 2.0).abs() < f64::EPSILON);
        assert!(matches!(AppConfig::from_json("{"), Err(AppError::Config(_))));
        assert!(AppConfig::from_json(r#"{"container_width": 0}"#).is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menucraft.json");
        std::fs::write(&path, r#"{"output": "out.png"}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert!(matches!(AppConfig::load(&dir.path().join("missing.json")), Err(AppError::Io(_))));
    }

    #[test]
    fn test_viewport_fits_container() {
        let app = App::new(headless(), Some("template-1"));
        // 800x1200 canvas in 400x600
        assert!((app.viewport().scale - 0.5).abs() < f64::EPSILON);
        assert!(!app.session().host().footer_visible());
    }

    #[test]
    fn test_keyboard_undo_after_drag() {
        let mut app = App::new(headless(), None);
        let id = app.session_mut().editor_mut().add_shape_object(
            menucraft_core::model::ShapeKind::Rectangle,
            Some(Point::new(0.0, 0.0)),
        );

        // Screen coordinates are at half scale
        app.handle_pointer(PointerEvent::Down { position: Point::new(10.0, 10.0) });
        app.handle_pointer(PointerEvent::Move { position: Point::new(30.0, 10.0) });
        app.handle_pointer(PointerEvent::Up { position: Point::new(30.0, 10.0) });
        let moved = app.session().editor().object(id).unwrap().position();
        assert_eq!(moved, Point::new(40.0, 0.0));

        let ctrl_z = KeyPress::new("z", Modifiers { ctrl: true, ..Default::default() });
        assert!(app.handle_key(&ctrl_z));
        assert_eq!(app.session().editor().object(id).unwrap().position(), Point::ZERO);
        assert!(!app.handle_key(&KeyPress::new("q", Modifiers::default())));
    }

    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            output: dir.path().join("menu.png"),
            ..headless()
        };
        let mut app = App::new(config, Some("template-2"));
        let path = app.export().unwrap();
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
