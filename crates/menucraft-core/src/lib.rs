//! MenuCraft Core Library
//!
//! Document model, undo/redo history, object editing, hit-testing and
//! gesture handling for the MenuCraft menu designer.

pub mod config;
pub mod editor;
pub mod factory;
pub mod hit;
pub mod history;
pub mod image_search;
pub mod input;
pub mod interaction;
pub mod model;
pub mod session;
pub mod templates;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use factory::ImagePlacement;
pub use history::{DesignSnapshot, History};
pub use image_search::{ImageSearch, Photo, PhotoPage, SearchError, StaticImageLibrary};
pub use input::{KeyPress, Modifiers, PointerEvent, TouchEvent, TouchPoint};
pub use interaction::{InteractionController, InteractionState};
pub use model::{EditorObject, MenuDesign, ObjectId, ObjectKind, ObjectPatch};
pub use session::{EditorSession, HostLayout};
pub use templates::{TemplateCatalog, TemplateSource};
pub use viewport::{Viewport, fit_scale};
