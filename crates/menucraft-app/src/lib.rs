//! MenuCraft Application
//!
//! Headless shell around the editor: configuration, keyboard shortcuts,
//! pointer routing and PNG export.

mod app;
mod shortcuts;

pub use app::{App, AppConfig, AppError, AppResult, ConsoleHost};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry, apply_action};
