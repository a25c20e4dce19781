//! Main application entry point.
//!
//! Usage: `menucraft [TEMPLATE_ID] [OUTPUT.png] [--config CONFIG.json]`

use menucraft_app::{App, AppConfig, AppResult, ShortcutRegistry};
use menucraft_core::TemplateCatalog;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    log::info!("Starting MenuCraft");

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let mut template_id = None;
    let mut output = None;
    let mut config_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = args.next().map(PathBuf::from),
            "--list" => {
                for info in TemplateCatalog::builtin().all() {
                    println!("{:12} {:10} {}", info.id, info.category, info.title);
                }
                return Ok(());
            }
            "--shortcuts" => {
                ShortcutRegistry::print_all();
                return Ok(());
            }
            _ if template_id.is_none() => template_id = Some(arg),
            _ => output = Some(PathBuf::from(arg)),
        }
    }

    let mut config = match config_path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    if let Some(output) = output {
        config.output = output;
    }

    let mut app = App::new(config, template_id.as_deref());
    let path = app.export()?;
    println!("Wrote {}", path.display());
    Ok(())
}
