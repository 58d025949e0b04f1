//! Main application entry point (native).
//!
//! Usage: `sparkle [config.json]`

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
fn main() {
    use sparkle_app::{App, AppConfig, ShortcutRegistry};
    use sparkle_core::config::CanvasConfig;

    env_logger::init();
    log::info!("Starting Sparkle");

    let canvas = match std::env::args().nth(1) {
        Some(path) => match sparkle_app::settings::load_config_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("Failed to load config {}: {}; using defaults", path, e);
                CanvasConfig::default()
            }
        },
        None => CanvasConfig::default(),
    };
    ShortcutRegistry::log_all(&canvas);

    let app = App::with_config(AppConfig {
        canvas,
        ..AppConfig::default()
    });
    if let Err(e) = app.run() {
        log::error!("Sparkle exited with an error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
