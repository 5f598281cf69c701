#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the fishswipe deck.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use fishswipe::app_dirs;
use fishswipe::config::{self, AppConfig};
use fishswipe::deck;
use fishswipe::egui_app::ui::{MIN_VIEWPORT_SIZE, SwipeApp};
use fishswipe::logging;
use fishswipe::storage::FileStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = load_config();
    let cards = deck::load_cards(config.deck.deck_path.as_deref());

    let viewport = egui::ViewportBuilder::default()
        .with_title("Fish Swipe")
        .with_inner_size([540.0, 760.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Fish Swipe",
        native_options,
        Box::new(move |_cc| {
            let app: Box<dyn eframe::App> = match app_dirs::state_file_path() {
                Ok(path) => Box::new(SwipeApp::new(
                    cards,
                    FileStore::open_or_empty(path),
                    config,
                )),
                Err(err) => Box::new(LaunchError {
                    message: format!("Unable to locate swipe state: {err}"),
                }),
            };
            Ok(app)
        }),
    )?;
    Ok(())
}

fn load_config() -> AppConfig {
    match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}; using default settings");
            AppConfig::default()
        }
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
