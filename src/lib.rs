//! Library exports for the binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Settings stored in `config.toml`.
pub mod config;
/// Swipe deck model, animation and controller.
pub mod deck;
/// egui front end.
pub mod egui_app;
/// Tracing subscriber setup.
pub mod logging;
/// Key-value persistence backends.
pub mod storage;
