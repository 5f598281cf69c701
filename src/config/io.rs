use std::path::{Path, PathBuf};

use serde::de::Error as SerdeDeError;

use crate::app_dirs;
use crate::storage::atomic_write;

use super::{AppConfig, ConfigError};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from `path`, returning defaults if the file is absent.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.normalized())
}

/// Persist configuration to the app directory.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Write the TOML settings file atomically to prevent partial writes on crash.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwipeSettings;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from_path(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.swipe.commit_threshold_px, 150.0);
        assert!(!config.deck.show_reset);
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[swipe]\ncommit_threshold_px = 90.0\ninertia = false\n\n[deck]\nshow_reset = true\n",
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.swipe.commit_threshold_px, 90.0);
        assert!(!config.swipe.inertia);
        assert_eq!(config.swipe.exit_duration_secs, 0.5);
        assert!(config.deck.show_reset);
        assert_eq!(config.deck.deck_path, None);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[swipe]\ncommit_threshold_px = -40.0\nexit_duration_secs = 60.0\ndrag_scale_span_factor = 0.0\n",
        )
        .unwrap();

        let swipe = load_from_path(&path).unwrap().swipe;
        assert_eq!(swipe.commit_threshold_px, 40.0);
        assert_eq!(swipe.exit_duration_secs, 5.0);
        assert_eq!(
            swipe.drag_scale_span_factor,
            SwipeSettings::default().drag_scale_span_factor
        );
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[swipe\n").unwrap();
        match load_from_path(&path) {
            Err(ConfigError::ParseToml { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.swipe.snap_back_secs = 0.45;
        config.deck.deck_path = Some(dir.path().join("reef.toml"));
        save_to_path(&config, &path).unwrap();

        assert_eq!(load_from_path(&path).unwrap(), config);
    }
}
