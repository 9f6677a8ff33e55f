use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{EngineConfig, GridSize};
use crate::error::SettingsError;
use crate::input::Direction;
use crate::snake::GridCell;

const APP_DIR_NAME: &str = "tile-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-tunable engine settings. Every field is optional; unset fields keep
/// the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cell: Option<GridCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_start: Option<GridCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Settings {
    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merged_with(self, overrides: Settings) -> Self {
        Self {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            step_ms: overrides.step_ms.or(self.step_ms),
            initial_length: overrides.initial_length.or(self.initial_length),
            start_cell: overrides.start_cell.or(self.start_cell),
            start_direction: overrides.start_direction.or(self.start_direction),
            apple_start: overrides.apple_start.or(self.apple_start),
            seed: overrides.seed.or(self.seed),
        }
    }

    /// Resolves against the defaults and validates the result.
    pub fn to_engine_config(&self) -> Result<EngineConfig, SettingsError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            grid: GridSize {
                width: self.width.unwrap_or(defaults.grid.width),
                height: self.height.unwrap_or(defaults.grid.height),
            },
            step_duration: self
                .step_ms
                .map_or(defaults.step_duration, Duration::from_millis),
            initial_length: self.initial_length.unwrap_or(defaults.initial_length),
            start_cell: self.start_cell.unwrap_or(defaults.start_cell),
            start_direction: self.start_direction.unwrap_or(defaults.start_direction),
            apple_start: self.apple_start.unwrap_or(defaults.apple_start),
            seed: self.seed.or(defaults.seed),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from `path`, or from the default location when `None`.
///
/// A missing file yields default settings. A file that exists but cannot be
/// read or parsed is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => load_settings_from_path(path),
        None => load_settings_from_path(&settings_path()),
    }
}

fn load_settings_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Err(error) => {
            return Err(SettingsError::Io {
                error,
                path: path.to_path_buf(),
            });
        }
    };

    if raw.trim().is_empty() {
        warn!(path = %path.display(), "settings file is empty, using defaults");
        return Ok(Settings::default());
    }

    serde_json::from_str::<Settings>(&raw).map_err(|error| SettingsError::Parse {
        error,
        path: path.to_path_buf(),
    })
}

/// Renders settings as the pretty JSON accepted by [`load_settings`].
pub fn settings_to_json(settings: &Settings) -> serde_json::Result<String> {
    serde_json::to_string_pretty(settings)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use crate::error::{ConfigError, SettingsError};
    use crate::input::Direction;
    use crate::snake::GridCell;

    use super::{Settings, load_settings, settings_to_json};

    #[test]
    fn missing_settings_file_returns_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("absent.json");

        let loaded = load_settings(Some(&path)).expect("missing file should return defaults");

        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn settings_file_is_parsed() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "width": 20,
                "step_ms": 90,
                "start_direction": "up",
                "start_cell": { "column": 4, "row": 9 }
            }"#,
        )
        .expect("test file write should succeed");

        let loaded = load_settings(Some(&path)).expect("valid file should load");

        assert_eq!(loaded.width, Some(20));
        assert_eq!(loaded.start_direction, Some(Direction::Up));
        assert_eq!(loaded.start_cell, Some(GridCell::new(4, 9)));

        let config = loaded.to_engine_config().expect("settings should be valid");
        assert_eq!(config.grid.width, 20);
        assert_eq!(config.grid.height, 15);
        assert_eq!(config.step_duration, Duration::from_millis(90));
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            load_settings(Some(&path)),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "speed": 3 }"#).expect("test file write should succeed");

        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let file = Settings {
            width: Some(30),
            height: Some(20),
            ..Settings::default()
        };
        let cli = Settings {
            width: Some(12),
            seed: Some(7),
            ..Settings::default()
        };

        let merged = file.merged_with(cli);

        assert_eq!(merged.width, Some(12));
        assert_eq!(merged.height, Some(20));
        assert_eq!(merged.seed, Some(7));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let settings = Settings {
            step_ms: Some(0),
            ..Settings::default()
        };

        assert!(matches!(
            settings.to_engine_config(),
            Err(SettingsError::Config(ConfigError::ZeroStepDuration))
        ));
    }

    #[test]
    fn rendered_json_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        let settings = Settings {
            height: Some(11),
            apple_start: Some(GridCell::new(3, 3)),
            ..Settings::default()
        };

        let json = settings_to_json(&settings).expect("settings should serialize");
        assert!(!json.contains("width"));
        fs::write(&path, json).expect("test file write should succeed");

        assert_eq!(load_settings(Some(&path)).ok(), Some(settings));
    }
}
