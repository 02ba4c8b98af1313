use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "dronescroll.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Relative to the assets root.
    pub model_path: String,
    /// Seeds the part directions; random every run when unset.
    pub direction_seed: Option<u64>,
    /// Seconds the section timelines take to catch up with the scroll position.
    pub scrub_seconds: f32,
    pub smooth_scroll_seconds: f32,
    /// Sections scrolled per wheel line.
    pub wheel_step: f32,
    pub window_title: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            model_path: "models/drone.gltf".to_string(),
            direction_seed: None,
            scrub_seconds: 1.0,
            smooth_scroll_seconds: 0.15,
            wheel_step: 0.12,
            window_title: "Drone Showcase".to_string(),
            window_width: 1280.0,
            window_height: 720.0,
        }
    }
}

impl ShowcaseConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `explicit` if given. Otherwise reads the default file when it exists and falls back
    /// to built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ShowcaseConfig::from_toml_str(
            "model_path = \"models/other.glb\"\ndirection_seed = 42\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.model_path, "models/other.glb");
        assert_eq!(config.direction_seed, Some(42));
        assert_eq!(config.scrub_seconds, 1.0);
        assert_eq!(config.window_title, "Drone Showcase");
    }

    #[test]
    fn bad_types_are_reported_with_path() {
        let err = ShowcaseConfig::from_toml_str("scrub_seconds = \"slow\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ShowcaseConfig::load_or_default(Some(Path::new("/nonexistent/dronescroll.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
