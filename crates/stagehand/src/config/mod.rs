//! Configuration system
//!
//! Engine settings are plain serde structs. Any type implementing [`Config`]
//! can be loaded from or saved to `.toml` and `.ron` files.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Supported file formats, picked by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format for a path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Application name reported by the engine and its subsystems
    pub app_name: String,

    /// Stop the run loop after this many frames (None = until quit)
    pub max_frames: Option<u64>,

    /// Fixed delta time per frame in seconds (None = wall clock)
    pub fixed_timestep: Option<f32>,

    /// Resource lookup configuration
    pub resources: ResourceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Stagehand Application".to_string(),
            max_frames: None,
            fixed_timestep: None,
            resources: ResourceConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

/// Resource search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directories searched in order when resolving a resource name
    pub search_paths: Vec<String>,

    /// Fail initialization when a search path is missing
    pub strict: bool,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            search_paths: vec!["assets".to_string()],
            strict: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            app_name = "Arena"
            max_frames = 30

            [resources]
            strict = true
            "#,
        )
        .unwrap();

        assert_eq!(config.app_name, "Arena");
        assert_eq!(config.max_frames, Some(30));
        assert!(config.resources.strict);
        assert_eq!(config.resources.search_paths, vec!["assets".to_string()]);
    }

    #[test]
    fn test_unknown_tables_are_ignored() {
        let config: EngineConfig = toml::from_str(
            r#"
            app_name = "Legacy"

            [physics]
            gravity = [0.0, -9.8, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.app_name, "Legacy");
        assert_eq!(config.resources, ResourceConfig::default());
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");

        let config = EngineConfig {
            app_name: "Saved".to_string(),
            fixed_timestep: Some(0.25),
            ..EngineConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_and_load_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.ron");

        let config = EngineConfig {
            max_frames: Some(12),
            ..EngineConfig::default()
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(EngineConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, "{}").unwrap();

        let err = EngineConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
