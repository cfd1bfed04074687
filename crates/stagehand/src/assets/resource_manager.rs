//! Resource Manager - ordered search paths for game resources
//!
//! Initialized right after the render context and before the scene
//! manager. Later subsystems resolve resource names through it.

use crate::config::EngineConfig;
use crate::frame::FrameContext;
use crate::subsystem::{Subsystem, SubsystemError};
use std::path::{Path, PathBuf};

/// Resolves resource names against the configured search paths
#[derive(Debug, Default)]
pub struct ResourceManager {
    search_paths: Vec<PathBuf>,
    initialized: bool,
}

impl ResourceManager {
    /// Create an uninitialized resource manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Search paths that existed at initialization, in order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first search path containing `name`
    pub fn resolve(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        let name = name.as_ref();
        self.search_paths
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl Subsystem for ResourceManager {
    fn name(&self) -> &str {
        "resource manager"
    }

    fn initialize(&mut self, config: &EngineConfig) -> Result<(), SubsystemError> {
        let mut found = Vec::new();
        for path in config.resources.search_paths.iter().map(PathBuf::from) {
            if path.is_dir() {
                found.push(path);
            } else if config.resources.strict {
                return Err(SubsystemError::Failed(format!(
                    "resource path '{}' is not a directory",
                    path.display()
                )));
            } else {
                log::warn!("Skipping missing resource path '{}'", path.display());
            }
        }

        log::info!("Resource manager using {} search paths", found.len());
        self.search_paths = found;
        self.initialized = true;
        Ok(())
    }

    fn advance_frame(&mut self, _frame: &FrameContext) -> Result<(), SubsystemError> {
        Ok(())
    }

    fn teardown(&mut self) {
        self.search_paths.clear();
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;

    fn config_with(paths: Vec<String>, strict: bool) -> EngineConfig {
        EngineConfig {
            resources: ResourceConfig { search_paths: paths, strict },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_resolve_uses_first_matching_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("ship.mesh"), b"").unwrap();
        std::fs::write(first.path().join("shared.mat"), b"").unwrap();
        std::fs::write(second.path().join("shared.mat"), b"").unwrap();

        let mut resources = ResourceManager::new();
        let paths = vec![
            first.path().display().to_string(),
            second.path().display().to_string(),
        ];
        resources.initialize(&config_with(paths, true)).unwrap();

        assert_eq!(resources.resolve("ship.mesh"), Some(second.path().join("ship.mesh")));
        assert_eq!(resources.resolve("shared.mat"), Some(first.path().join("shared.mat")));
        assert_eq!(resources.resolve("missing.png"), None);
    }

    #[test]
    fn test_missing_path_is_skipped_unless_strict() {
        let missing = vec!["definitely/not/here".to_string()];

        let mut lenient = ResourceManager::new();
        lenient.initialize(&config_with(missing.clone(), false)).unwrap();
        assert!(lenient.search_paths().is_empty());

        let mut strict = ResourceManager::new();
        assert!(strict.initialize(&config_with(missing, true)).is_err());
        assert!(!strict.is_initialized());
    }
}
