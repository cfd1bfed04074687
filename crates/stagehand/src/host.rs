//! Single engine instance per process
//!
//! [`EngineHost`] is the owner of the one [`Engine`] a program runs. Setting
//! up a second instance is refused and leaves the first one untouched.

use crate::config::EngineConfig;
use crate::engine::{Engine, EngineError};

/// Holds at most one engine
#[derive(Debug, Default)]
pub struct EngineHost {
    engine: Option<Engine>,
}

impl EngineHost {
    /// Create a host with no engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the headless engine for `app_name`
    pub fn setup_instance(&mut self, app_name: impl Into<String>) -> Result<&mut Engine, EngineError> {
        let config = EngineConfig {
            app_name: app_name.into(),
            ..EngineConfig::default()
        };
        self.setup_instance_with(config)
    }

    /// Create the headless engine from a full configuration
    pub fn setup_instance_with(&mut self, config: EngineConfig) -> Result<&mut Engine, EngineError> {
        self.ensure_vacant(&config.app_name)?;
        let engine = Engine::headless(config)?;
        Ok(self.engine.insert(engine))
    }

    /// Adopt an engine assembled elsewhere
    pub fn install(&mut self, engine: Engine) -> Result<&mut Engine, EngineError> {
        self.ensure_vacant(engine.app_name())?;
        Ok(self.engine.insert(engine))
    }

    /// The hosted engine, if any
    pub fn instance(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    /// The hosted engine, mutably
    pub fn instance_mut(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    /// Drop the hosted engine, cleaning it first if it is still live
    pub fn shutdown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if engine.state().is_live() {
                if let Err(err) = engine.clean() {
                    log::warn!("Engine '{}' did not clean up: {err}", engine.app_name());
                }
            }
            log::info!("Engine '{}' destroyed", engine.app_name());
        }
    }

    fn ensure_vacant(&self, requested: &str) -> Result<(), EngineError> {
        match &self.engine {
            Some(existing) => {
                log::warn!(
                    "Refusing to set up '{requested}': engine '{}' already exists",
                    existing.app_name()
                );
                Err(EngineError::DuplicateInstance(existing.app_name().to_string()))
            }
            None => Ok(()),
        }
    }
}

impl Drop for EngineHost {
    fn drop(&mut self) {
        self.shutdown();
    }
}
