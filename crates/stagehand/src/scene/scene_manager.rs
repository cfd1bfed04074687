//! Scene Manager - holds the active scene
//!
//! Only one scene is active at a time. Swapping scenes hands the previous
//! one back to the caller, which must clean it through the domain managers.

use super::Scene;
use crate::config::EngineConfig;
use crate::frame::FrameContext;
use crate::subsystem::{Subsystem, SubsystemError};

/// Name given to the scene created at initialization
pub const DEFAULT_SCENE_NAME: &str = "Main";

/// Owner of the active scene
#[derive(Debug, Default)]
pub struct SceneManager {
    active: Scene,
    initialized: bool,
}

impl SceneManager {
    /// Create a scene manager with an empty default scene
    pub fn new() -> Self {
        Self {
            active: Scene::new(DEFAULT_SCENE_NAME),
            initialized: false,
        }
    }

    /// The active scene
    pub fn active(&self) -> &Scene {
        &self.active
    }

    /// The active scene, mutably
    pub fn active_mut(&mut self) -> &mut Scene {
        &mut self.active
    }

    /// Make `scene` active and return the previous one
    pub fn replace(&mut self, scene: Scene) -> Scene {
        log::info!("Switching scene '{}' -> '{}'", self.active.name(), scene.name());
        std::mem::replace(&mut self.active, scene)
    }
}

impl Subsystem for SceneManager {
    fn name(&self) -> &str {
        "scene manager"
    }

    fn initialize(&mut self, _config: &EngineConfig) -> Result<(), SubsystemError> {
        log::debug!(
            "Scene manager: active scene '{}' with {} entities",
            self.active.name(),
            self.active.len()
        );
        self.initialized = true;
        Ok(())
    }

    fn advance_frame(&mut self, _frame: &FrameContext) -> Result<(), SubsystemError> {
        Ok(())
    }

    fn teardown(&mut self) {
        self.active = Scene::new(DEFAULT_SCENE_NAME);
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
