//! Headless subsystem used when no backend is attached

use super::{Subsystem, SubsystemError};
use crate::config::EngineConfig;
use crate::frame::FrameContext;

/// Subsystem that only tracks its own lifecycle
///
/// Lets the engine run without a window, GPU or physics backend.
#[derive(Debug, Clone)]
pub struct HeadlessSubsystem {
    name: String,
    initialized: bool,
    frames: u64,
}

impl HeadlessSubsystem {
    /// Create a headless subsystem with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initialized: false,
            frames: 0,
        }
    }

    /// Frames advanced since initialization
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Subsystem for HeadlessSubsystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, config: &EngineConfig) -> Result<(), SubsystemError> {
        log::debug!("{}: headless initialize for '{}'", self.name, config.app_name);
        self.initialized = true;
        self.frames = 0;
        Ok(())
    }

    fn advance_frame(&mut self, _frame: &FrameContext) -> Result<(), SubsystemError> {
        if !self.initialized {
            return Err(SubsystemError::NotInitialized);
        }
        self.frames += 1;
        Ok(())
    }

    fn teardown(&mut self) {
        log::debug!("{}: headless teardown after {} frames", self.name, self.frames);
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
