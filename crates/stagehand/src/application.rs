//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::frame::FrameContext;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a game on top of the engine. The engine
/// calls the hooks from [`Engine::run`].
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after every subsystem is up and before the managers are
    /// started. Populate the initial scene here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame after all managers have updated.
    fn update(&mut self, _engine: &mut Engine, _frame: &FrameContext) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called when the loop ends, before the engine tears its subsystems down.
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[source] Box<EngineError>),

    /// Failure reported by the application itself
    #[error("Application error: {0}")]
    Custom(String),
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        Self::Engine(Box::new(error))
    }
}

impl From<crate::ecs::ComponentError> for AppError {
    fn from(error: crate::ecs::ComponentError) -> Self {
        Self::Engine(Box::new(error.into()))
    }
}
