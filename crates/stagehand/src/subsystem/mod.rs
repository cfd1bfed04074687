//! External subsystem contract
//!
//! Every collaborator the engine drives but does not implement (render
//! context, physics world, GUI system, input decoder) sits behind
//! [`Subsystem`]. The engine only ever calls these three lifecycle hooks.

pub mod headless;

pub use headless::HeadlessSubsystem;

use crate::config::EngineConfig;
use crate::ecs::Domain;
use crate::frame::FrameContext;
use std::fmt;
use thiserror::Error;

/// Lifecycle contract for an external subsystem
///
/// Single-threaded: implementations are not required to be `Send` or `Sync`.
pub trait Subsystem {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Establish the subsystem. Failure is fatal to engine initialization.
    fn initialize(&mut self, config: &EngineConfig) -> Result<(), SubsystemError>;

    /// Advance by one tick. Failure is fatal to the run loop.
    fn advance_frame(&mut self, frame: &FrameContext) -> Result<(), SubsystemError>;

    /// Release everything created by `initialize`
    fn teardown(&mut self);

    /// Whether `initialize` succeeded and `teardown` has not run since
    fn is_initialized(&self) -> bool;
}

/// Subsystem failures
#[derive(Error, Debug)]
pub enum SubsystemError {
    /// The subsystem was used before `initialize`
    #[error("subsystem is not initialized")]
    NotInitialized,

    /// IO error while establishing the subsystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend specific failure
    #[error("{0}")]
    Failed(String),
}

/// Identifies one step of the engine's fixed initialization order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubsystemId {
    /// The rendering context, brought up before anything else
    RenderContext,
    /// The resource manager
    Resources,
    /// The scene manager
    Scenes,
    /// A domain manager
    Manager(Domain),
}

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RenderContext => write!(f, "render context"),
            Self::Resources => write!(f, "resource manager"),
            Self::Scenes => write!(f, "scene manager"),
            Self::Manager(domain) => write!(f, "{domain} manager"),
        }
    }
}
