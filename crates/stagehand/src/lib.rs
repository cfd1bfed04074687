//! # Stagehand
//!
//! A small game-engine composition framework. Components are created and
//! destroyed by one [`Manager`](ecs::Manager) per domain, attach to named
//! entities grouped in a scene, and are driven by an [`Engine`] that brings
//! its subsystems up in a fixed order and runs the frame loop.
//!
//! ## Features
//!
//! - **Domain managers**: Render, Physics, Input and UI, each with a validated
//!   component registry
//! - **Deterministic updates**: fixed manager order and component insertion order
//! - **Subsystem contract**: backends plug in through [`Subsystem`](subsystem::Subsystem);
//!   headless versions ship for every domain
//! - **Scene descriptions**: RON files listing entities and component types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stagehand::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let player = engine.spawn("Player");
//!         engine.add_component(player, ComponentKind::Mesh)?;
//!         engine.add_component(player, ComponentKind::Rigidbody)?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig {
//!         max_frames: Some(60),
//!         ..EngineConfig::default()
//!     };
//!     let mut host = EngineHost::new();
//!     let engine = host.setup_instance_with(config)?;
//!     engine.run(&mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod foundation;
pub mod config;
pub mod subsystem;
pub mod ecs;
pub mod scene;
pub mod assets;
pub mod frame;

mod application;
mod engine;
mod host;

#[cfg(test)]
mod tests;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineBuilder, EngineError, EngineState};
pub use host::EngineHost;
pub use config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineBuilder, EngineConfig, EngineError, EngineHost, EngineState,
        config::Config,
        foundation::{
            collections::{ComponentId, EntityId},
            time::Timer,
        },
        ecs::{Component, ComponentKind, ComponentError, Domain, Entity, Manager},
        frame::FrameContext,
        scene::{Scene, SceneDescription},
        subsystem::{HeadlessSubsystem, Subsystem, SubsystemError},
    };
}
