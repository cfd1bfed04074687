//! Components, entities and the managers that own them
//!
//! Components live in the [`ComponentStore`] arena. Entities and managers
//! hold [`ComponentId`]s into it, and only a [`Manager`] creates or destroys
//! them.

pub mod component;
pub mod entity;
pub mod storage;
pub mod registry;
pub mod manager;
pub mod components;

pub use component::{Component, ComponentKind, ComponentTarget, ComponentError, Domain};
pub use entity::Entity;
pub use storage::ComponentStore;
pub use registry::{ComponentRegistry, ComponentConstructor, RegistryError};
pub use manager::{Manager, ManagerBuilder, ManagerSet};
pub use crate::foundation::collections::{ComponentId, EntityId};
