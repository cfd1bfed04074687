//! Component trait, component kinds and component errors

use crate::foundation::collections::{ComponentId, EntityId};
use crate::frame::FrameContext;
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subsystem category served by exactly one manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    /// Rendering
    Render,
    /// Physics simulation
    Physics,
    /// Input handling
    Input,
    /// User interface
    Ui,
}

impl Domain {
    /// All domains in their default update order
    pub const ALL: [Domain; 4] = [Domain::Render, Domain::Physics, Domain::Input, Domain::Ui];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Render => "render",
            Self::Physics => "physics",
            Self::Input => "input",
            Self::Ui => "ui",
        };
        f.write_str(name)
    }
}

/// Every kind of component a manager can construct
///
/// Each kind belongs to exactly one [`Domain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Renderable mesh
    Mesh,
    /// Scene camera
    Camera,
    /// Light source
    Light,
    /// Flat textured plane
    Plane,
    /// Physics body
    Rigidbody,
    /// Receives input for its entity
    InputListener,
    /// Text label
    Label,
    /// Clickable button
    Button,
}

impl ComponentKind {
    /// All kinds, grouped by domain
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Mesh,
        ComponentKind::Camera,
        ComponentKind::Light,
        ComponentKind::Plane,
        ComponentKind::Rigidbody,
        ComponentKind::InputListener,
        ComponentKind::Label,
        ComponentKind::Button,
    ];

    /// Domain whose manager owns components of this kind
    pub fn domain(self) -> Domain {
        match self {
            Self::Mesh | Self::Camera | Self::Light | Self::Plane => Domain::Render,
            Self::Rigidbody => Domain::Physics,
            Self::InputListener => Domain::Input,
            Self::Label | Self::Button => Domain::Ui,
        }
    }

    /// Type name used in scene descriptions
    pub fn name(self) -> &'static str {
        match self {
            Self::Mesh => "Mesh",
            Self::Camera => "Camera",
            Self::Light => "Light",
            Self::Plane => "Plane",
            Self::Rigidbody => "Rigidbody",
            Self::InputListener => "InputListener",
            Self::Label => "Label",
            Self::Button => "Button",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ComponentError::UnknownType(s.to_string()))
    }
}

/// Downcasting support for boxed components
pub trait AsAny {
    /// Borrow as `Any`
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to an entity and driven by its domain manager
///
/// All hooks default to doing nothing.
pub trait Component: AsAny {
    /// Called once before the first `update`
    fn setup(&mut self, _entity: EntityId) {}

    /// Called once per frame, in the manager's insertion order
    fn update(&mut self, _entity: EntityId, _frame: &mut FrameContext) {}

    /// Called right before the component is released
    fn teardown(&mut self, _entity: EntityId) {}
}

/// Selects a component on an entity, by handle or by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentTarget {
    /// Exactly this component
    Id(ComponentId),
    /// The first component of this kind, in attachment order
    Kind(ComponentKind),
}

impl From<ComponentId> for ComponentTarget {
    fn from(id: ComponentId) -> Self {
        Self::Id(id)
    }
}

impl From<ComponentKind> for ComponentTarget {
    fn from(kind: ComponentKind) -> Self {
        Self::Kind(kind)
    }
}

impl fmt::Display for ComponentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id:?}"),
            Self::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

/// Recoverable component errors
///
/// None of these leave partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The type name does not name any component kind
    #[error("unknown component type '{0}'")]
    UnknownType(String),

    /// The manager has no constructor for this kind
    #[error("component type '{kind}' is not registered with the {domain} manager")]
    NotRegistered {
        /// Requested kind
        kind: ComponentKind,
        /// Domain of the manager that was asked
        domain: Domain,
    },

    /// No manager serves the kind's domain
    #[error("no manager for domain {0}")]
    NoManager(Domain),

    /// The entity handle does not resolve in the scene
    #[error("entity {0:?} does not exist")]
    UnknownEntity(EntityId),

    /// No matching component owned by this manager on the entity
    #[error("component {target} not found on entity {entity:?}")]
    NotFound {
        /// Entity that was searched
        entity: EntityId,
        /// What was looked for
        target: ComponentTarget,
    },
}
