//! Built-in components
//!
//! One module per domain. [`register_builtin`] registers every built-in
//! kind of a builder's domain.

pub mod render;
pub mod physics;
pub mod input;
pub mod ui;

pub use render::{MeshComponent, CameraComponent, LightComponent, LightType, PlaneComponent};
pub use physics::{RigidbodyComponent, BodyFlags};
pub use input::InputListenerComponent;
pub use ui::{LabelComponent, ButtonComponent};

use super::component::{ComponentKind, Domain};
use super::manager::ManagerBuilder;
use super::registry::RegistryError;

/// Register the built-in constructors for the builder's domain
pub fn register_builtin(builder: ManagerBuilder) -> Result<ManagerBuilder, RegistryError> {
    match builder.domain() {
        Domain::Render => builder
            .register_component(ComponentKind::Mesh, || Box::new(MeshComponent::default()))?
            .register_component(ComponentKind::Camera, || Box::new(CameraComponent::default()))?
            .register_component(ComponentKind::Light, || Box::new(LightComponent::default()))?
            .register_component(ComponentKind::Plane, || Box::new(PlaneComponent::default())),
        Domain::Physics => builder
            .register_component(ComponentKind::Rigidbody, || Box::new(RigidbodyComponent::default())),
        Domain::Input => builder
            .register_component(ComponentKind::InputListener, || Box::new(InputListenerComponent::default())),
        Domain::Ui => builder
            .register_component(ComponentKind::Label, || Box::new(LabelComponent::default()))?
            .register_component(ComponentKind::Button, || Box::new(ButtonComponent::default())),
    }
}
