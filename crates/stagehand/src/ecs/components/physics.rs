//! Physics domain components

use crate::ecs::Component;
use crate::foundation::collections::EntityId;
use crate::frame::FrameContext;
use bitflags::bitflags;

bitflags! {
    /// How a body takes part in the simulation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BodyFlags: u8 {
        /// Reports overlaps but has no physical response
        const TRIGGER = 1 << 0;
        /// Moved by gameplay code, not by forces
        const KINEMATIC = 1 << 1;
        /// Never moves
        const STATIC = 1 << 2;
        /// Affected by world gravity
        const GRAVITY = 1 << 3;
    }
}

/// Physics body attached to an entity
///
/// Carries the body parameters the physics backend reads; the backend owns
/// the actual simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidbodyComponent {
    /// Mass in kilograms; zero means immovable
    pub mass: f32,
    /// Restitution, 0.0 to 1.0
    pub restitution: f32,
    /// Friction coefficient
    pub friction: f32,
    /// Simulation flags
    pub flags: BodyFlags,
    /// Linear velocity requested for the next step
    pub linear_velocity: [f32; 3],
    /// Frames this body was submitted to the simulation
    pub steps: u64,
}

impl Default for RigidbodyComponent {
    fn default() -> Self {
        Self {
            mass: 1.0,
            restitution: 0.0,
            friction: 0.5,
            flags: BodyFlags::GRAVITY,
            linear_velocity: [0.0; 3],
            steps: 0,
        }
    }
}

impl RigidbodyComponent {
    /// Whether the body is a trigger volume
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(BodyFlags::TRIGGER)
    }

    /// Whether the body is kinematic
    pub fn is_kinematic(&self) -> bool {
        self.flags.contains(BodyFlags::KINEMATIC)
    }

    /// Whether the body never moves
    pub fn is_static(&self) -> bool {
        self.flags.contains(BodyFlags::STATIC) || self.mass == 0.0
    }

    /// Toggle a flag
    pub fn set_flag(&mut self, flag: BodyFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    /// Set restitution, clamped to 0.0..=1.0
    pub fn set_restitution(&mut self, restitution: f32) {
        self.restitution = restitution.clamp(0.0, 1.0);
    }
}

impl Component for RigidbodyComponent {
    fn update(&mut self, _entity: EntityId, _frame: &mut FrameContext) {
        if !self.is_static() {
            self.steps += 1;
        }
    }
}
