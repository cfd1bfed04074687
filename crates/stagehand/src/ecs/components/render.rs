//! Render domain components
//!
//! These hold what a rendering backend needs to know about an entity. The
//! backend itself reads them; nothing here draws.

use crate::ecs::Component;
use crate::foundation::collections::EntityId;
use crate::frame::FrameContext;

/// Mesh attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    /// Mesh resource name
    pub mesh: String,
    /// Material resource name
    pub material: String,
    /// Whether the mesh is drawn
    pub visible: bool,
    /// Frames in which the mesh was visible
    pub frames_visible: u64,
    ready: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            mesh: String::new(),
            material: "default".to_string(),
            visible: true,
            frames_visible: 0,
            ready: false,
        }
    }
}

impl MeshComponent {
    /// Whether setup has run
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Component for MeshComponent {
    fn setup(&mut self, _entity: EntityId) {
        self.ready = true;
    }

    fn update(&mut self, _entity: EntityId, _frame: &mut FrameContext) {
        if self.visible {
            self.frames_visible += 1;
        }
    }

    fn teardown(&mut self, _entity: EntityId) {
        self.ready = false;
    }
}

/// Camera attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Whether this camera renders
    pub active: bool,
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            active: true,
        }
    }
}

impl Component for CameraComponent {
    fn setup(&mut self, entity: EntityId) {
        if self.near >= self.far {
            log::warn!("Camera on {entity:?}: near plane {} is not before far plane {}", self.near, self.far);
        }
    }
}

/// Kinds of light sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightType {
    /// Parallel rays, like sunlight
    #[default]
    Directional,
    /// Radiates from a position
    Point,
    /// Cone from a position
    Spot,
}

/// Light source attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct LightComponent {
    /// Light type
    pub light_type: LightType,
    /// RGB color, 0.0 to 1.0
    pub color: [f32; 3],
    /// Intensity multiplier
    pub intensity: f32,
    /// Whether the light contributes
    pub enabled: bool,
}

impl Default for LightComponent {
    fn default() -> Self {
        Self {
            light_type: LightType::default(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            enabled: true,
        }
    }
}

impl Component for LightComponent {}

/// Flat plane attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneComponent {
    /// Width in world units
    pub width: f32,
    /// Height in world units
    pub height: f32,
    /// Material resource name
    pub material: String,
}

impl Default for PlaneComponent {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            material: "default".to_string(),
        }
    }
}

impl Component for PlaneComponent {}
