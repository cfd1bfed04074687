//! Input domain components

use crate::ecs::Component;
use crate::foundation::collections::EntityId;
use crate::frame::FrameContext;

/// Marks an entity as a receiver of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputListenerComponent {
    /// Whether input is currently routed to the entity
    pub enabled: bool,
    /// Optional action that asks the engine to quit when triggered
    pub quit_on_trigger: bool,
    /// Set by the input backend when the bound action fired this frame
    pub triggered: bool,
    /// Frames the listener was polled
    pub frames_polled: u64,
}

impl Default for InputListenerComponent {
    fn default() -> Self {
        Self {
            enabled: true,
            quit_on_trigger: false,
            triggered: false,
            frames_polled: 0,
        }
    }
}

impl Component for InputListenerComponent {
    fn update(&mut self, _entity: EntityId, frame: &mut FrameContext) {
        if !self.enabled {
            return;
        }
        self.frames_polled += 1;
        if self.triggered && self.quit_on_trigger {
            frame.request_quit();
        }
        self.triggered = false;
    }
}
