//! UI domain components

use crate::ecs::Component;

/// Text label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelComponent {
    /// Displayed text
    pub text: String,
    /// Position in normalized screen coordinates
    pub position: [f32; 2],
}

impl Component for LabelComponent {}

/// Clickable button
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonComponent {
    /// Caption
    pub text: String,
    /// Position in normalized screen coordinates
    pub position: [f32; 2],
    /// Size in pixels
    pub size: [f32; 2],
    /// Number of clicks reported by the UI backend
    pub clicks: u32,
}

impl Component for ButtonComponent {}
