//! Entity implementation

use crate::foundation::collections::ComponentId;

/// Named container of components
///
/// The entity only records which components it owns, in attachment order.
/// Components themselves live in the [`ComponentStore`](super::ComponentStore)
/// and are attached and detached by their domain manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    name: String,
    components: Vec<ComponentId>,
}

impl Entity {
    /// Create an empty entity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Entity name; inside a scene this is its unique key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owned components in attachment order
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Whether the entity owns `id`
    pub fn has_component(&self, id: ComponentId) -> bool {
        self.components.contains(&id)
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn attach(&mut self, id: ComponentId) {
        self.components.push(id);
    }

    pub(crate) fn detach(&mut self, id: ComponentId) -> bool {
        match self.components.iter().position(|&owned| owned == id) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }
}
