//! Component arena
//!
//! Every live component occupies one slot. Managers and entities both hold
//! [`ComponentId`]s into this store; freeing the slot is the single point of
//! destruction, so a stale handle simply stops resolving.

use super::component::{Component, ComponentKind, Domain};
use crate::foundation::collections::{ComponentId, ComponentMap, EntityId};

/// Arena slot for one component
pub(crate) struct ComponentSlot {
    pub(crate) kind: ComponentKind,
    pub(crate) owner: EntityId,
    pub(crate) is_setup: bool,
    pub(crate) behavior: Box<dyn Component>,
}

impl ComponentSlot {
    pub(crate) fn new(kind: ComponentKind, owner: EntityId, behavior: Box<dyn Component>) -> Self {
        Self {
            kind,
            owner,
            is_setup: false,
            behavior,
        }
    }
}

/// Storage for all live components
#[derive(Default)]
pub struct ComponentStore {
    slots: ComponentMap<ComponentSlot>,
}

impl ComponentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no component is alive
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` still refers to a live component
    pub fn contains(&self, id: ComponentId) -> bool {
        self.slots.contains_key(id)
    }

    /// Kind of a live component
    pub fn kind(&self, id: ComponentId) -> Option<ComponentKind> {
        self.slots.get(id).map(|slot| slot.kind)
    }

    /// Domain of a live component
    pub fn domain(&self, id: ComponentId) -> Option<Domain> {
        self.kind(id).map(ComponentKind::domain)
    }

    /// Entity a live component is attached to
    pub fn owner(&self, id: ComponentId) -> Option<EntityId> {
        self.slots.get(id).map(|slot| slot.owner)
    }

    /// Whether `setup` has already run for a live component
    pub fn is_setup(&self, id: ComponentId) -> bool {
        self.slots.get(id).is_some_and(|slot| slot.is_setup)
    }

    /// Borrow a component as its concrete type
    pub fn get<T: Component + 'static>(&self, id: ComponentId) -> Option<&T> {
        let component: &dyn Component = self.slots.get(id)?.behavior.as_ref();
        component.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a component as its concrete type
    pub fn get_mut<T: Component + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        let component: &mut dyn Component = self.slots.get_mut(id)?.behavior.as_mut();
        component.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn insert(&mut self, slot: ComponentSlot) -> ComponentId {
        self.slots.insert(slot)
    }

    pub(crate) fn slot_mut(&mut self, id: ComponentId) -> Option<&mut ComponentSlot> {
        self.slots.get_mut(id)
    }

    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<ComponentSlot> {
        self.slots.remove(id)
    }
}

impl std::fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(id, slot)| (id, (slot.kind, slot.owner))))
            .finish()
    }
}
