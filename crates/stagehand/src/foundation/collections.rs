//! Arena handles and storage aliases
//!
//! Entities and components live in slot maps. Everything else refers to them
//! through these keys, so removing a slot invalidates every copy of the
//! handle at once. Entity handles also carry the id of the scene that issued
//! them, so a handle never resolves in any other scene.

pub use slotmap::SlotMap;

use std::sync::atomic::{AtomicU64, Ordering};

slotmap::new_key_type! {
    /// Slot of an entity inside one scene's arena
    pub struct EntityKey;

    /// Stable handle to a component inside the [`ComponentStore`](crate::ecs::ComponentStore)
    pub struct ComponentId;
}

/// Identity of one [`Scene`](crate::scene::Scene) instance
///
/// Zero is never issued, so a default handle resolves nowhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

impl SceneId {
    /// Issue a process-unique scene id
    pub fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable handle to an entity inside a [`Scene`](crate::scene::Scene)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    scene: SceneId,
    key: EntityKey,
}

impl EntityId {
    /// Combine a scene id with a slot key
    pub fn new(scene: SceneId, key: EntityKey) -> Self {
        Self { scene, key }
    }

    /// Scene that issued the handle
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Slot inside that scene's arena
    pub fn key(&self) -> EntityKey {
        self.key
    }
}

/// Entity arena of one scene
pub type EntityMap<T> = SlotMap<EntityKey, T>;

/// Component arena
pub type ComponentMap<T> = SlotMap<ComponentId, T>;
