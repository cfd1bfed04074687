//! Domain managers
//!
//! A [`Manager`] is the only way components of its domain come into or go
//! out of existence. It owns the factory registry, the live list in insertion
//! order and the external subsystem of its domain.

use super::component::{Component, ComponentError, ComponentKind, ComponentTarget, Domain};
use super::registry::{ComponentRegistry, RegistryError};
use super::storage::{ComponentSlot, ComponentStore};
use crate::config::EngineConfig;
use crate::foundation::collections::{ComponentId, EntityId};
use crate::frame::FrameContext;
use crate::scene::Scene;
use crate::subsystem::{Subsystem, SubsystemError};

/// Builds a [`Manager`]; registration is only possible here
pub struct ManagerBuilder {
    registry: ComponentRegistry,
    subsystem: Box<dyn Subsystem>,
}

impl ManagerBuilder {
    /// Domain of the manager being built
    pub fn domain(&self) -> Domain {
        self.registry.domain()
    }

    /// Register a constructor for `kind`
    pub fn register_component<F>(mut self, kind: ComponentKind, constructor: F) -> Result<Self, RegistryError>
    where
        F: Fn() -> Box<dyn Component> + 'static,
    {
        self.registry.register(kind, constructor)?;
        Ok(self)
    }

    /// Finish construction
    pub fn build(self) -> Manager {
        log::debug!(
            "Built {} manager with {} component types",
            self.registry.domain(),
            self.registry.kinds().count()
        );
        Manager {
            domain: self.registry.domain(),
            registry: self.registry,
            components: Vec::new(),
            subsystem: self.subsystem,
            started: false,
        }
    }
}

/// Owner of one domain's components
pub struct Manager {
    domain: Domain,
    registry: ComponentRegistry,
    components: Vec<ComponentId>,
    subsystem: Box<dyn Subsystem>,
    started: bool,
}

impl Manager {
    /// Start building a manager for `domain` around `subsystem`
    pub fn builder(domain: Domain, subsystem: impl Subsystem + 'static) -> ManagerBuilder {
        ManagerBuilder {
            registry: ComponentRegistry::new(domain),
            subsystem: Box::new(subsystem),
        }
    }

    /// Domain served by this manager
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Factory registry
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Live components in insertion order
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Wrapped subsystem
    pub fn subsystem(&self) -> &dyn Subsystem {
        self.subsystem.as_ref()
    }

    /// Whether `start` has run
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Bring up the wrapped subsystem
    pub fn initialize(&mut self, config: &EngineConfig) -> Result<(), SubsystemError> {
        log::info!("Initializing {} manager ({})", self.domain, self.subsystem.name());
        self.subsystem.initialize(config)
    }

    /// Construct a component of `kind` and attach it to `entity`
    pub fn add_component(
        &mut self,
        store: &mut ComponentStore,
        scene: &mut Scene,
        entity: EntityId,
        kind: ComponentKind,
    ) -> Result<ComponentId, ComponentError> {
        if !self.registry.contains(kind) {
            return Err(ComponentError::NotRegistered {
                kind,
                domain: self.domain,
            });
        }
        let owner = scene
            .entity_mut(entity)
            .ok_or(ComponentError::UnknownEntity(entity))?;
        let behavior = self
            .registry
            .create(kind)
            .ok_or(ComponentError::NotRegistered { kind, domain: self.domain })?;

        let id = store.insert(ComponentSlot::new(kind, entity, behavior));
        owner.attach(id);
        self.components.push(id);
        log::debug!("{} manager: added {} to '{}'", self.domain, kind, owner.name());
        Ok(id)
    }

    /// Same as [`add_component`](Self::add_component), taking the type name
    pub fn add_component_by_name(
        &mut self,
        store: &mut ComponentStore,
        scene: &mut Scene,
        entity: EntityId,
        type_name: &str,
    ) -> Result<ComponentId, ComponentError> {
        let kind: ComponentKind = type_name.parse()?;
        self.add_component(store, scene, entity, kind)
    }

    /// Run `setup` once on every owned component, in insertion order
    pub fn start(&mut self, store: &mut ComponentStore) {
        if self.started {
            log::warn!("{} manager started twice", self.domain);
        }
        for &id in &self.components {
            if let Some(slot) = store.slot_mut(id) {
                setup_once(slot);
            }
        }
        self.started = true;
    }

    /// Advance the subsystem, then update every owned component in order
    ///
    /// Components that have not been set up yet are set up first.
    pub fn update(&mut self, store: &mut ComponentStore, frame: &mut FrameContext) -> Result<(), SubsystemError> {
        self.subsystem.advance_frame(frame)?;

        for &id in &self.components {
            if let Some(slot) = store.slot_mut(id) {
                setup_once(slot);
                slot.behavior.update(slot.owner, frame);
            }
        }
        Ok(())
    }

    /// Destroy one component owned by this manager on `entity`
    ///
    /// Nothing changes if no owned component matches.
    pub fn destroy_component(
        &mut self,
        store: &mut ComponentStore,
        scene: &mut Scene,
        entity: EntityId,
        target: impl Into<ComponentTarget>,
    ) -> Result<(), ComponentError> {
        let target = target.into();
        let owner = scene
            .entity_mut(entity)
            .ok_or(ComponentError::UnknownEntity(entity))?;

        let found = owner.components().iter().copied().find(|&id| {
            self.components.contains(&id)
                && match target {
                    ComponentTarget::Id(wanted) => id == wanted,
                    ComponentTarget::Kind(kind) => store.kind(id) == Some(kind),
                }
        });
        let id = found.ok_or(ComponentError::NotFound { entity, target })?;

        owner.detach(id);
        self.components.retain(|&owned| owned != id);
        if let Some(mut slot) = store.remove(id) {
            slot.behavior.teardown(entity);
            log::debug!("{} manager: destroyed {} on '{}'", self.domain, slot.kind, owner.name());
        }
        Ok(())
    }

    /// Destroy every component this manager owns
    pub fn destroy_all_components(&mut self, store: &mut ComponentStore, scene: &mut Scene) {
        let count = self.components.len();
        for id in std::mem::take(&mut self.components) {
            let Some(mut slot) = store.remove(id) else {
                continue;
            };
            if let Some(owner) = scene.entity_mut(slot.owner) {
                owner.detach(id);
            }
            slot.behavior.teardown(slot.owner);
        }
        if count > 0 {
            log::debug!("{} manager: destroyed {} components", self.domain, count);
        }
    }

    /// Destroy all components, then shut the subsystem down
    pub fn teardown(&mut self, store: &mut ComponentStore, scene: &mut Scene) {
        self.destroy_all_components(store, scene);
        if self.subsystem.is_initialized() {
            log::info!("Tearing down {} manager", self.domain);
            self.subsystem.teardown();
        }
        self.started = false;
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("domain", &self.domain)
            .field("registry", &self.registry)
            .field("components", &self.components.len())
            .field("subsystem", &self.subsystem.name())
            .field("started", &self.started)
            .finish()
    }
}

fn setup_once(slot: &mut ComponentSlot) {
    if !slot.is_setup {
        slot.behavior.setup(slot.owner);
        slot.is_setup = true;
    }
}

/// Managers in their fixed initialization and update order
///
/// Holds at most one manager per domain.
#[derive(Debug, Default)]
pub struct ManagerSet {
    managers: Vec<Manager>,
}

impl ManagerSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a manager; its position is its place in the order
    pub fn push(&mut self, manager: Manager) -> Result<(), RegistryError> {
        if self.get(manager.domain()).is_some() {
            return Err(RegistryError::DuplicateManager(manager.domain()));
        }
        self.managers.push(manager);
        Ok(())
    }

    /// Manager for `domain`
    pub fn get(&self, domain: Domain) -> Option<&Manager> {
        self.managers.iter().find(|manager| manager.domain() == domain)
    }

    /// Mutable manager for `domain`
    pub fn get_mut(&mut self, domain: Domain) -> Option<&mut Manager> {
        self.managers.iter_mut().find(|manager| manager.domain() == domain)
    }

    /// Domains in order
    pub fn domains(&self) -> Vec<Domain> {
        self.managers.iter().map(Manager::domain).collect()
    }

    /// Number of managers
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    /// Managers in order
    pub fn iter(&self) -> std::slice::Iter<'_, Manager> {
        self.managers.iter()
    }

    /// Managers in order, mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Manager> {
        self.managers.iter_mut()
    }

    /// Add a component through the manager that owns `kind`
    pub fn add_component(
        &mut self,
        store: &mut ComponentStore,
        scene: &mut Scene,
        entity: EntityId,
        kind: ComponentKind,
    ) -> Result<ComponentId, ComponentError> {
        self.get_mut(kind.domain())
            .ok_or(ComponentError::NoManager(kind.domain()))?
            .add_component(store, scene, entity, kind)
    }

    /// Destroy a component through whichever manager owns it
    pub fn destroy_component(
        &mut self,
        store: &mut ComponentStore,
        scene: &mut Scene,
        entity: EntityId,
        id: ComponentId,
    ) -> Result<(), ComponentError> {
        let not_found = ComponentError::NotFound {
            entity,
            target: ComponentTarget::Id(id),
        };
        let domain = store.domain(id).ok_or_else(|| not_found.clone())?;
        self.get_mut(domain)
            .ok_or(not_found)?
            .destroy_component(store, scene, entity, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::subsystem::HeadlessSubsystem;
    use std::cell::RefCell;
    use std::rc::Rc;

    type CallLog = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        log: CallLog,
    }

    impl Component for Recorder {
        fn setup(&mut self, _entity: EntityId) {
            self.log.borrow_mut().push(format!("{}:setup", self.label));
        }

        fn update(&mut self, _entity: EntityId, frame: &mut FrameContext) {
            self.log.borrow_mut().push(format!("{}:update:{}", self.label, frame.frame()));
        }

        fn teardown(&mut self, _entity: EntityId) {
            self.log.borrow_mut().push(format!("{}:teardown", self.label));
        }
    }

    fn render_manager(log: &CallLog) -> Manager {
        let mesh_log = log.clone();
        let camera_log = log.clone();
        let mut manager = Manager::builder(Domain::Render, HeadlessSubsystem::new("render"))
            .register_component(ComponentKind::Mesh, move || {
                Box::new(Recorder { label: "mesh", log: mesh_log.clone() })
            })
            .unwrap()
            .register_component(ComponentKind::Camera, move || {
                Box::new(Recorder { label: "camera", log: camera_log.clone() })
            })
            .unwrap()
            .build();
        manager.initialize(&EngineConfig::default()).unwrap();
        manager
    }

    #[test]
    fn test_add_registered_component() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");

        let id = manager
            .add_component(&mut store, &mut scene, player, ComponentKind::Mesh)
            .unwrap();

        assert_eq!(store.domain(id), Some(Domain::Render));
        assert_eq!(store.owner(id), Some(player));
        assert_eq!(manager.components(), &[id]);
        assert_eq!(scene.entity(player).unwrap().components(), &[id]);
    }

    #[test]
    fn test_add_unregistered_component_creates_nothing() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");

        for kind in [ComponentKind::Light, ComponentKind::Rigidbody] {
            let err = manager
                .add_component(&mut store, &mut scene, player, kind)
                .unwrap_err();
            assert_eq!(err, ComponentError::NotRegistered { kind, domain: Domain::Render });
            assert!(err.to_string().contains(kind.name()));
        }

        let err = manager
            .add_component_by_name(&mut store, &mut scene, player, "Teapot")
            .unwrap_err();
        assert_eq!(err, ComponentError::UnknownType("Teapot".to_string()));

        assert!(store.is_empty());
        assert!(manager.components().is_empty());
        assert!(scene.entity(player).unwrap().components().is_empty());
    }

    #[test]
    fn test_add_to_missing_entity() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let ghost = scene.spawn("Ghost");
        let mut managers = ManagerSet::new();
        scene.remove_entity("Ghost", &mut store, &mut managers).unwrap();

        let err = manager
            .add_component(&mut store, &mut scene, ghost, ComponentKind::Mesh)
            .unwrap_err();
        assert_eq!(err, ComponentError::UnknownEntity(ghost));
        assert!(store.is_empty());
    }

    #[test]
    fn test_setup_runs_once_before_first_update() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");
        manager
            .add_component_by_name(&mut store, &mut scene, player, "Mesh")
            .unwrap();

        manager.start(&mut store);
        manager.update(&mut store, &mut FrameContext::new(1, 0.0)).unwrap();
        manager.update(&mut store, &mut FrameContext::new(2, 0.0)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["mesh:setup", "mesh:update:1", "mesh:update:2"]
        );
    }

    #[test]
    fn test_late_component_is_set_up_lazily() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");

        manager.start(&mut store);
        let id = manager
            .add_component(&mut store, &mut scene, player, ComponentKind::Camera)
            .unwrap();
        assert!(!store.is_setup(id));

        manager.update(&mut store, &mut FrameContext::new(1, 0.0)).unwrap();
        assert!(store.is_setup(id));
        assert_eq!(*log.borrow(), vec!["camera:setup", "camera:update:1"]);
    }

    #[test]
    fn test_update_follows_insertion_order() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let a = scene.spawn("A");
        let b = scene.spawn("B");
        manager.add_component(&mut store, &mut scene, b, ComponentKind::Camera).unwrap();
        manager.add_component(&mut store, &mut scene, a, ComponentKind::Mesh).unwrap();
        manager.start(&mut store);
        log.borrow_mut().clear();

        manager.update(&mut store, &mut FrameContext::new(7, 0.0)).unwrap();
        assert_eq!(*log.borrow(), vec!["camera:update:7", "mesh:update:7"]);
    }

    #[test]
    fn test_update_fails_when_subsystem_fails() {
        let log = CallLog::default();
        let mut manager = Manager::builder(Domain::Render, HeadlessSubsystem::new("render"))
            .register_component(ComponentKind::Mesh, {
                let log = log.clone();
                move || Box::new(Recorder { label: "mesh", log: log.clone() })
            })
            .unwrap()
            .build();
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");
        manager.add_component(&mut store, &mut scene, player, ComponentKind::Mesh).unwrap();

        // never initialized
        let err = manager.update(&mut store, &mut FrameContext::new(1, 0.0)).unwrap_err();
        assert!(matches!(err, SubsystemError::NotInitialized));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_destroy_component_by_kind_and_id() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");
        let mesh = manager.add_component(&mut store, &mut scene, player, ComponentKind::Mesh).unwrap();
        let camera = manager.add_component(&mut store, &mut scene, player, ComponentKind::Camera).unwrap();

        manager
            .destroy_component(&mut store, &mut scene, player, ComponentKind::Mesh)
            .unwrap();
        assert!(!store.contains(mesh));
        assert_eq!(manager.components(), &[camera]);
        assert_eq!(scene.entity(player).unwrap().components(), &[camera]);

        manager.destroy_component(&mut store, &mut scene, player, camera).unwrap();
        assert!(store.is_empty());
        assert!(scene.entity(player).unwrap().components().is_empty());
        assert_eq!(*log.borrow(), vec!["mesh:teardown", "camera:teardown"]);
    }

    #[test]
    fn test_destroy_foreign_component_changes_nothing() {
        let log = CallLog::default();
        let mut render = render_manager(&log);
        let mut other = Manager::builder(Domain::Render, HeadlessSubsystem::new("other")).build();
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.spawn("Player");
        let enemy = scene.spawn("Enemy");
        let mesh = render.add_component(&mut store, &mut scene, player, ComponentKind::Mesh).unwrap();

        // not owned by `other`
        let err = other
            .destroy_component(&mut store, &mut scene, player, mesh)
            .unwrap_err();
        assert_eq!(err, ComponentError::NotFound { entity: player, target: ComponentTarget::Id(mesh) });

        // owned by `render`, but not attached to `enemy`
        let err = render
            .destroy_component(&mut store, &mut scene, enemy, mesh)
            .unwrap_err();
        assert!(matches!(err, ComponentError::NotFound { .. }));

        // no camera anywhere
        assert!(render
            .destroy_component(&mut store, &mut scene, player, ComponentKind::Camera)
            .is_err());

        assert_eq!(render.components(), &[mesh]);
        assert_eq!(scene.entity(player).unwrap().components(), &[mesh]);
        assert!(scene.entity(enemy).unwrap().components().is_empty());
        assert!(store.contains(mesh));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_destroy_all_components_empties_both_sides() {
        let log = CallLog::default();
        let mut manager = render_manager(&log);
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let a = scene.spawn("A");
        let b = scene.spawn("B");
        manager.add_component(&mut store, &mut scene, a, ComponentKind::Mesh).unwrap();
        manager.add_component(&mut store, &mut scene, b, ComponentKind::Mesh).unwrap();
        manager.add_component(&mut store, &mut scene, b, ComponentKind::Camera).unwrap();

        manager.destroy_all_components(&mut store, &mut scene);

        assert!(manager.components().is_empty());
        assert!(store.is_empty());
        for id in [a, b] {
            assert!(scene.entity(id).unwrap().components().is_empty());
        }
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_manager_set_rejects_second_manager_for_domain() {
        let mut managers = ManagerSet::new();
        managers
            .push(Manager::builder(Domain::Physics, HeadlessSubsystem::new("a")).build())
            .unwrap();
        let err = managers
            .push(Manager::builder(Domain::Physics, HeadlessSubsystem::new("b")).build())
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateManager(Domain::Physics));
        assert_eq!(managers.len(), 1);
        assert_eq!(managers.get(Domain::Physics).unwrap().subsystem().name(), "a");
    }

    #[test]
    fn test_manager_set_routes_by_domain() {
        let log = CallLog::default();
        let mut managers = ManagerSet::new();
        managers.push(render_manager(&log)).unwrap();
        let mut store = ComponentStore::new();
        let mut scene = Scene::new("test");
        let player = scene.add_entity("Player", Entity::default());

        let mesh = managers
            .add_component(&mut store, &mut scene, player, ComponentKind::Mesh)
            .unwrap();
        let err = managers
            .add_component(&mut store, &mut scene, player, ComponentKind::Label)
            .unwrap_err();
        assert_eq!(err, ComponentError::NoManager(Domain::Ui));

        managers.destroy_component(&mut store, &mut scene, player, mesh).unwrap();
        assert!(store.is_empty());
    }
}
