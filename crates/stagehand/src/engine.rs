//! Core engine implementation

use crate::{
    application::{AppError, Application},
    assets::ResourceManager,
    config::{ConfigError, EngineConfig},
    ecs::{
        components::register_builtin, Component, ComponentError, ComponentKind, ComponentStore,
        ComponentTarget, Domain, Manager, ManagerSet, RegistryError,
    },
    foundation::{
        collections::{ComponentId, EntityId},
        time::Timer,
    },
    frame::FrameContext,
    scene::{Scene, SceneDescription, SceneManager},
    subsystem::{HeadlessSubsystem, Subsystem, SubsystemError, SubsystemId},
};
use std::fmt;
use thiserror::Error;

/// Lifecycle state of an [`Engine`]
///
/// Transitions only move forward:
/// `Uninitialized -> Initialized -> Running -> CleanedUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, nothing brought up yet
    Uninitialized,
    /// Every subsystem is initialized
    Initialized,
    /// Inside the run loop
    Running,
    /// Subsystems have been torn down
    CleanedUp,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::CleanedUp => "cleaned up",
        };
        f.write_str(name)
    }
}

impl EngineState {
    /// Whether subsystems are up and need a `clean`
    pub fn is_live(self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }
}

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the main loop. It owns
/// the render context, the resource manager, the scene manager, the domain
/// managers in their fixed order and the arena every component lives in.
pub struct Engine {
    config: EngineConfig,
    state: EngineState,

    /// Whether the run loop should keep going
    running: bool,

    render_context: Box<dyn Subsystem>,
    resources: ResourceManager,
    scenes: SceneManager,
    managers: ManagerSet,
    components: ComponentStore,

    /// Frame timing
    timer: Timer,
}

impl Engine {
    /// Start building an engine with custom subsystems
    pub fn builder(config: EngineConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    /// Create an engine with headless subsystems and the built-in components
    /// registered for every domain
    pub fn headless(config: EngineConfig) -> Result<Self, EngineError> {
        let mut builder = Self::builder(config).render_context(HeadlessSubsystem::new("render context"));
        for domain in Domain::ALL {
            let manager = register_builtin(Manager::builder(domain, HeadlessSubsystem::new(domain.to_string())))?;
            builder = builder.manager(manager.build());
        }
        builder.build()
    }

    /// Application name
    pub fn app_name(&self) -> &str {
        &self.config.app_name
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether the run loop will start another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The render context subsystem
    pub fn render_context(&self) -> &dyn Subsystem {
        self.render_context.as_ref()
    }

    /// Resource manager
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    /// Domain managers in order
    pub fn managers(&self) -> &ManagerSet {
        &self.managers
    }

    /// Manager of `domain`
    pub fn manager(&self, domain: Domain) -> Option<&Manager> {
        self.managers.get(domain)
    }

    /// Component arena
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    /// Downcast a component to its concrete type
    pub fn component<T: Component + 'static>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)
    }

    /// Mutable access to a component's concrete type
    pub fn component_mut<T: Component + 'static>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)
    }

    /// The active scene
    pub fn scene(&self) -> &Scene {
        self.scenes.active()
    }

    /// The active scene, mutably
    ///
    /// Adding plain entities is fine; components must go through
    /// [`add_component`](Self::add_component).
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scenes.active_mut()
    }

    /// Create an empty entity in the active scene
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        self.scenes.active_mut().spawn(name)
    }

    /// Attach a new component of `kind` to `entity` through the owning manager
    pub fn add_component(&mut self, entity: EntityId, kind: ComponentKind) -> Result<ComponentId, ComponentError> {
        self.managers
            .add_component(&mut self.components, self.scenes.active_mut(), entity, kind)
    }

    /// Same as [`add_component`](Self::add_component), taking the type name
    pub fn add_component_by_name(&mut self, entity: EntityId, type_name: &str) -> Result<ComponentId, ComponentError> {
        let kind: ComponentKind = type_name.parse()?;
        self.add_component(entity, kind)
    }

    /// Destroy a component on `entity`, by handle or by kind
    pub fn destroy_component(
        &mut self,
        entity: EntityId,
        target: impl Into<ComponentTarget>,
    ) -> Result<(), ComponentError> {
        let scene = self.scenes.active_mut();
        match target.into() {
            ComponentTarget::Id(id) => self.managers.destroy_component(&mut self.components, scene, entity, id),
            ComponentTarget::Kind(kind) => self
                .managers
                .get_mut(kind.domain())
                .ok_or(ComponentError::NoManager(kind.domain()))?
                .destroy_component(&mut self.components, scene, entity, kind),
        }
    }

    /// Remove an entity from the active scene, destroying its components
    pub fn remove_entity(&mut self, name: &str) -> bool {
        self.scenes
            .active_mut()
            .remove_entity(name, &mut self.components, &mut self.managers)
            .is_some()
    }

    /// Replace the active scene with one built from `description`
    ///
    /// On failure the partially built scene is cleaned and the active scene
    /// is left as it was.
    pub fn load_scene(&mut self, description: &SceneDescription) -> Result<(), EngineError> {
        let mut scene = Scene::new(description.name.clone());
        for entity in &description.entities {
            let id = scene.spawn(entity.name.clone());
            for type_name in &entity.components {
                let added = type_name
                    .parse::<ComponentKind>()
                    .and_then(|kind| self.managers.add_component(&mut self.components, &mut scene, id, kind));
                if let Err(err) = added {
                    log::error!("Failed to load scene '{}': {err}", description.name);
                    scene.clean(&mut self.components, &mut self.managers);
                    return Err(err.into());
                }
            }
        }
        self.change_scene(scene);
        Ok(())
    }

    /// Make `scene` active, cleaning the previous one
    pub fn change_scene(&mut self, scene: Scene) {
        let mut previous = self.scenes.replace(scene);
        previous.clean(&mut self.components, &mut self.managers);
    }

    /// Bring every subsystem up in the fixed order
    ///
    /// Render context, resource manager, scene manager, then the domain
    /// managers. The first failure stops the sequence; whatever was already
    /// initialized is torn down again in reverse.
    pub fn init(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Uninitialized => {}
            EngineState::Initialized | EngineState::Running => {
                log::warn!("Engine '{}' is already initialized", self.config.app_name);
                return Err(EngineError::DuplicateInstance(self.config.app_name.clone()));
            }
            EngineState::CleanedUp => {
                return Err(EngineError::InvalidState {
                    state: self.state,
                    operation: "init",
                })
            }
        }

        log::info!("Initializing engine '{}'...", self.config.app_name);
        let mut initialized = Vec::new();
        for subsystem in self.init_order() {
            if let Err(source) = self.initialize_step(subsystem) {
                log::error!("Failed to initialize {subsystem}: {source}");
                for &done in initialized.iter().rev() {
                    self.teardown_step(done);
                }
                return Err(EngineError::SubsystemInit { subsystem, source });
            }
            initialized.push(subsystem);
        }

        self.timer = match self.config.fixed_timestep {
            Some(step) => Timer::fixed(step),
            None => Timer::new(),
        };
        self.state = EngineState::Initialized;
        log::info!("Engine '{}' initialized", self.config.app_name);
        Ok(())
    }

    /// Set up every component currently owned by each manager
    pub fn start(&mut self) {
        for manager in self.managers.iter_mut() {
            manager.start(&mut self.components);
        }
    }

    /// Advance the render context, then every manager in order
    pub fn update(&mut self) -> Result<(), EngineError> {
        self.tick().map(|_| ())
    }

    /// Run the engine main loop with the given application
    ///
    /// Initializes the engine if needed, lets the application populate the
    /// scene, starts the managers and updates until the running flag drops.
    /// The engine is cleaned up on the way out, also after a fatal error.
    pub fn run(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        match self.state {
            EngineState::Uninitialized => self.init()?,
            EngineState::Initialized => {}
            state => {
                return Err(EngineError::InvalidState {
                    state,
                    operation: "run",
                })
            }
        }

        // A quit() inside the initialize hook clears this again
        self.running = true;
        if let Err(err) = app.initialize(self) {
            log::error!("Application initialization failed: {err}");
            self.running = false;
            if self.state.is_live() {
                self.clean()?;
            }
            return Err(err.into());
        }

        let result = if self.state.is_live() {
            self.start();
            self.state = EngineState::Running;
            self.timer.reset();
            log::info!("Starting main loop...");
            self.main_loop(app)
        } else {
            Ok(())
        };
        self.running = false;
        match &result {
            Ok(()) => log::info!("Main loop finished after {} frames", self.frame_count()),
            Err(err) => log::error!("Main loop aborted: {err}"),
        }

        app.cleanup(self);
        if self.state.is_live() {
            self.clean()?;
        }
        result
    }

    fn main_loop(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        while self.running {
            if self.config.max_frames.is_some_and(|max| self.frame_count() >= max) {
                log::info!("Reached frame limit");
                break;
            }
            let frame = self.tick()?;
            app.update(self, &frame)?;
        }
        Ok(())
    }

    /// Request shutdown; the current frame finishes first
    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }

    /// Clean the active scene and tear every subsystem down in reverse order
    pub fn clean(&mut self) -> Result<(), EngineError> {
        if !self.state.is_live() {
            return Err(EngineError::InvalidState {
                state: self.state,
                operation: "clean",
            });
        }

        log::info!("Cleaning up engine '{}'...", self.config.app_name);
        self.scenes
            .active_mut()
            .clean(&mut self.components, &mut self.managers);
        for subsystem in self.init_order().into_iter().rev() {
            self.teardown_step(subsystem);
        }
        self.running = false;
        self.state = EngineState::CleanedUp;
        Ok(())
    }

    fn tick(&mut self) -> Result<FrameContext, EngineError> {
        if !self.state.is_live() {
            return Err(EngineError::InvalidState {
                state: self.state,
                operation: "update",
            });
        }

        self.timer.update();
        let mut frame = FrameContext::new(self.timer.frame_count(), self.timer.delta_time());

        self.render_context
            .advance_frame(&frame)
            .map_err(|source| EngineError::FrameAdvance {
                subsystem: SubsystemId::RenderContext,
                source,
            })?;
        for manager in self.managers.iter_mut() {
            let domain = manager.domain();
            manager
                .update(&mut self.components, &mut frame)
                .map_err(|source| EngineError::FrameAdvance {
                    subsystem: SubsystemId::Manager(domain),
                    source,
                })?;
        }

        if frame.quit_requested() {
            log::info!("Quit requested during frame {}", frame.frame());
            self.running = false;
        }
        Ok(frame)
    }

    fn init_order(&self) -> Vec<SubsystemId> {
        [SubsystemId::RenderContext, SubsystemId::Resources, SubsystemId::Scenes]
            .into_iter()
            .chain(self.managers.domains().into_iter().map(SubsystemId::Manager))
            .collect()
    }

    fn initialize_step(&mut self, subsystem: SubsystemId) -> Result<(), SubsystemError> {
        match subsystem {
            SubsystemId::RenderContext => self.render_context.initialize(&self.config),
            SubsystemId::Resources => self.resources.initialize(&self.config),
            SubsystemId::Scenes => self.scenes.initialize(&self.config),
            SubsystemId::Manager(domain) => match self.managers.get_mut(domain) {
                Some(manager) => manager.initialize(&self.config),
                None => Ok(()),
            },
        }
    }

    fn teardown_step(&mut self, subsystem: SubsystemId) {
        match subsystem {
            SubsystemId::RenderContext => self.render_context.teardown(),
            SubsystemId::Resources => self.resources.teardown(),
            SubsystemId::Scenes => self.scenes.teardown(),
            SubsystemId::Manager(domain) => {
                if let Some(manager) = self.managers.get_mut(domain) {
                    manager.teardown(&mut self.components, self.scenes.active_mut());
                }
            }
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("app_name", &self.config.app_name)
            .field("state", &self.state)
            .field("running", &self.running)
            .field("render_context", &self.render_context.name())
            .field("managers", &self.managers)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

/// Assembles an [`Engine`] from its subsystems
pub struct EngineBuilder {
    config: EngineConfig,
    render_context: Option<Box<dyn Subsystem>>,
    managers: Vec<Manager>,
}

impl EngineBuilder {
    /// Create a builder for `config`
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            render_context: None,
            managers: Vec::new(),
        }
    }

    /// Use `subsystem` as the render context
    pub fn render_context(mut self, subsystem: impl Subsystem + 'static) -> Self {
        self.render_context = Some(Box::new(subsystem));
        self
    }

    /// Append a domain manager; managers initialize and update in the order added
    pub fn manager(mut self, manager: Manager) -> Self {
        self.managers.push(manager);
        self
    }

    /// Finish the engine
    ///
    /// Fails if two managers share a domain. Without an explicit render
    /// context a headless one is used.
    pub fn build(self) -> Result<Engine, EngineError> {
        let mut managers = ManagerSet::new();
        for manager in self.managers {
            managers.push(manager)?;
        }
        let render_context = self
            .render_context
            .unwrap_or_else(|| Box::new(HeadlessSubsystem::new("render context")));

        log::debug!(
            "Built engine '{}' with managers {:?}",
            self.config.app_name,
            managers.domains()
        );
        Ok(Engine {
            config: self.config,
            state: EngineState::Uninitialized,
            running: false,
            render_context,
            resources: ResourceManager::new(),
            scenes: SceneManager::new(),
            managers,
            components: ComponentStore::new(),
            timer: Timer::new(),
        })
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// An engine instance already exists or is already initialized
    #[error("engine instance '{0}' already exists")]
    DuplicateInstance(String),

    /// Operation not valid in the current lifecycle state
    #[error("cannot {operation} while the engine is {state}")]
    InvalidState {
        /// State at the time of the call
        state: EngineState,
        /// Rejected operation
        operation: &'static str,
    },

    /// A subsystem failed during `init`
    #[error("failed to initialize {subsystem}: {source}")]
    SubsystemInit {
        /// Failing step
        subsystem: SubsystemId,
        /// Underlying failure
        #[source]
        source: SubsystemError,
    },

    /// A subsystem failed to advance a frame
    #[error("{subsystem} failed to advance frame: {source}")]
    FrameAdvance {
        /// Failing step
        subsystem: SubsystemId,
        /// Underlying failure
        #[source]
        source: SubsystemError,
    },

    /// Manager construction failed
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Component bookkeeping error
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Application hook failed
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}
