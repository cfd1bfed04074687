//! Cross-module engine scenarios with recording doubles


use crate::config::EngineConfig;
use crate::ecs::{Component, ComponentKind, Domain, Manager};
use crate::foundation::collections::EntityId;
use crate::frame::FrameContext;
use crate::subsystem::{Subsystem, SubsystemError};
use crate::{AppError, Application, Engine};
use std::cell::RefCell;
use std::rc::Rc;

type CallLog = Rc<RefCell<Vec<String>>>;

fn new_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}

/// Subsystem that records every lifecycle call
struct RecordingSubsystem {
    name: String,
    log: CallLog,
    fail_init: bool,
    fail_at_frame: Option<u64>,
    initialized: bool,
}

impl RecordingSubsystem {
    fn new(name: impl Into<String>, log: &CallLog) -> Self {
        Self {
            name: name.into(),
            log: Rc::clone(log),
            fail_init: false,
            fail_at_frame: None,
            initialized: false,
        }
    }

    fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    fn failing_at_frame(mut self, frame: u64) -> Self {
        self.fail_at_frame = Some(frame);
        self
    }
}

impl Subsystem for RecordingSubsystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, _config: &EngineConfig) -> Result<(), SubsystemError> {
        self.log.borrow_mut().push(format!("{}:init", self.name));
        if self.fail_init {
            return Err(SubsystemError::Failed(format!("{} backend unavailable", self.name)));
        }
        self.initialized = true;
        Ok(())
    }

    fn advance_frame(&mut self, frame: &FrameContext) -> Result<(), SubsystemError> {
        if self.fail_at_frame == Some(frame.frame()) {
            return Err(SubsystemError::Failed("device lost".to_string()));
        }
        self.log.borrow_mut().push(format!("{}:frame:{}", self.name, frame.frame()));
        Ok(())
    }

    fn teardown(&mut self) {
        self.log.borrow_mut().push(format!("{}:teardown", self.name));
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// Component that records its hooks, optionally requesting quit on a frame
struct Recorder {
    label: &'static str,
    log: CallLog,
    quit_at: Option<u64>,
}

impl Component for Recorder {
    fn setup(&mut self, _entity: EntityId) {
        self.log.borrow_mut().push(format!("{}:setup", self.label));
    }

    fn update(&mut self, _entity: EntityId, frame: &mut FrameContext) {
        self.log.borrow_mut().push(format!("{}:update:{}", self.label, frame.frame()));
        if self.quit_at == Some(frame.frame()) {
            frame.request_quit();
        }
    }

    fn teardown(&mut self, _entity: EntityId) {
        self.log.borrow_mut().push(format!("{}:teardown", self.label));
    }
}

/// The recorder kind registered for each domain
fn recorded_kind(domain: Domain) -> ComponentKind {
    match domain {
        Domain::Render => ComponentKind::Mesh,
        Domain::Physics => ComponentKind::Rigidbody,
        Domain::Input => ComponentKind::InputListener,
        Domain::Ui => ComponentKind::Label,
    }
}

/// Options for [`recording_engine`]
#[derive(Default)]
struct Setup {
    failing_init: Option<Domain>,
    render_context_fails_at: Option<u64>,
    manager_fails_at: Option<(Domain, u64)>,
    quit_at: Option<u64>,
    max_frames: Option<u64>,
}

/// Engine whose render context and four managers all record into `log`
fn recording_engine(log: &CallLog, setup: Setup) -> Engine {
    let config = EngineConfig {
        app_name: "recording".to_string(),
        max_frames: setup.max_frames,
        fixed_timestep: Some(0.25),
        ..EngineConfig::default()
    };

    let mut render_context = RecordingSubsystem::new("context", log);
    if let Some(frame) = setup.render_context_fails_at {
        render_context = render_context.failing_at_frame(frame);
    }
    let mut builder = Engine::builder(config).render_context(render_context);

    for domain in Domain::ALL {
        let mut subsystem = RecordingSubsystem::new(domain.to_string(), log);
        if setup.failing_init == Some(domain) {
            subsystem = subsystem.failing_init();
        }
        if let Some((failing, frame)) = setup.manager_fails_at {
            if failing == domain {
                subsystem = subsystem.failing_at_frame(frame);
            }
        }
        let kind = recorded_kind(domain);
        let recorder_log = Rc::clone(log);
        let quit_at = if domain == Domain::Input { setup.quit_at } else { None };
        let manager = Manager::builder(domain, subsystem)
            .register_component(kind, move || {
                Box::new(Recorder {
                    label: kind.name(),
                    log: Rc::clone(&recorder_log),
                    quit_at,
                })
            })
            .unwrap()
            .build();
        builder = builder.manager(manager);
    }
    builder.build().unwrap()
}

/// Application that attaches one recorder per domain to a single entity
#[derive(Default)]
struct RecordingApp {
    frames: Vec<u64>,
    cleaned_up: bool,
    quit_after: Option<u64>,
    clean_after: Option<u64>,
    quit_on_initialize: bool,
    reject_initialize: bool,
}

impl Application for RecordingApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let player = engine.spawn("Player");
        for domain in Domain::ALL {
            engine.add_component(player, recorded_kind(domain))?;
        }
        if self.quit_on_initialize {
            engine.quit();
        }
        if self.reject_initialize {
            return Err(AppError::Custom("missing level data".to_string()));
        }
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
        self.frames.push(frame.frame());
        if self.quit_after == Some(frame.frame()) {
            engine.quit();
        }
        if self.clean_after == Some(frame.frame()) {
            engine.clean()?;
        }
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        self.cleaned_up = true;
    }
}
