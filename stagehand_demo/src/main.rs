//! Headless demo: builds a small scene and runs a bounded number of frames
//!
//! Usage: `stagehand_demo [engine.toml|engine.ron] [scene.ron]`

use stagehand::ecs::components::{InputListenerComponent, RigidbodyComponent};
use stagehand::prelude::*;

const DEFAULT_FRAMES: u64 = 300;
const QUIT_AT_FRAME: u64 = 240;

struct DemoApp {
    scene: SceneDescription,
    listener: Option<ComponentId>,
    bodies: Vec<ComponentId>,
}

impl DemoApp {
    fn new(scene: SceneDescription) -> Self {
        Self {
            scene,
            listener: None,
            bodies: Vec::new(),
        }
    }

    fn default_scene() -> SceneDescription {
        SceneDescription::new("Arena")
            .with_entity("Camera", ["Camera"])
            .with_entity("Sun", ["Light"])
            .with_entity("Ground", ["Plane", "Rigidbody"])
            .with_entity("Player", ["Mesh", "Rigidbody", "InputListener"])
            .with_entity("Asteroid", ["Mesh", "Rigidbody"])
            .with_entity("Asteroid", ["Mesh", "Rigidbody"])
            .with_entity("Hud", ["Label", "Button"])
    }
}

impl Application for DemoApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        engine.load_scene(&self.scene)?;

        let owned: Vec<(ComponentId, ComponentKind)> = engine
            .scene()
            .iter()
            .flat_map(|(_, entity)| entity.components().to_vec())
            .filter_map(|id| Some((id, engine.components().kind(id)?)))
            .collect();

        for (id, kind) in owned {
            match kind {
                ComponentKind::InputListener if self.listener.is_none() => {
                    if let Some(listener) = engine.component_mut::<InputListenerComponent>(id) {
                        listener.quit_on_trigger = true;
                    }
                    self.listener = Some(id);
                }
                ComponentKind::Rigidbody => self.bodies.push(id),
                _ => {}
            }
        }

        log::info!(
            "Scene '{}' ready: {} entities, {} components",
            engine.scene().name(),
            engine.scene().len(),
            engine.components().len()
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, frame: &FrameContext) -> Result<(), AppError> {
        if frame.frame() % 60 == 0 {
            let steps: u64 = self
                .bodies
                .iter()
                .filter_map(|&id| engine.component::<RigidbodyComponent>(id))
                .map(|body| body.steps)
                .sum();
            log::info!("Frame {}: {} physics steps so far", frame.frame(), steps);
        }

        // Simulated key press; the listener asks for quit on the next frame
        if frame.frame() == QUIT_AT_FRAME {
            if let Some(listener) = self
                .listener
                .and_then(|id| engine.component_mut::<InputListenerComponent>(id))
            {
                log::info!("Quit key pressed");
                listener.triggered = true;
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Demo finished after {} frames ({:.1} simulated seconds)",
            engine.frame_count(),
            engine.timer().total_time()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    stagehand::foundation::logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting Stagehand demo");

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig {
            app_name: "Stagehand Demo".to_string(),
            ..EngineConfig::default()
        },
    };
    config.max_frames.get_or_insert(DEFAULT_FRAMES);
    config.fixed_timestep.get_or_insert(1.0 / 60.0);

    let scene = match args.next() {
        Some(path) => SceneDescription::load_from_file(&path)?,
        None => DemoApp::default_scene(),
    };

    let mut host = EngineHost::new();
    let engine = host.setup_instance_with(config)?;
    let mut app = DemoApp::new(scene);
    engine.run(&mut app)?;

    host.shutdown();
    Ok(())
}
