//! Game state and the per-frame pipeline.

use engine_core::{Clock, Transform, TransformRaw};
use glam::Mat4;
use hecs::{Entity, EntityBuilder};
use input::{FrameInput, InputEvent, InputMode};

use crate::camera::{CameraFocus, CameraRig};
use crate::collision::{CollisionResolver, Impact};
use crate::config::GameConfig;
use crate::effect::FeedbackEffect;
use crate::error::SetupError;
use crate::launcher::Launcher;
use crate::level::{self, MeshSource};
use crate::projectile::Projectile;
use crate::scene::{MemberKind, RenderInstance, SceneRegistry};

/// Shots and hits this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub shots: u32,
    pub hits: u32,
    pub targets_total: usize,
    pub targets_down: usize,
}

impl Scoreboard {
    pub fn all_targets_down(&self) -> bool {
        self.targets_total > 0 && self.targets_down >= self.targets_total
    }
}

/// Everything one frame hands back to the presentation side.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub frame: u64,
    pub mode: InputMode,
    pub fired: bool,
    pub impact: Option<Impact>,
    /// The active projectile touched the ground this frame.
    pub landed: bool,
    /// New active index, when the turn passed this frame for any reason.
    pub turn_advanced: Option<usize>,
    pub instances: Vec<RenderInstance>,
    pub view: Mat4,
}

impl FrameReport {
    /// Model matrices in upload order.
    pub fn instance_data(&self) -> Vec<TransformRaw> {
        self.instances.iter().map(|i| i.model).collect()
    }
}

pub struct Game {
    clock: Clock,
    registry: SceneRegistry,
    launcher: Launcher,
    resolver: CollisionResolver,
    camera: CameraRig,
    scoreboard: Scoreboard,
    turn_delay: f64,
    /// When a landed projectile hands over the turn.
    pending_turn: Option<f64>,
    victory_logged: bool,
}

impl Game {
    /// Build the world. Any missing or malformed hitbox data aborts setup.
    pub fn new(config: &GameConfig, meshes: &dyn MeshSource) -> Result<Self, SetupError> {
        let mut registry = SceneRegistry::new();
        let summary = level::spawn_props(&config.level, meshes, &mut registry)?;

        let hitbox = level::load_hitbox(meshes, &config.projectile.mesh)?;
        let template = Projectile::new(hitbox, config.projectile.model_scale);
        let launcher = Launcher::install(
            config.launcher.clone(),
            config.pool_size,
            &template,
            &mut registry,
        )?;

        let mut components = EntityBuilder::new();
        components.add(FeedbackEffect::new(config.effect));
        let effect = registry.register(
            MemberKind::Effect,
            Transform::default(),
            false,
            &mut components,
        );

        let camera = CameraRig::new(config.camera, launcher.origin());
        log::info!("World ready with {} scene members", registry.len());

        Ok(Self {
            clock: Clock::new(),
            registry,
            launcher,
            resolver: CollisionResolver::new(effect),
            camera,
            scoreboard: Scoreboard {
                targets_total: summary.targets,
                ..Default::default()
            },
            turn_delay: config.turn_delay.max(0.0),
            pending_turn: None,
            victory_logged: false,
        })
    }

    /// Run one frame `delta` seconds after the previous one.
    pub fn frame(&mut self, delta: f64, input: &FrameInput) -> FrameReport {
        self.clock.advance(delta);
        self.run_frame(input)
    }

    /// Run one frame timed by the wall clock.
    pub fn frame_now(&mut self, input: &FrameInput) -> FrameReport {
        self.clock.tick();
        self.run_frame(input)
    }

    /// Input, transforms, collision, turn order, then output. The clock has already ticked.
    fn run_frame(&mut self, input: &FrameInput) -> FrameReport {
        let dt = self.clock.delta_seconds();

        match input.mode {
            InputMode::Launcher => {
                self.launcher.update(&input.held, dt, &mut self.registry);
            }
            InputMode::Camera => self.camera.fly(&input.held, dt),
        }

        let mut fired = false;
        for event in &input.events {
            match *event {
                InputEvent::Fire if input.mode == InputMode::Launcher => {
                    if self.launcher.shoot(&mut self.registry, &self.clock) {
                        self.scoreboard.shots += 1;
                        fired = true;
                    }
                }
                InputEvent::Fire => log::debug!("Fire ignored in camera mode"),
                InputEvent::NextView => self.camera.next_view(),
                InputEvent::SelectView(slot) => {
                    self.camera.select_view(slot);
                }
            }
        }

        let update = self.registry.update(&self.clock);

        let impact = self
            .resolver
            .resolve(&mut self.registry, &mut self.launcher, &self.clock);
        let mut turn_advanced = None;
        if let Some(impact) = impact {
            self.record_impact(&impact);
            self.pending_turn = None;
            turn_advanced = Some(impact.next_index);
        }

        let active = self.launcher.active_projectile();
        let landed = update.landed.contains(&active);
        if landed {
            self.pending_turn = Some(self.clock.now() + self.turn_delay);
        }
        if let Some(at) = self.pending_turn {
            if self.clock.now() >= at {
                self.pending_turn = None;
                turn_advanced = Some(self.launcher.advance_turn(&mut self.registry));
            }
        }

        self.camera.update(&self.camera_focus());

        FrameReport {
            frame: self.clock.frame_count(),
            mode: input.mode,
            fired,
            impact,
            landed,
            turn_advanced,
            instances: self.registry.render_list(),
            view: self.camera.view_matrix(),
        }
    }

    fn record_impact(&mut self, impact: &Impact) {
        self.scoreboard.hits += 1;
        if impact.kind == MemberKind::Target {
            self.scoreboard.targets_down += 1;
        }
        if self.scoreboard.all_targets_down() && !self.victory_logged {
            self.victory_logged = true;
            log::info!(
                "All {} targets down in {} shots",
                self.scoreboard.targets_total,
                self.scoreboard.shots
            );
        }
    }

    fn camera_focus(&self) -> CameraFocus {
        let projectile = self
            .registry
            .projectile(self.launcher.active_projectile())
            .filter(|p| p.is_flying())
            .map(|p| p.position());
        CameraFocus {
            launch_origin: self.launcher.origin(),
            aim_yaw_deg: self.launcher.aim().yaw,
            projectile,
        }
    }

    /// Set aim and power directly, as a scripted shot would.
    pub fn aim(&mut self, yaw: f32, pitch: f32, power: f32) {
        self.launcher.aim_at(yaw, pitch, power, &mut self.registry);
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn effect(&self) -> Entity {
        self.resolver.effect()
    }

    /// One-line status for a window title or HUD.
    pub fn status_line(&self) -> String {
        let aim = self.launcher.aim();
        format!(
            "Bird {}/{} | power {:.1} | pitch {:.1}° yaw {:.1}° | targets {}/{} | shots {}",
            self.launcher.active_index() + 1,
            self.launcher.pool().len(),
            self.launcher.power(),
            aim.pitch,
            aim.yaw,
            self.scoreboard.targets_down,
            self.scoreboard.targets_total,
            self.scoreboard.shots
        )
    }
}
