//! Hungry Bird - slingshot arcade game.
//!
//! Opens the game window and drives the simulation once per redraw. Drawing is left to
//! the renderer, which consumes each frame's instance matrices and view.

use anyhow::Result;
use engine_core::TransformRaw;
use game::{Game, GameConfig, PrimitiveMeshes};
use input::{InputState, KeyBindings};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

struct Session {
    window: Window,
    game: Game,
    input: InputState,
    bindings: KeyBindings,
    last_status: String,
}

impl Session {
    fn redraw(&mut self) {
        let frame_input = self.input.frame_input(&self.bindings);
        let report = self.game.frame_now(&frame_input);
        self.input.end_frame();

        let instances = report.instance_data();
        let upload: &[u8] = bytemuck::cast_slice::<TransformRaw, u8>(&instances);
        log::trace!(
            "Frame {}: {} instances ({} bytes)",
            report.frame,
            instances.len(),
            upload.len()
        );

        let status = self.game.status_line();
        if status != self.last_status {
            self.window.set_title(&format!("Hungry Bird | {}", status));
            self.last_status = status;
        }
    }
}

/// Application handler for winit.
struct App {
    config: GameConfig,
    session: Option<Session>,
}

impl App {
    fn new(config: GameConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let mut window_attrs = Window::default_attributes()
            .with_title("Hungry Bird")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        if self.config.fullscreen {
            window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => w,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match Game::new(&self.config, &PrimitiveMeshes::builtin()) {
            Ok(game) => {
                window.request_redraw();
                self.session = Some(Session {
                    window,
                    game,
                    input: InputState::new(),
                    bindings: KeyBindings::default(),
                    last_status: String::new(),
                });
            }
            Err(e) => {
                log::error!("Failed to initialize game: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(session) = &mut self.session else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(false) => session.input.reset(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == KeyCode::Escape && event.state.is_pressed() {
                        event_loop.exit();
                        return;
                    }
                    session.input.process_keyboard(key, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                session.input.process_mouse_button(button, state);
            }
            WindowEvent::RedrawRequested => {
                session.redraw();
                session.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                   HUNGRY BIRD                    ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  Arrows     - Aim          │  W/S   - Power      ║");
    println!("║  Space/LMB  - Fire         │  C     - Next view  ║");
    println!("║  1-4        - Select view  │  Esc   - Quit       ║");
    println!("║  Hold Shift - Free camera (Arrows, WASD, R/F, Q/E)║");
    println!("╚══════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    if !std::path::Path::new("config.ron").exists() {
        log::info!("No config.ron found, writing defaults");
        config.save();
    }
    log::info!(
        "Starting Hungry Bird: {} birds, {} props",
        config.pool_size,
        config.level.props.len()
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
