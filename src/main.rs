//! Cloud Bounce entry point
//!
//! Builds the selected demo, opens a window and drives the frame loop from
//! winit's event loop. Usage: `cloud-bounce [bounce|sprites]`

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use cloud_bounce::assets::load_texture;
use cloud_bounce::consts::*;
use cloud_bounce::error::{BounceError, Result};
use cloud_bounce::frame::{FrameLoop, LoopConfig, LoopState, Scene};
use cloud_bounce::noise::{NoiseKind, NoiseParams};
use cloud_bounce::platform::{InputEvent, MouseButton};
use cloud_bounce::renderer::GpuPresenter;
use cloud_bounce::scene::{BounceScene, SpriteScene, build_background, cloud_gradient};

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Demo {
    Bounce,
    #[default]
    Sprites,
}

impl Demo {
    fn from_arg(arg: Option<&str>) -> Option<Self> {
        match arg {
            None => Some(Self::default()),
            Some("bounce") => Some(Self::Bounce),
            Some("sprites") => Some(Self::Sprites),
            Some(_) => None,
        }
    }

    /// Background noise: billowy turbulence behind the ball, soft FBM clouds behind sprites
    fn noise_params(self) -> NoiseParams {
        match self {
            Self::Bounce => NoiseParams::clouds().with_kind(NoiseKind::Turbulence),
            Self::Sprites => NoiseParams::clouds(),
        }
    }
}

fn build_scene(demo: Demo, config: &LoopConfig) -> Result<Box<dyn Scene>> {
    let background = build_background(
        &demo.noise_params(),
        &cloud_gradient(),
        config.width,
        config.height,
    );
    match demo {
        Demo::Bounce => Ok(Box::new(BounceScene::new(config, background)?)),
        Demo::Sprites => {
            let texture = load_texture(SPRITE_PATH)?;
            Ok(Box::new(SpriteScene::new(
                config,
                background,
                vec![texture],
                SPRITE_COUNT,
                SPRITE_SEED,
            )?))
        }
    }
}

struct App {
    frame_loop: FrameLoop<Box<dyn Scene>>,
    presenter: Option<GpuPresenter>,
    /// Events collected since the last tick
    events: Vec<InputEvent>,
    next_frame: Option<Instant>,
    error: Option<BounceError>,
}

impl App {
    fn new(frame_loop: FrameLoop<Box<dyn Scene>>) -> Self {
        Self {
            frame_loop,
            presenter: None,
            events: Vec::new(),
            next_frame: None,
            error: None,
        }
    }

    fn create_presenter(&self, event_loop: &ActiveEventLoop) -> Result<GpuPresenter> {
        let config = self.frame_loop.config();
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height));
        let window = event_loop
            .create_window(attributes)
            .map_err(|e| BounceError::Window(e.to_string()))?;
        log::info!("Window created: {}x{}", config.width, config.height);
        GpuPresenter::new(Arc::new(window), config.width, config.height)
    }

    /// Stop the event loop; the error is reported once `run_app` returns
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: BounceError) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        match self.create_presenter(event_loop) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.events.push(InputEvent::Quit),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.events.push(InputEvent::MouseMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    _ => return,
                };
                self.events.push(InputEvent::MouseButton {
                    button,
                    pressed: state == ElementState::Pressed,
                });
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        let frame_start = Instant::now();
        let quit_pending = self.events.contains(&InputEvent::Quit);
        match self.next_frame {
            Some(deadline) if frame_start < deadline && !quit_pending => {
                // Woken early by input; keep collecting until the budget runs out
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
                return;
            }
            _ => {}
        }

        let events = std::mem::take(&mut self.events);
        match self.frame_loop.tick(&events, frame_start, presenter) {
            Ok(LoopState::Quitting) => event_loop.exit(),
            Ok(LoopState::Running) => {
                let deadline = frame_start + self.frame_loop.config().frame_budget;
                self.next_frame = Some(deadline);
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            Err(e) => self.fail(event_loop, e),
        }
    }
}

fn run(demo: Demo) -> Result<()> {
    let config = LoopConfig::default();
    log::info!("Starting {:?} demo", demo);

    // Everything that can fail on bad assets happens before a window opens
    let scene = build_scene(demo, &config)?;
    let mut app = App::new(FrameLoop::new(config, scene));

    let event_loop = EventLoop::new().map_err(|e| BounceError::Window(e.to_string()))?;
    event_loop
        .run_app(&mut app)
        .map_err(|e| BounceError::Window(e.to_string()))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => {
            log::info!("Exited after {} frames", app.frame_loop.frame_count());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arg = std::env::args().nth(1);
    let Some(demo) = Demo::from_arg(arg.as_deref()) else {
        log::error!(
            "Unknown demo {:?}, expected `bounce` or `sprites`",
            arg.unwrap_or_default()
        );
        return ExitCode::from(2);
    };

    match run(demo) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
