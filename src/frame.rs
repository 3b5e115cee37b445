//! Fixed-budget frame loop
//!
//! One iteration: poll input, measure elapsed time since the previous
//! iteration started, update the scene, render it into the frame buffer,
//! present, then wait out whatever is left of the frame budget.
//!
//! The loop owns no window. Events come in and frames go out through the
//! [`Platform`] / [`Surface`] traits, so the same loop runs against wgpu in
//! the binary and against a headless recorder in tests.

use std::time::{Duration, Instant};

use glam::{Vec2, Vec3};

use crate::canvas::PixelBuffer;
use crate::consts::*;
use crate::error::Result;
use crate::platform::{InputEvent, MouseState};

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal: a quit event was seen
    Quitting,
}

/// Window and pacing configuration passed into the loop
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Depth of the sprite volume
    pub depth: u32,
    /// Minimum wall-clock time per iteration
    pub frame_budget: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            width: WIN_WIDTH,
            height: WIN_HEIGHT,
            depth: WIN_DEPTH,
            frame_budget: FRAME_BUDGET,
        }
    }
}

impl LoopConfig {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// (width, height, depth) of the sprite volume
    pub fn volume(&self) -> Vec3 {
        Vec3::new(self.width as f32, self.height as f32, self.depth as f32)
    }
}

/// Something the loop can update and draw
pub trait Scene {
    /// Advance by `dt` seconds (never negative)
    fn update(&mut self, dt: f32);
    /// Draw the whole frame, background included
    fn render(&self, frame: &mut PixelBuffer) -> Result<()>;
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn update(&mut self, dt: f32) {
        (**self).update(dt);
    }

    fn render(&self, frame: &mut PixelBuffer) -> Result<()> {
        (**self).render(frame)
    }
}

/// Presentation target for finished frames
pub trait Surface {
    fn present(&mut self, frame: &PixelBuffer) -> Result<()>;
}

/// Event source plus presentation target, for the blocking [`FrameLoop::run`]
pub trait Platform: Surface {
    /// Drain all pending input events
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Elapsed seconds between two iteration starts, clamped to [0, MAX_FRAME_DT]
pub fn elapsed_seconds(previous: Option<Instant>, now: Instant) -> f32 {
    let Some(previous) = previous else {
        return 0.0;
    };
    let dt = now.saturating_duration_since(previous).as_secs_f32();
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Time left to sleep when an iteration took `elapsed` of a `budget`
pub fn frame_delay(elapsed: Duration, budget: Duration) -> Option<Duration> {
    budget.checked_sub(elapsed).filter(|d| !d.is_zero())
}

pub struct FrameLoop<S> {
    config: LoopConfig,
    scene: S,
    frame: PixelBuffer,
    state: LoopState,
    last_frame_start: Option<Instant>,
    mouse: MouseState,
    frames: u64,
}

impl<S: Scene> FrameLoop<S> {
    pub fn new(config: LoopConfig, scene: S) -> Self {
        let frame = PixelBuffer::new(config.width, config.height);
        Self {
            config,
            scene,
            frame,
            state: LoopState::Running,
            last_frame_start: None,
            mouse: MouseState::default(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    /// Frames presented so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one iteration that started at `frame_start`
    ///
    /// A quit event ends the loop before anything is updated or drawn. Once
    /// quitting, further calls do nothing.
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        frame_start: Instant,
        surface: &mut impl Surface,
    ) -> Result<LoopState> {
        if self.state == LoopState::Quitting {
            return Ok(self.state);
        }

        let prev_mouse = self.mouse;
        for event in events {
            if *event == InputEvent::Quit {
                log::info!("Quit requested after {} frames", self.frames);
                self.state = LoopState::Quitting;
                return Ok(self.state);
            }
            self.mouse.apply(event);
        }
        if self.mouse.left_released(&prev_mouse) {
            log::info!("Left click at ({:.0}, {:.0})", self.mouse.x, self.mouse.y);
        }

        let dt = elapsed_seconds(self.last_frame_start, frame_start);
        self.last_frame_start = Some(frame_start);

        self.scene.update(dt);
        self.scene.render(&mut self.frame)?;
        surface.present(&self.frame)?;
        self.frames += 1;

        log::trace!("frame {} dt {:.2} ms", self.frames, dt * 1000.0);
        Ok(self.state)
    }

    /// Drive the loop until a quit event, sleeping out each frame budget
    pub fn run(&mut self, platform: &mut impl Platform) -> Result<()> {
        loop {
            let frame_start = Instant::now();
            let events = platform.poll_events();
            if self.tick(&events, frame_start, platform)? == LoopState::Quitting {
                return Ok(());
            }
            if let Some(delay) = frame_delay(frame_start.elapsed(), self.config.frame_budget) {
                std::thread::sleep(delay);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::error::BounceError;
    use crate::platform::MouseButton;
    use std::collections::VecDeque;

    /// Records every dt and paints pixel (0, 0) with the update count
    #[derive(Default)]
    struct CountingScene {
        dts: Vec<f32>,
    }

    impl Scene for CountingScene {
        fn update(&mut self, dt: f32) {
            self.dts.push(dt);
        }

        fn render(&self, frame: &mut PixelBuffer) -> Result<()> {
            let n = self.dts.len() as u8;
            frame.set_pixel(0, 0, Rgb::new(n, n, n));
            Ok(())
        }
    }

    /// Scripted events per poll; quits when the script runs out
    #[derive(Default)]
    struct Headless {
        script: VecDeque<Vec<InputEvent>>,
        presented: Vec<u8>,
        fail_present: bool,
    }

    impl Surface for Headless {
        fn present(&mut self, frame: &PixelBuffer) -> Result<()> {
            if self.fail_present {
                return Err(BounceError::Surface(wgpu::SurfaceError::OutOfMemory));
            }
            self.presented.push(frame.as_bytes()[0]);
            Ok(())
        }
    }

    impl Platform for Headless {
        fn poll_events(&mut self) -> Vec<InputEvent> {
            self.script
                .pop_front()
                .unwrap_or_else(|| vec![InputEvent::Quit])
        }
    }

    fn small_config() -> LoopConfig {
        LoopConfig {
            width: 4,
            height: 4,
            frame_budget: Duration::from_millis(1),
            ..LoopConfig::default()
        }
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = LoopConfig::default();
        assert_eq!((config.width, config.height, config.depth), (800, 600, 600));
        assert_eq!(config.frame_budget, Duration::from_millis(5));
        assert_eq!(config.volume(), Vec3::new(800.0, 600.0, 600.0));
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut frame_loop = FrameLoop::new(small_config(), CountingScene::default());
        let mut surface = Headless::default();
        let t0 = Instant::now();
        frame_loop.tick(&[], t0, &mut surface).unwrap();
        frame_loop
            .tick(&[], t0 + Duration::from_millis(16), &mut surface)
            .unwrap();

        let dts = &frame_loop.scene().dts;
        assert_eq!(dts[0], 0.0);
        assert!((dts[1] - 0.016).abs() < 1e-6);
        assert_eq!(surface.presented, vec![1, 2]);
        assert_eq!(frame_loop.frame_count(), 2);
    }

    #[test]
    fn test_elapsed_clamped() {
        let t0 = Instant::now();
        assert_eq!(elapsed_seconds(None, t0), 0.0);
        // Clock going backwards reads as zero
        assert_eq!(elapsed_seconds(Some(t0 + Duration::from_millis(5)), t0), 0.0);
        // Long stalls are capped
        assert_eq!(
            elapsed_seconds(Some(t0), t0 + Duration::from_secs(3)),
            MAX_FRAME_DT
        );
    }

    #[test]
    fn test_frame_delay() {
        let budget = Duration::from_millis(5);
        assert_eq!(
            frame_delay(Duration::from_millis(2), budget),
            Some(Duration::from_millis(3))
        );
        assert_eq!(frame_delay(Duration::from_millis(5), budget), None);
        assert_eq!(frame_delay(Duration::from_millis(9), budget), None);
    }

    #[test]
    fn test_quit_skips_update_and_present() {
        let mut frame_loop = FrameLoop::new(small_config(), CountingScene::default());
        let mut surface = Headless::default();
        let state = frame_loop
            .tick(&[InputEvent::Quit], Instant::now(), &mut surface)
            .unwrap();

        assert_eq!(state, LoopState::Quitting);
        assert!(frame_loop.scene().dts.is_empty());
        assert!(surface.presented.is_empty());

        // Quitting is terminal
        let state = frame_loop.tick(&[], Instant::now(), &mut surface).unwrap();
        assert_eq!(state, LoopState::Quitting);
        assert!(surface.presented.is_empty());
    }

    #[test]
    fn test_run_until_quit() {
        let mut platform = Headless::default();
        platform.script.push_back(vec![]);
        platform.script.push_back(vec![InputEvent::MouseMoved { x: 1.0, y: 2.0 }]);
        platform.script.push_back(vec![]);

        let mut frame_loop = FrameLoop::new(small_config(), CountingScene::default());
        frame_loop.run(&mut platform).unwrap();

        assert_eq!(frame_loop.state(), LoopState::Quitting);
        assert_eq!(frame_loop.frame_count(), 3);
        assert_eq!(platform.presented, vec![1, 2, 3]);
        assert!(frame_loop.scene().dts.iter().all(|dt| *dt >= 0.0));
    }

    #[test]
    fn test_mouse_state_tracked() {
        let mut frame_loop = FrameLoop::new(small_config(), CountingScene::default());
        let mut surface = Headless::default();
        let events = [
            InputEvent::MouseMoved { x: 3.0, y: 4.0 },
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
        ];
        frame_loop.tick(&events, Instant::now(), &mut surface).unwrap();
        let mouse = frame_loop.mouse();
        assert!(mouse.left);
        assert_eq!((mouse.x, mouse.y), (3.0, 4.0));
    }

    #[test]
    fn test_boxed_scene() {
        let scene: Box<dyn Scene> = Box::new(CountingScene::default());
        let mut frame_loop = FrameLoop::new(small_config(), scene);
        let mut surface = Headless::default();
        frame_loop.tick(&[], Instant::now(), &mut surface).unwrap();
        assert_eq!(surface.presented, vec![1]);
    }

    #[test]
    fn test_present_error_propagates() {
        let mut frame_loop = FrameLoop::new(small_config(), CountingScene::default());
        let mut surface = Headless {
            fail_present: true,
            ..Default::default()
        };
        assert!(frame_loop.tick(&[], Instant::now(), &mut surface).is_err());
        assert_eq!(frame_loop.frame_count(), 0);
    }
}
