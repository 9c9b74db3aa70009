use std::collections::HashMap;

use thiserror::Error;

pub mod canvas;
pub mod config;
pub mod frame_loop;
pub mod overlay;
pub mod pattern;

mod platform;
use canvas::Canvas;
use platform::{Window, WindowClient, WindowEvent, WindowTrait};

mod key;
pub use key::Key;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to initialize GLFW: {0}")]
    GlfwInit(#[from] glfw::InitError),
    #[error("failed to create a {width}x{height} window")]
    WindowCreation { width: u32, height: u32 },
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
    #[error("OpenGL error {0:#06x}")]
    Gl(u32),
    #[error("the engine has already been run")]
    AlreadyRun,
}

pub struct EngineBuilder {
    width: u32,
    height: u32,
    frame_rate: u32,

    title: String,
}

impl EngineBuilder {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    #[inline]
    pub fn title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    #[inline]
    pub fn frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate.max(1);
        self
    }

    /// Opens the window. Nothing is drawn until [`Engine::run`].
    pub fn build(self) -> Result<Engine, EngineError> {
        Engine::new(self)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            frame_rate: 60,
            title: String::from("Noise Visualizer"),
        }
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
enum PressedState {
    JustPressed,
    Pressed,
    JustReleased,
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum LoopState {
    Running,
    Terminated,
}

pub struct Engine {
    width: u32,
    height: u32,

    window: Option<Window>,
}

impl Engine {
    fn new(builder: EngineBuilder) -> Result<Self, EngineError> {
        let EngineBuilder {
            width,
            height,
            title,
            frame_rate,
        } = builder;

        let window = Window::new(width, height, &title, frame_rate)?;
        log::info!("opened {width}x{height} window \"{title}\" at {frame_rate} fps");

        Ok(Self {
            width,
            height,

            window: Some(window),
        })
    }

    /// Runs `handle_frame` once per frame until the window is closed, presenting
    /// the canvas after each call.
    pub fn run<F>(&mut self, handle_frame: F) -> Result<(), EngineError>
    where
        F: FnMut(&Context, &mut Canvas),
    {
        let mut window = self.window.take().ok_or(EngineError::AlreadyRun)?;
        let mut driver = FrameDriver::new(Canvas::new(self.width, self.height), handle_frame);

        window.run(&mut driver)?;

        log::info!("window closed after {} frames", driver.current_frame);
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Owns the canvas and the input snapshot, and hands both to the frame handler.
pub(crate) struct FrameDriver<F>
where
    F: FnMut(&Context, &mut Canvas),
{
    current_frame: u64,
    state: LoopState,

    canvas: Canvas,
    handle_frame: F,

    key_states: HashMap<Key, PressedState>,
}

impl<F> FrameDriver<F>
where
    F: FnMut(&Context, &mut Canvas),
{
    pub(crate) fn new(canvas: Canvas, handle_frame: F) -> Self {
        Self {
            current_frame: 0,
            state: LoopState::Running,

            canvas,
            handle_frame,

            key_states: HashMap::new(),
        }
    }
}

impl<F> WindowClient for FrameDriver<F>
where
    F: FnMut(&Context, &mut Canvas),
{
    fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Key { key, pressed } => {
                self.key_states.insert(
                    key,
                    if pressed {
                        PressedState::JustPressed
                    } else {
                        PressedState::JustReleased
                    },
                );
            }
            WindowEvent::WindowClose => {
                log::debug!("close requested on frame {}", self.current_frame);
                self.state = LoopState::Terminated;
            }
        }
    }

    fn frame(&mut self) -> bool {
        if self.state == LoopState::Terminated {
            return false;
        }

        let ctx = Context {
            width: self.canvas.width(),
            height: self.canvas.height(),
            current_frame: self.current_frame,

            key_states: &self.key_states,
        };
        (self.handle_frame)(&ctx, &mut self.canvas);

        self.current_frame += 1;

        self.key_states
            .retain(|_, state| *state != PressedState::JustReleased);
        for (_, state) in self.key_states.iter_mut() {
            if *state == PressedState::JustPressed {
                *state = PressedState::Pressed;
            }
        }

        true
    }

    fn get_pixels(&self) -> &[u8] {
        self.canvas.as_bytes()
    }
}

pub struct Context<'a> {
    width: u32,
    height: u32,
    current_frame: u64,

    key_states: &'a HashMap<Key, PressedState>,
}

impl<'a> Context<'a> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[inline]
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether `key_code` is held down during this frame.
    pub fn is_key_pressed(&self, key_code: Key) -> bool {
        self.key_states
            .get(&key_code)
            .map_or(false, |state| *state != PressedState::JustReleased)
    }
    pub fn is_key_just_pressed(&self, key_code: Key) -> bool {
        self.key_states
            .get(&key_code)
            .map_or(false, |state| *state == PressedState::JustPressed)
    }
}

fn calculate_fit_radii(
    width: f32,
    height: f32,
    container_width: f32,
    container_height: f32,
) -> (f32, f32) {
    let scaled = (container_width / width, container_height / height);
    let fit_scale_fac = f32::min(scaled.0, scaled.1);
    (width * fit_scale_fac, height * fit_scale_fac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::VisualizerConfig, frame_loop::FrameLoop, pattern};

    /// Feeds one batch of events per iteration and records every presented frame.
    struct ScriptedWindow {
        script: Vec<Vec<WindowEvent>>,
        presented: Vec<Vec<u8>>,
    }

    impl WindowTrait for ScriptedWindow {
        fn new(_: u32, _: u32, _: &str, _: u32) -> Result<Self, EngineError> {
            Ok(Self {
                script: Vec::new(),
                presented: Vec::new(),
            })
        }

        fn run<T>(&mut self, client: &mut T) -> Result<(), EngineError>
        where
            T: WindowClient,
        {
            for events in std::mem::take(&mut self.script) {
                for event in events {
                    client.handle_event(event);
                }
                if !client.frame() {
                    return Ok(());
                }
                self.presented.push(client.get_pixels().to_vec());
            }
            Ok(())
        }
    }

    fn scripted(script: Vec<Vec<WindowEvent>>) -> ScriptedWindow {
        let mut window = ScriptedWindow::new(0, 0, "", 60).unwrap();
        window.script = script;
        window
    }

    fn press(key: Key, pressed: bool) -> WindowEvent {
        WindowEvent::Key { key, pressed }
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
        let i = ((x + y * width) * 3) as usize;
        [frame[i], frame[i + 1], frame[i + 2]]
    }

    #[test]
    fn close_stops_before_next_frame() {
        let mut window = scripted(vec![
            vec![],
            vec![press(Key::Right, true)],
            vec![],
            vec![WindowEvent::WindowClose],
            vec![],
            vec![],
        ]);

        let mut calls = 0;
        let mut driver = FrameDriver::new(Canvas::new(4, 4), |_: &Context, canvas: &mut Canvas| {
            calls += 1;
            canvas.fill([calls as u8; 3]);
        });
        window.run(&mut driver).unwrap();

        assert_eq!(driver.state, LoopState::Terminated);
        assert_eq!(driver.current_frame, 3);
        assert_eq!(driver.canvas.get(0, 0), Some([3; 3]));
        drop(driver);

        assert_eq!(calls, 3);
        assert_eq!(window.presented.len(), 3);
    }

    #[test]
    fn held_key_advances_seed_once_per_frame() {
        const HELD_FRAMES: usize = 5;
        let config = VisualizerConfig {
            width: 16,
            height: 16,
            ..Default::default()
        };

        let mut script = vec![vec![press(Key::Right, true)]];
        script.extend((1..HELD_FRAMES).map(|_| vec![]));
        script.push(vec![press(Key::Right, false)]);
        script.push(vec![]);
        let mut window = scripted(script);

        let mut frame_loop = FrameLoop::new(&config);
        let mut driver = FrameDriver::new(
            Canvas::new(config.width, config.height),
            |ctx: &Context, canvas: &mut Canvas| frame_loop.frame(ctx, canvas),
        );
        window.run(&mut driver).unwrap();
        drop(driver);

        assert_eq!(frame_loop.state().seed(), 123 + HELD_FRAMES as i64);

        let seeds_drawn: Vec<i64> = window
            .presented
            .iter()
            .map(|frame| {
                let drawn = pixel(frame, config.width, 10, 0);
                (123..187)
                    .find(|&seed| pattern::grayscale(10, 0, seed) == drawn)
                    .unwrap()
            })
            .collect();
        assert_eq!(seeds_drawn, vec![123, 124, 125, 126, 127, 128, 128]);
    }

    #[test]
    fn key_states_age_between_frames() {
        let mut observed = Vec::new();
        let mut driver = FrameDriver::new(Canvas::new(1, 1), |ctx: &Context, _: &mut Canvas| {
            observed.push((ctx.is_key_pressed(Key::Right), ctx.is_key_just_pressed(Key::Right)));
        });

        driver.handle_event(press(Key::Right, true));
        assert!(driver.frame());
        assert!(driver.frame());
        driver.handle_event(press(Key::Right, false));
        assert!(driver.frame());
        assert!(driver.frame());
        drop(driver);

        assert_eq!(
            observed,
            vec![(true, true), (true, false), (false, false), (false, false)]
        );
    }

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::with_dimensions(600, 600);
        assert_eq!(builder.title, "Noise Visualizer");
        assert_eq!((builder.width, builder.height), (600, 600));
        assert_eq!(builder.frame_rate, 60);
        assert_eq!(EngineBuilder::default().frame_rate(0).frame_rate, 1);
    }

    #[test]
    fn fit_radii_preserve_aspect() {
        assert_eq!(calculate_fit_radii(600.0, 600.0, 600.0, 600.0), (600.0, 600.0));
        assert_eq!(calculate_fit_radii(600.0, 600.0, 1200.0, 600.0), (600.0, 600.0));
        assert_eq!(calculate_fit_radii(600.0, 300.0, 300.0, 300.0), (300.0, 150.0));
    }
}
