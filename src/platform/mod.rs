use crate::{EngineError, Key};

pub trait WindowTrait: Sized {
    fn new(width: u32, height: u32, title: &str, frame_rate: u32) -> Result<Self, EngineError>;

    /// Polls events, runs a frame and presents it, until the client stops.
    fn run<T>(&mut self, client: &mut T) -> Result<(), EngineError>
    where
        T: WindowClient;
}

/// Where the canvas lands in normalized device coordinates when a
/// `target_width`x`target_height` image is fit into the framebuffer
/// without distorting it.
pub(crate) fn calculate_bounding_box(
    target_width: u32,
    target_height: u32,
    framebuffer_width: u32,
    framebuffer_height: u32,
) -> (f32, f32, f32, f32) {
    let (framebuffer_width, framebuffer_height) =
        (framebuffer_width.max(1) as f32, framebuffer_height.max(1) as f32);

    let fit = crate::calculate_fit_radii(
        target_width.max(1) as f32,
        target_height.max(1) as f32,
        framebuffer_width,
        framebuffer_height,
    );
    let radii = (fit.0 / framebuffer_width, fit.1 / framebuffer_height);
    (-radii.0, -radii.1, radii.0, radii.1)
}

pub trait WindowClient {
    fn handle_event(&mut self, event: WindowEvent);
    /// Returns `false` once the client is done and nothing more should be presented.
    fn frame(&mut self) -> bool;
    fn get_pixels(&self) -> &[u8];
}

#[derive(Debug)]
pub enum WindowEvent {
    Key { key: Key, pressed: bool },
    WindowClose,
}

mod native;
pub type Window = native::GLFWWindow;
