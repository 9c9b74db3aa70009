use crate::{
    overlay::{Overlay, Rect},
    Key,
};

pub const WIDTH: u32 = 600;
pub const HEIGHT: u32 = 600;

pub const INITIAL_SEED: i64 = 123;

pub const OVERLAY_RECT: Rect = Rect::new(20, 20, 100, 100);
pub const OVERLAY_STROKE: u32 = 3;
pub const OVERLAY_COLOR: [u8; 3] = [255, 0, 0];

/// Everything the visualizer needs to know before opening its window.
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub frame_rate: u32,

    pub initial_seed: i64,
    /// Holding this key bumps the seed once per frame.
    pub increase_key: Key,

    pub overlay: Overlay,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            title: String::from("Noise Visualizer"),
            frame_rate: 60,

            initial_seed: INITIAL_SEED,
            increase_key: Key::Right,

            overlay: Overlay {
                rect: OVERLAY_RECT,
                stroke: OVERLAY_STROKE,
                color: OVERLAY_COLOR,
            },
        }
    }
}
