use crate::{canvas::Canvas, config::VisualizerConfig, overlay::Overlay, pattern, Context, Key};

/// The mutable parameters of the pattern. Replaced wholesale each frame.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct PatternState {
    seed: i64,
}

impl PatternState {
    #[inline]
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    #[inline]
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// The state for the next frame. The seed wraps on overflow.
    #[inline]
    pub fn advance(self, increase_held: bool) -> Self {
        if increase_held {
            Self {
                seed: self.seed.wrapping_add(1),
            }
        } else {
            self
        }
    }
}

/// Per-frame work of the visualizer: recompute every pixel, draw the overlay,
/// then read input for the next frame.
pub struct FrameLoop {
    state: PatternState,
    overlay: Overlay,
    increase_key: Key,
}

impl FrameLoop {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            state: PatternState::new(config.initial_seed),
            overlay: config.overlay,
            increase_key: config.increase_key,
        }
    }

    #[inline]
    pub fn state(&self) -> PatternState {
        self.state
    }

    /// Renders the current state into `canvas` without touching the state.
    pub fn render(&self, canvas: &mut Canvas) {
        let seed = self.state.seed();
        canvas.fill_with(|x, y| pattern::grayscale(x, y, seed));
        self.overlay.draw(canvas);
    }

    pub fn frame(&mut self, ctx: &Context, canvas: &mut Canvas) {
        log::trace!("frame {} seed {}", ctx.current_frame(), self.state.seed());
        self.step(ctx.is_key_pressed(self.increase_key), canvas);
    }

    /// Renders this frame, then applies input. A held key only shows up in the next render.
    pub fn step(&mut self, increase_held: bool, canvas: &mut Canvas) {
        self.render(canvas);

        let next = self.state.advance(increase_held);
        if next != self.state {
            log::debug!("seed {} -> {}", self.state.seed(), next.seed());
        }
        self.state = next;
    }
}
