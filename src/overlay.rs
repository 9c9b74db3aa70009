use crate::canvas::Canvas;

/// Price of a single unit of area in the startup diagnostic.
pub const PRICE_PER_UNIT: f64 = 0.0338;

/// Axis-aligned rectangle given by its bounds, which is how its area is measured.
///
/// The overlay reuses the same four numbers as an origin plus a size when it
/// draws, see [`Rect::drawn_bounds`].
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub struct Rect {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl Rect {
    pub const fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Bounds with min/max swapped into order.
    pub fn normalized(&self) -> (i64, i64, i64, i64) {
        (
            self.xmin.min(self.xmax),
            self.ymin.min(self.ymax),
            self.xmin.max(self.xmax),
            self.ymin.max(self.ymax),
        )
    }

    /// `(xmin, ymin)` taken as the origin and `(xmax, ymax)` as the width and height.
    pub fn drawn_bounds(&self) -> Rect {
        Rect::new(
            self.xmin,
            self.ymin,
            self.xmin + self.xmax,
            self.ymin + self.ymax,
        )
    }

    pub fn area(&self) -> u64 {
        self.xmax.abs_diff(self.xmin) * self.ymax.abs_diff(self.ymin)
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }

    /// Whether our min corner or our max corner lies inside `other`, bounds inclusive.
    ///
    /// This is not a full intersection test: a rectangle that only crosses
    /// `other` along an edge, or whose other two corners are inside, does not count.
    pub fn corner_within(&self, other: &Rect) -> bool {
        other.contains(self.xmin, self.ymin) || other.contains(self.xmax, self.ymax)
    }
}

/// The fixed outline drawn over the pattern each frame.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Overlay {
    pub rect: Rect,
    pub stroke: u32,
    pub color: [u8; 3],
}

impl Overlay {
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.stroke_rect(&self.rect.drawn_bounds(), self.stroke, self.color);
    }

    pub fn price(&self) -> f64 {
        self.rect.area() as f64 * PRICE_PER_UNIT
    }

    /// One-line summary printed at startup.
    pub fn diagnostic(&self) -> String {
        format!(
            "This region is {} gwei or ${}",
            self.rect.area(),
            self.price()
        )
    }
}
