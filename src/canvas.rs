use crate::overlay::Rect;

/// Row-major RGB pixel buffer that gets uploaded to the window every frame.
pub struct Canvas {
    width: u32,
    height: u32,

    pixels: Vec<[u8; 3]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// The pixels as tightly packed RGB bytes, as uploaded to the texture.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::must_cast_slice::<[u8; 3], u8>(&self.pixels)
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((x + y * self.width as i64) as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes a single pixel. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: [u8; 3]) {
        self.pixels.fill(color);
    }

    /// Recomputes every pixel from its coordinates.
    pub fn fill_with<F>(&mut self, mut color_at: F)
    where
        F: FnMut(i64, i64) -> [u8; 3],
    {
        let width = self.width as usize;
        if width == 0 {
            return;
        }
        for (y, row) in self.pixels.chunks_exact_mut(width).enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = color_at(x as i64, y as i64);
            }
        }
    }

    /// Draws the outline of `rect` with a stroke growing inwards from its edges,
    /// clipped to the canvas.
    pub fn stroke_rect(&mut self, rect: &Rect, stroke: u32, color: [u8; 3]) {
        let (x0, y0, x1, y1) = rect.normalized();
        let stroke = stroke as i64;

        let clip_x = (x0.max(0), x1.min(self.width as i64));
        let clip_y = (y0.max(0), y1.min(self.height as i64));

        for y in clip_y.0..clip_y.1 {
            for x in clip_x.0..clip_x.1 {
                let on_edge =
                    x < x0 + stroke || x >= x1 - stroke || y < y0 + stroke || y >= y1 - stroke;
                if on_edge {
                    self.set(x, y, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];

    #[test]
    fn bytes_are_packed_rgb() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set(1, 0, [1, 2, 3]);
        assert_eq!(canvas.as_bytes(), &[0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn out_of_bounds_access() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set(-1, 0, RED);
        canvas.set(4, 0, RED);
        canvas.set(0, 4, RED);
        assert!(canvas.pixels().iter().all(|p| *p == [0; 3]));
        assert_eq!(canvas.get(4, 0), None);
        assert_eq!(canvas.get(3, 3), Some([0; 3]));
    }

    #[test]
    fn fill_with_visits_row_major() {
        let mut canvas = Canvas::new(3, 2);
        canvas.fill_with(|x, y| [x as u8, y as u8, 0]);
        assert_eq!(canvas.get(2, 1), Some([2, 1, 0]));
        assert_eq!(canvas.pixels()[5], [2, 1, 0]);
        assert_eq!(canvas.pixels()[1], [1, 0, 0]);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut canvas = Canvas::new(20, 20);
        canvas.stroke_rect(&Rect::new(2, 2, 12, 12), 3, RED);

        for (x, y) in [(2, 2), (4, 7), (11, 11), (7, 9), (9, 2)] {
            assert_eq!(canvas.get(x, y), Some(RED), "({x}, {y})");
        }
        for (x, y) in [(5, 5), (8, 8), (5, 8), (1, 1), (12, 12), (13, 5)] {
            assert_eq!(canvas.get(x, y), Some([0; 3]), "({x}, {y})");
        }
    }

    #[test]
    fn stroke_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.stroke_rect(&Rect::new(-5, -5, 5, 50), 3, RED);
        // The left and top edges sit off-canvas, only the right edge is visible.
        assert_eq!(canvas.get(0, 0), Some([0; 3]));
        assert_eq!(canvas.get(2, 0), Some(RED));
        assert_eq!(canvas.get(4, 9), Some(RED));
        assert_eq!(canvas.get(1, 5), Some([0; 3]));
        assert_eq!(canvas.get(5, 0), Some([0; 3]));
    }
}
