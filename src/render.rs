//! Software rendering of bodies into a fading pixel buffer.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{body::Body, types::Rgb};

/// Translation from world coordinates to canvas pixels, changed by panning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewOffset {
    pub x: i64,
    pub y: i64,
}

/// Row-major RGB pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Sets one pixel; coordinates outside the canvas are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgb::BLACK);
    }

    /// Scales every pixel by `factor`, leaving fading trails behind moving bodies.
    pub fn darken(&mut self, factor: f32) {
        #[cfg(feature = "parallel")]
        self.pixels
            .par_iter_mut()
            .for_each(|pixel| *pixel = pixel.scaled(factor));

        #[cfg(not(feature = "parallel"))]
        self.pixels
            .iter_mut()
            .for_each(|pixel| *pixel = pixel.scaled(factor));
    }

    /// Moves the image one row up; the bottom row is cleared.
    pub fn shift_up(&mut self) {
        if self.height == 0 {
            return;
        }
        self.pixels.copy_within(self.width.., 0);
        let start = (self.height - 1) * self.width;
        self.pixels[start..].fill(Rgb::BLACK);
    }

    /// Moves the image one row down; the top row is cleared.
    pub fn shift_down(&mut self) {
        if self.height == 0 {
            return;
        }
        let end = (self.height - 1) * self.width;
        self.pixels.copy_within(..end, self.width);
        self.pixels[..self.width].fill(Rgb::BLACK);
    }

    /// Moves the image one column left; the rightmost column is cleared.
    pub fn shift_left(&mut self) {
        if self.width == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.copy_within(1.., 0);
            row[row.len() - 1] = Rgb::BLACK;
        }
    }

    /// Moves the image one column right; the leftmost column is cleared.
    pub fn shift_right(&mut self) {
        if self.width == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            let len = row.len();
            row.copy_within(..len - 1, 1);
            row[0] = Rgb::BLACK;
        }
    }

    /// Fills the body's disc, scanning one quadrant and mirroring it into the others.
    pub fn draw_body(&mut self, body: &Body, view: ViewOffset) {
        if !body.is_finite() {
            return;
        }
        let center_x = body.position.x + view.x as f64;
        let center_y = body.position.y + view.y as f64;
        let radius = body.radius;
        let radius_sq = radius * radius;
        let extent = radius * 1.1;

        let mut x = 0.0;
        while x <= extent {
            let mut y = 0.0;
            while y <= extent {
                if x * x + y * y < radius_sq {
                    for (dx, dy) in [(x, y), (x, -y), (-x, -y), (-x, y)] {
                        self.set(
                            (center_x + dx) as i64,
                            (center_y + dy) as i64,
                            body.color,
                        );
                    }
                }
                y += 1.0;
            }
            x += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn body_at(x: f64, y: f64, radius: f64) -> Body {
        Body::new(1.0, DVec2::new(x, y), DVec2::ZERO, RED).with_radius(radius)
    }

    #[test]
    fn out_of_bounds_writes_are_clipped() {
        let mut canvas = Canvas::new(4, 3);
        canvas.set(-1, 0, RED);
        canvas.set(4, 0, RED);
        canvas.set(0, 3, RED);
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn disc_is_symmetric_around_center() {
        let mut canvas = Canvas::new(21, 21);
        canvas.draw_body(&body_at(10.0, 10.0, 3.0), ViewOffset::default());
        assert_eq!(canvas.get(10, 10), Some(RED));
        for (x, y) in [(12, 10), (8, 10), (10, 12), (10, 8), (12, 12), (8, 8)] {
            assert_eq!(canvas.get(x, y), Some(RED), "({x}, {y})");
        }
        assert_eq!(canvas.get(14, 10), Some(Rgb::BLACK));
        assert_eq!(canvas.get(12, 13), Some(Rgb::BLACK));
    }

    #[test]
    fn view_offset_translates_drawing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_body(&body_at(0.0, 0.0, 0.5), ViewOffset { x: 3, y: 4 });
        assert_eq!(canvas.get(3, 4), Some(RED));
        assert_eq!(canvas.get(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn shifting_moves_pixels_and_clears_the_edge() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set(1, 1, RED);

        canvas.shift_right();
        assert_eq!(canvas.get(2, 1), Some(RED));
        canvas.shift_right();
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::BLACK));

        canvas.set(1, 1, RED);
        canvas.shift_up();
        assert_eq!(canvas.get(1, 0), Some(RED));
        canvas.shift_down();
        assert_eq!(canvas.get(1, 1), Some(RED));
        canvas.shift_left();
        assert_eq!(canvas.get(0, 1), Some(RED));
    }

    #[test]
    fn clear_blanks_the_canvas() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_body(&body_at(2.0, 2.0, 2.0), ViewOffset::default());
        assert!(canvas.pixels().iter().any(|&p| p == RED));
        canvas.clear();
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::BLACK));
        assert_eq!(canvas.pixels().len(), canvas.width() * canvas.height());
    }

    #[test]
    fn darken_fades_every_pixel() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(0, 0, Rgb::new(100, 100, 100));
        canvas.darken(0.5);
        assert_eq!(canvas.get(0, 0), Some(Rgb::new(50, 50, 50)));
    }
}
