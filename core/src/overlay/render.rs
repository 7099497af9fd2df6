use crate::overlay::io::Frame;

pub type Rgb = [u8; 3];

pub const MARKER_COLOR: Rgb = [255, 0, 0];
pub const PATH_COLOR: Rgb = [0, 0, 255];

/// Raster primitives for the fixation overlay. All coordinates are clipped
/// to the frame; markers partially off-screen draw their visible part.
pub struct Painter;

impl Painter {
    pub fn put_pixel(frame: &mut Frame, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= frame.width as i64 || y >= frame.height as i64 {
            return;
        }
        let idx = (y as usize * frame.width + x as usize) * 3;
        frame.data[idx..idx + 3].copy_from_slice(&color);
    }

    /// Small filled marker at the fixation center.
    pub fn draw_disc(frame: &mut Frame, cx: i64, cy: i64, radius: i64, color: Rgb) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    Self::put_pixel(frame, cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// One-pixel circle outline, midpoint algorithm.
    pub fn draw_ring(frame: &mut Frame, cx: i64, cy: i64, radius: i64, color: Rgb) {
        let mut x = radius;
        let mut y = 0i64;
        let mut err = 1 - radius;
        while x >= y {
            for &(px, py) in &[
                (cx + x, cy + y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx - x, cy + y),
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
            ] {
                Self::put_pixel(frame, px, py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Bresenham line between two markers.
    pub fn draw_line(frame: &mut Frame, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            Self::put_pixel(frame, x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * frame.width + x) * 3;
        [frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]]
    }

    #[test]
    fn put_pixel_clips_out_of_bounds_coordinates() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0]);
        let before = frame.data.clone();
        Painter::put_pixel(&mut frame, -1, 0, MARKER_COLOR);
        Painter::put_pixel(&mut frame, 0, 10, MARKER_COLOR);
        assert_eq!(frame.data, before);
    }

    #[test]
    fn disc_fills_its_center() {
        let mut frame = Frame::filled(16, 16, [0, 0, 0]);
        Painter::draw_disc(&mut frame, 8, 8, 2, MARKER_COLOR);
        assert_eq!(pixel(&frame, 8, 8), MARKER_COLOR);
        assert_eq!(pixel(&frame, 8, 10), MARKER_COLOR);
        assert_eq!(pixel(&frame, 8, 11), [0, 0, 0]);
    }

    #[test]
    fn ring_leaves_the_center_untouched() {
        let mut frame = Frame::filled(32, 32, [0, 0, 0]);
        Painter::draw_ring(&mut frame, 16, 16, 8, MARKER_COLOR);
        assert_eq!(pixel(&frame, 16, 16), [0, 0, 0]);
        assert_eq!(pixel(&frame, 24, 16), MARKER_COLOR);
        assert_eq!(pixel(&frame, 16, 8), MARKER_COLOR);
    }

    #[test]
    fn line_connects_both_endpoints() {
        let mut frame = Frame::filled(16, 16, [0, 0, 0]);
        Painter::draw_line(&mut frame, 2, 3, 12, 9, PATH_COLOR);
        assert_eq!(pixel(&frame, 2, 3), PATH_COLOR);
        assert_eq!(pixel(&frame, 12, 9), PATH_COLOR);
    }
}
