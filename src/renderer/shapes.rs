//! Draw commands and their triangle expansion

use glam::Vec2;

use super::vertex::{Rgba, Vertex, to_linear};

/// Filled axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Rgba,
}

impl DrawRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: Rgba) -> Self {
        Self { x, y, w, h, color }
    }

    /// Square of side `size` centred on a point
    pub fn centered(center: Vec2, size: f32, color: Rgba) -> Self {
        let half = size * 0.5;
        Self::new(center.x - half, center.y - half, size, size, color)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.x + self.w && point.y >= self.y && point.y < self.y + self.h
    }
}

/// Two triangles covering a rectangle
pub fn rect(rect: &DrawRect) -> [Vertex; 6] {
    let color = to_linear(rect.color);
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.w, rect.y + rect.h);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Triangle list for a batch of rectangles, in draw order
pub fn triangles(rects: &[DrawRect]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(rects.len() * 6);
    for r in rects {
        vertices.extend_from_slice(&rect(r));
    }
    vertices
}

/// Dotted line from `start` along `dir`, one `thickness` square per step
pub fn dotted_line(start: Vec2, dir: Vec2, length: f32, thickness: f32, color: Rgba) -> Vec<DrawRect> {
    let dir = dir.normalize_or_zero();
    let steps = (length / thickness).ceil().max(1.0) as u32;
    (1..=steps)
        .map(|i| {
            let t = (i as f32 * thickness).min(length);
            DrawRect::centered(start + dir * t, thickness, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::vertex::colors;

    #[test]
    fn test_rect_corners() {
        let r = DrawRect::new(1.0, 2.0, 3.0, 4.0, colors::FLOOR);
        let v = rect(&r);
        assert_eq!(v[0].position, [1.0, 2.0]);
        assert_eq!(v[5].position, [4.0, 6.0]);
        assert_eq!(triangles(&[r, r]).len(), 12);
    }

    #[test]
    fn test_dotted_line_reaches_length() {
        let dots = dotted_line(Vec2::ZERO, Vec2::X, 20.0, 2.0, colors::HEADING);
        assert_eq!(dots.len(), 10);
        let last = dots[dots.len() - 1];
        assert!(last.contains(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_centered_square() {
        let r = DrawRect::centered(Vec2::new(10.0, 10.0), 8.0, colors::PLAYER);
        assert_eq!((r.x, r.y, r.w, r.h), (6.0, 6.0, 8.0, 8.0));
    }
}
