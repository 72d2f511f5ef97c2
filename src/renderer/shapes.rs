//! Rectangle tessellation

use glam::Vec2;

use super::vertex::{Color, Vertex};
use crate::sim::Rect;

/// Two triangles covering a filled rectangle (pixel coordinates)
pub fn rect(r: &Rect, color: Color) -> [Vertex; 6] {
    let top_left = Vec2::new(r.left(), r.top());
    let top_right = Vec2::new(r.right(), r.top());
    let bottom_left = Vec2::new(r.left(), r.bottom());
    let bottom_right = Vec2::new(r.right(), r.bottom());

    [top_left, bottom_left, top_right, top_right, bottom_left, bottom_right].map(|p| Vertex::at(p, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let r = Rect::new(10.0, 20.0, 5.0, 8.0);
        let verts = rect(&r, [1.0; 4]);

        let min = verts.iter().map(Vertex::point).reduce(Vec2::min).unwrap();
        let max = verts.iter().map(Vertex::point).reduce(Vec2::max).unwrap();
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(15.0, 28.0));
        assert!(verts.iter().all(|v| v.color == [1.0; 4]));
    }
}
