//! Shape generation for 2D primitives
//!
//! All coordinates are canvas pixels with y growing downward, so positive
//! rotation turns clockwise on screen.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Push a quad as two triangles
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, c, b, d] {
        out.push(Vertex::new(p.x, p.y, color));
    }
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    quad(
        out,
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ],
        color,
    );
}

/// Rectangle drawn in a frame translated to `origin` and rotated by `angle`
///
/// `offset` and `size` are in the rotated frame, like a canvas
/// `translate` + `rotate` + `fillRect` sequence.
pub fn rotated_rect(
    out: &mut Vec<Vertex>,
    origin: Vec2,
    angle: f32,
    offset: Vec2,
    size: Vec2,
    color: [f32; 4],
) {
    let rot = Vec2::from_angle(angle);
    let corner = |local: Vec2| origin + rot.rotate(local);
    quad(
        out,
        [
            corner(offset),
            corner(offset + Vec2::new(size.x, 0.0)),
            corner(offset + Vec2::new(0.0, size.y)),
            corner(offset + size),
        ],
        color,
    );
}

/// Filled wedge from `start` to `end` radians (canvas `arc` convention)
pub fn sector(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) {
    let span = end - start;
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    sector(out, center, radius, 0.0, 2.0 * PI, color, segments);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_covers_its_box() {
        let mut out = Vec::new();
        rect(&mut out, 10.0, 20.0, 30.0, 4.0, [1.0; 4]);
        assert_eq!(out.len(), 6);
        let (min, max) = bounds(&out);
        assert_eq!(min, Vec2::new(10.0, 20.0));
        assert_eq!(max, Vec2::new(40.0, 24.0));
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        let mut out = Vec::new();
        // A 5x15 limb hanging from (100, 100), turned a quarter clockwise
        rotated_rect(
            &mut out,
            Vec2::new(100.0, 100.0),
            PI / 2.0,
            Vec2::ZERO,
            Vec2::new(5.0, 15.0),
            [1.0; 4],
        );
        let (min, max) = bounds(&out);
        assert!((min.x - 85.0).abs() < 1e-4);
        assert!((max.x - 100.0).abs() < 1e-4);
        assert!((min.y - 100.0).abs() < 1e-4);
        assert!((max.y - 105.0).abs() < 1e-4);
    }

    #[test]
    fn test_upper_half_sector_stays_above_center() {
        let mut out = Vec::new();
        sector(&mut out, Vec2::new(0.0, 0.0), 10.0, PI, 2.0 * PI, [1.0; 4], 12);
        assert_eq!(out.len(), 36);
        assert!(out.iter().all(|v| v.position[1] <= 1e-4));
    }

    #[test]
    fn test_circle_radius() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::new(5.0, 5.0), 3.0, [1.0; 4], 16);
        let (min, max) = bounds(&out);
        assert!((min.x - 2.0).abs() < 1e-4 && (max.x - 8.0).abs() < 1e-4);
    }
}
