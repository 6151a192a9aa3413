//! Pixelated drag distortion.
//!
//! These functions mirror the fragment shader one-to-one and the shader
//! source is generated from the same constants, so the CPU side can be
//! used to reason about (and test) what ends up on screen.

use crate::pointer::Point;

/// Cells per axis of the pixelation grid.
pub const GRID_SIZE: f32 = 40.0;
/// Distance (normalized units) at which the distortion fades to zero.
pub const RADIUS: f32 = 0.3;
/// Displacement per unit of pointer movement at full strength.
pub const AMPLITUDE: f32 = 0.4;

/// GLSL `smoothstep`, including the reversed-edge form used by the shader.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Snap `uv` to the lower corner of its grid cell.
pub fn quantize(uv: Point) -> Point {
    Point::new(
        (uv.x * GRID_SIZE).floor() / GRID_SIZE,
        (uv.y * GRID_SIZE).floor() / GRID_SIZE,
    )
}

pub fn cell_center(uv: Point) -> Point {
    let g = quantize(uv);
    Point::new(g.x + 1.0 / GRID_SIZE, g.y + 1.0 / GRID_SIZE)
}

/// 1 at the pointer, 0 at `RADIUS` and beyond.
pub fn strength(dist: f32) -> f32 {
    smoothstep(RADIUS, 0.0, dist)
}

/// UV offset applied to the cell containing `uv`; points opposite the
/// pointer's movement.
pub fn offset(uv: Point, mouse: Point, prev_mouse: Point) -> Point {
    let center = cell_center(uv);
    let dir = Point::new(mouse.x - prev_mouse.x, mouse.y - prev_mouse.y);
    let dx = center.x - mouse.x;
    let dy = center.y - mouse.y;
    let s = strength((dx * dx + dy * dy).sqrt());
    Point::new(s * -dir.x * AMPLITUDE, s * -dir.y * AMPLITUDE)
}

/// Texture coordinate the fragment at `uv` samples.
pub fn displaced_uv(uv: Point, mouse: Point, prev_mouse: Point) -> Point {
    let o = offset(uv, mouse, prev_mouse);
    Point::new(uv.x - o.x, uv.y - o.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_falls_off_monotonically() {
        let mut last = strength(0.0);
        assert_eq!(last, 1.0);
        for i in 1..=400 {
            let s = strength(i as f32 * 0.001);
            assert!(s <= last, "strength rose at {}", i);
            last = s;
        }
    }

    #[test]
    fn strength_is_zero_past_radius() {
        for d in [RADIUS, 0.31, 0.5, 1.0, 10.0] {
            assert_eq!(strength(d), 0.0, "d = {d}");
        }
        assert!(strength(RADIUS - 0.01) > 0.0);
    }

    #[test]
    fn same_cell_same_offset() {
        let mouse = Point::new(0.5, 0.5);
        let prev = Point::new(0.45, 0.52);
        let a = offset(Point::new(0.501, 0.502), mouse, prev);
        let b = offset(Point::new(0.524, 0.5245), mouse, prev);
        assert_eq!(a, b);
    }

    #[test]
    fn displacement_opposes_movement() {
        let mouse = Point::new(0.5, 0.5);
        let prev = Point::new(0.4, 0.5);
        let uv = Point::new(0.5, 0.5);
        let o = offset(uv, mouse, prev);
        assert!(o.x < 0.0);
        assert_eq!(o.y, 0.0);
        // sampling shifts the other way
        assert!(displaced_uv(uv, mouse, prev).x > uv.x);
    }

    #[test]
    fn no_movement_no_offset() {
        let p = Point::new(0.3, 0.7);
        assert_eq!(offset(Point::new(0.31, 0.69), p, p), Point::new(0.0, 0.0));
    }

    #[test]
    fn cell_center_is_one_cell_past_corner() {
        let c = cell_center(Point::new(0.0, 0.0));
        assert!((c.x - 0.025).abs() < 1e-6 && (c.y - 0.025).abs() < 1e-6);
    }
}
