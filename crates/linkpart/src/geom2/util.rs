use nalgebra::Vector2;

use super::types::{BasisDir, GeomCfg, Orientation};

/// 2D cross product (z-component). Positive when `b` is counter-clockwise of `a`.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Twice the signed area of the triangle `(a, b, c)`; `cross(b − a, c − a)`.
#[inline]
pub fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Classify `c` against the directed line `a → b` with the shared tolerance.
#[inline]
pub fn orientation(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, cfg: GeomCfg) -> Orientation {
    let o = orient(a, b, c);
    if o.abs() < cfg.eps {
        Orientation::On
    } else if o > 0.0 {
        Orientation::Left
    } else {
        Orientation::Right
    }
}

/// Mathematical modulo for cyclic indices (`wrap_index(-1, 4) == 3`).
#[inline]
pub fn wrap_index(i: isize, n: usize) -> usize {
    debug_assert!(n > 0, "wrap_index on empty cycle");
    i.rem_euclid(n as isize) as usize
}

/// Signed angle of `v` in degrees, counter-clockwise from "down" (−y), in `(−180, 180]`.
#[inline]
pub fn ccw_degrees_from_down(v: Vector2<f64>) -> f64 {
    let down = Vector2::new(0.0, -1.0);
    cross(down, v).atan2(down.dot(&v)).to_degrees()
}

#[inline]
pub fn project_to_axis(p: Vector2<f64>, axis: BasisDir) -> f64 {
    match axis {
        BasisDir::X => p.x,
        BasisDir::Y => p.y,
    }
}
