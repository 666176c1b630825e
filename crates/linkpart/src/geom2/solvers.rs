//! Small 2D solvers shared by the linkage and partition engines.
//!
//! - `circle_circle_intersection`: law-of-cosines chord of two circles.
//! - `line_line_intersection`: infinite lines, eps-aware parallel rejection.
//! - `nearest_point_on_line` / `nearest_point_on_segment`: orthogonal projections.
//! - `best_projection_axis` / `segment_contains_projection`: robust segment hit-test.
//!
//! Code cross-refs: `types::{CircleChord, BasisDir, Interval1, GeomCfg}`
use nalgebra::Vector2;

use super::types::{BasisDir, CircleChord, GeomCfg, Interval1};
use super::util::{cross, project_to_axis};

/// Intersect a circle of radius `r1` around the origin with a circle of radius
/// `r2` around a centre at distance `d` along the baseline.
///
/// Definition
/// - `x = (d² + r1² − r2²) / (2d)`, `y = sqrt(max(0, r1² − x²))`.
/// - Intersections exist iff `|r1 − r2| <= d <= r1 + r2` (triangle inequality on
///   the three lengths). Tangency yields `y = 0`.
/// - `d <= 0` (concentric circles) has no chord and returns `None`, even for equal radii.
pub fn circle_circle_intersection(d: f64, r1: f64, r2: f64) -> Option<CircleChord> {
    if !(d.is_finite() && r1.is_finite() && r2.is_finite()) || d <= 0.0 {
        return None;
    }
    if d < (r1 - r2).abs() || d > r1 + r2 {
        return None;
    }
    let x = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let y = (r1 * r1 - x * x).max(0.0).sqrt();
    Some(CircleChord { x, y })
}

/// Intersection of the infinite lines `p1p2` and `q1q2`; `None` when parallel
/// (`|cross(p2 − p1, q2 − q1)| < eps`).
pub fn line_line_intersection(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<Vector2<f64>> {
    let d1 = p2 - p1;
    let d2 = q2 - q1;
    let denom = cross(d1, d2);
    if denom.abs() < cfg.eps {
        return None;
    }
    let t = cross(q1 - p1, d2) / denom;
    Some(p1 + d1 * t)
}

/// Orthogonal projection of `p` onto the infinite line through `a` and `b`.
/// A zero-length line projects everything onto `a`.
pub fn nearest_point_on_line(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Vector2<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a;
    }
    a + ab * ((p - a).dot(&ab) / len2)
}

/// Closest point to `p` on the closed segment `[a, b]`.
pub fn nearest_point_on_segment(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> Vector2<f64> {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Axis with the larger extent of segment `[a, b]`; `None` for a degenerate segment.
pub fn best_projection_axis(a: Vector2<f64>, b: Vector2<f64>, cfg: GeomCfg) -> Option<BasisDir> {
    let d = b - a;
    if d.norm() < cfg.eps {
        return None;
    }
    if d.x.abs() >= d.y.abs() {
        Some(BasisDir::X)
    } else {
        Some(BasisDir::Y)
    }
}

/// Project `p` onto the line through `[a, b]` and accept only when the
/// projection falls inside the segment's interval on its best axis.
///
/// Returns the projected point and its distance to `p`. Degenerate segments
/// fall back to the `Y` axis so that a collapsed bar can still be picked at
/// its endpoint.
pub fn segment_contains_projection(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
    cfg: GeomCfg,
) -> Option<(Vector2<f64>, f64)> {
    let axis = best_projection_axis(a, b, cfg).unwrap_or_else(|| {
        tracing::warn!(?a, ?b, "degenerate segment in hit-test");
        BasisDir::Y
    });
    let q = nearest_point_on_line(p, a, b);
    let span = Interval1::spanning(project_to_axis(a, axis), project_to_axis(b, axis));
    if span.contains(project_to_axis(q, axis)) {
        Some((q, (q - p).norm()))
    } else {
        None
    }
}
