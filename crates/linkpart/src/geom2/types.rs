//! Basic 2D types and the shared tolerance.
//!
//! - `GeomCfg`: one epsilon for every on-line / parallel / collinear / degenerate test.
//! - `CircleChord`: the `(x, y)` pair describing a circle-circle intersection.
//! - `BasisDir`, `Interval1`: axis-projected containment used by segment hit-tests.
//! - `Orientation`: three-way side classification of a point against a directed line.
//!
//! Code cross-refs: `solvers::{circle_circle_intersection, segment_contains_projection}`

use nalgebra::Vector2;

/// Geometry configuration (tolerance).
///
/// A single `eps` backs every predicate in the crate so that "on the line",
/// "parallel" and "collinear" can never disagree with each other. It is compared
/// against raw cross products (twice the signed triangle area), not distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub eps: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps: 1e-6 }
    }
}

impl GeomCfg {
    #[inline]
    pub fn with_eps(eps: f64) -> Self {
        Self { eps }
    }
}

/// Result of intersecting two circles, expressed in the baseline frame.
///
/// `x` is the signed distance from the first centre along the baseline to the
/// chord midpoint, `y` is half the chord length (always `>= 0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleChord {
    pub x: f64,
    pub y: f64,
}

impl CircleChord {
    /// Both intersection points in world space.
    ///
    /// `origin` is the centre of the first circle, `toward` the centre of the
    /// second. The first returned point lies counter-clockwise of the baseline.
    /// Returns `None` when the two centres coincide.
    pub fn points(&self, origin: Vector2<f64>, toward: Vector2<f64>) -> Option<[Vector2<f64>; 2]> {
        let baseline = toward - origin;
        let len = baseline.norm();
        if !len.is_finite() || len <= 0.0 {
            return None;
        }
        let u = baseline / len;
        let perp = Vector2::new(-u.y, u.x);
        let mid = origin + u * self.x;
        Some([mid + perp * self.y, mid - perp * self.y])
    }

    /// Angle at the first centre between the baseline and either intersection, in radians.
    #[inline]
    pub fn half_angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Coordinate axis used for 1D projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasisDir {
    X,
    Y,
}

/// Closed interval `[lo, hi]` on a coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval1 {
    pub lo: f64,
    pub hi: f64,
}

impl Interval1 {
    /// Interval spanned by two values in any order.
    #[inline]
    pub fn spanning(a: f64, b: f64) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.lo <= t && t <= self.hi
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Side of a directed line `a → b` on which a point lies.
///
/// `Left` means counter-clockwise (positive cross product).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
    On,
}
