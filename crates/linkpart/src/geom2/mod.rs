//! Planar geometry kernel shared by the linkage solver and the partition search.
//!
//! Purpose
//! - Provide the handful of exact-formula primitives both engines need:
//!   circle-circle chords, line intersection, projections, orientation tests.
//! - Keep every tolerance behind one `GeomCfg::eps` so "on line", "parallel"
//!   and "collinear" always agree.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`; the plane is z = 0 implicitly.
//! - `orient(a, b, c) > 0` means `c` is left of (counter-clockwise from) `a → b`.
//! - Angles handed to renderers are degrees counter-clockwise from "down".
//!
//! Code cross-refs: `crate::linkage`, `crate::partition`, `crate::guard`

pub mod rand;
mod solvers;
mod types;
mod util;

pub use solvers::{
    best_projection_axis, circle_circle_intersection, line_line_intersection,
    nearest_point_on_line, nearest_point_on_segment, segment_contains_projection,
};
pub use types::{BasisDir, CircleChord, GeomCfg, Interval1, Orientation};
pub use util::{ccw_degrees_from_down, cross, orient, orientation, project_to_axis, wrap_index};
