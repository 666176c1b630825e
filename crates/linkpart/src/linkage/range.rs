//! Closed-form pieces of the drag solver.
//!
//! - `possible_opposite_positions`: the two mirror placements of the opposite joint.
//! - `compute_angular_range`: forbidden wedges for the adjacent joint around a pivot.
//!
//! Both are pure functions of positions (and snapshot lengths) so they can be
//! tested and benchmarked without a `Linkage`.

use nalgebra::Vector2;

use super::types::{AngleRange, AngleRanges, RangeKind};
use crate::geom2::{ccw_degrees_from_down, circle_circle_intersection};

/// Placements of the opposite joint at distance `d_ao` from `adjacent` and
/// `d_oa2` from `alternative`.
///
/// Returns `None` unless `|d_ao − d_oa2| <= |adjacent − alternative| <= d_ao + d_oa2`,
/// or when the two anchors coincide. The first point lies counter-clockwise of
/// `adjacent → alternative`; the second is its mirror image across that line.
pub fn possible_opposite_positions(
    adjacent: Vector2<f64>,
    alternative: Vector2<f64>,
    d_ao: f64,
    d_oa2: f64,
) -> Option<[Vector2<f64>; 2]> {
    let d = (alternative - adjacent).norm();
    let chord = circle_circle_intersection(d, d_ao, d_oa2)?;
    chord.points(adjacent, alternative)
}

/// Directions from `pivot` the adjacent joint cannot reach while the chain
/// `adjacent → opposite → alternative` keeps its current bar lengths.
///
/// The adjacent joint moves on the circle of radius `r = |adjacent − pivot|`.
/// Its distance to `alternative` must stay within `[|d_ao − d_oa2|, d_ao + d_oa2]`.
/// Each bound cuts the circle where it meets the circle around `alternative`;
/// the half-angle `θ` of that cut, seen from the pivot against the
/// `pivot → alternative` axis, sizes the wedge:
///
/// - `Max`: centred opposite the alternative joint, width `360° − 2θ`.
/// - `Min`: centred on the alternative joint, width `2θ`.
///
/// A wedge is hidden when its bound never binds (no intersection) or when the
/// pivot and alternative joint coincide.
pub fn compute_angular_range(
    pivot: Vector2<f64>,
    adjacent: Vector2<f64>,
    opposite: Vector2<f64>,
    alternative: Vector2<f64>,
) -> AngleRanges {
    let axis = alternative - pivot;
    let d = axis.norm();
    let r = (adjacent - pivot).norm();
    let d_ao = (opposite - adjacent).norm();
    let d_oa2 = (alternative - opposite).norm();

    let max = match circle_circle_intersection(d, r, d_ao + d_oa2) {
        Some(chord) => AngleRange {
            center_deg: ccw_degrees_from_down(-axis),
            width_deg: 360.0 - 2.0 * chord.half_angle().to_degrees(),
            visible: true,
            kind: RangeKind::Max,
        },
        None => AngleRange::hidden(RangeKind::Max),
    };
    let min = match circle_circle_intersection(d, r, (d_ao - d_oa2).abs()) {
        Some(chord) => AngleRange {
            center_deg: ccw_degrees_from_down(axis),
            width_deg: 2.0 * chord.half_angle().to_degrees(),
            visible: true,
            kind: RangeKind::Min,
        },
        None => AngleRange::hidden(RangeKind::Min),
    };
    AngleRanges { max, min }
}
