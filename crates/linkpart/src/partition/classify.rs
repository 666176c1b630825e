//! Per-line and per-pair predicates over a fixed 7-point set.
//!
//! Two notions of "side" coexist on purpose:
//! - `classify_line` uses the shared eps, so near-line points count as `On`
//!   and may be nudged to either side when deciding whether a line qualifies.
//! - Signatures and inclusion codes use the exact test `cross <= 0`, so the
//!   defining points (cross = 0) always land in the right half-plane.

use nalgebra::Vector2;

use super::types::{
    DirectedLine, InclusionCode, LineClass, PartitionCfg, Side, Signature, Split, POINT_COUNT,
};
use crate::geom2::{line_line_intersection, orient, orientation};

/// All ordered pairs `(i, j)`, `i != j`, in row-major order.
pub fn all_lines() -> Vec<DirectedLine> {
    (0..POINT_COUNT)
        .flat_map(|i| {
            (0..POINT_COUNT)
                .filter(move |&j| j != i)
                .map(move |j| DirectedLine::new(i, j))
        })
        .collect()
}

/// Closed right half-plane test: `cross(to − from, p − from) <= 0`.
#[inline]
pub fn is_right_of(points: &[Vector2<f64>; POINT_COUNT], line: DirectedLine, p: Vector2<f64>) -> bool {
    orient(points[line.from], points[line.to], p) <= 0.0
}

/// Bit mask of the points in the closed right half-plane of `line`.
pub fn right_mask(points: &[Vector2<f64>; POINT_COUNT], line: DirectedLine) -> u8 {
    points
        .iter()
        .enumerate()
        .filter(|&(_, p)| is_right_of(points, line, *p))
        .fold(0u8, |m, (k, _)| m | (1 << k))
}

/// Count the five other points left / right / on `line` and derive its signature.
pub fn classify_line(
    points: &[Vector2<f64>; POINT_COUNT],
    line: DirectedLine,
    cfg: PartitionCfg,
) -> LineClass {
    let (a, b) = (points[line.from], points[line.to]);
    let mut split = Split::default();
    for (k, &p) in points.iter().enumerate() {
        if k == line.from || k == line.to {
            continue;
        }
        match orientation(a, b, p, cfg.geom) {
            Side::Left => split.left += 1,
            Side::Right => split.right += 1,
            Side::On => split.on += 1,
        }
    }
    LineClass {
        line,
        split,
        qualifies: split.qualifies(),
        signature: Signature::from_right_mask(right_mask(points, line)),
    }
}

/// Qualifying lines in row-major order, keeping only the first line of each signature.
pub fn qualifying_lines(points: &[Vector2<f64>; POINT_COUNT], cfg: PartitionCfg) -> Vec<LineClass> {
    let mut seen = [false; 1 << POINT_COUNT];
    let mut out = Vec::new();
    for line in all_lines() {
        let class = classify_line(points, line, cfg);
        if class.qualifies && !seen[class.signature.0 as usize] {
            seen[class.signature.0 as usize] = true;
            out.push(class);
        }
    }
    out
}

/// Whether two lines may appear together in a triple.
///
/// Lines must differ, must not share both defining points, and unless they are
/// parallel must cross within `bounds_factor · max |p|` of the origin.
pub fn pair_compatible(
    points: &[Vector2<f64>; POINT_COUNT],
    a: DirectedLine,
    b: DirectedLine,
    cfg: PartitionCfg,
) -> bool {
    if a == b || a.same_endpoints(b) {
        return false;
    }
    match line_line_intersection(
        points[a.from],
        points[a.to],
        points[b.from],
        points[b.to],
        cfg.geom,
    ) {
        None => true,
        Some(x) => {
            let reach = points.iter().map(|p| p.norm()).fold(0.0, f64::max);
            x.norm() <= cfg.bounds_factor * reach
        }
    }
}

/// Code of every point against the right half-planes of `lines`.
pub fn inclusion_codes(
    points: &[Vector2<f64>; POINT_COUNT],
    lines: [DirectedLine; 3],
) -> [InclusionCode; POINT_COUNT] {
    let mut codes = [InclusionCode(0); POINT_COUNT];
    for (code, &p) in codes.iter_mut().zip(points.iter()) {
        for (bit, &line) in lines.iter().enumerate() {
            if is_right_of(points, line, p) {
                code.0 |= 1 << bit;
            }
        }
    }
    codes
}

/// Seven codes out of eight possible cells: distinct means one point per cell.
pub fn codes_are_distinct(codes: &[InclusionCode; POINT_COUNT]) -> bool {
    let mut seen = 0u8;
    for c in codes {
        let bit = 1u8 << (c.0 & 0b111);
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}
