//! Collinearity guard: detects degenerate point configurations.
//!
//! The partition search is only meaningful for points in general position, so
//! every search is gated on this check. The test is the shared cross-product
//! tolerance `|cross(p_j − p_i, p_k − p_i)| < eps` over all unordered triples.

use nalgebra::Vector2;

use crate::geom2::{orient, GeomCfg};

/// First collinear triple `(i < j < k)` in lexicographic order, if any.
pub fn find_collinear_triple(points: &[Vector2<f64>], cfg: GeomCfg) -> Option<[usize; 3]> {
    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if orient(points[i], points[j], points[k]).abs() < cfg.eps {
                    return Some([i, j, k]);
                }
            }
        }
    }
    None
}

#[inline]
pub fn has_collinear_triple(points: &[Vector2<f64>], cfg: GeomCfg) -> bool {
    find_collinear_triple(points, cfg).is_some()
}
