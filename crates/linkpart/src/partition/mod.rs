//! Seven-point partition search.
//!
//! Purpose
//! - Given seven points in general position, find every triple of directed
//!   lines (each through two of the points) whose right half-planes put each
//!   point in a different one of the eight possible cells.
//!
//! Pipeline
//! 1. Gate on `guard::find_collinear_triple`; degenerate input searches nothing.
//! 2. Classify all 42 directed lines; keep those with a 2–3 or 1–4 split of the
//!    other five points (on-line points may be nudged), deduplicated by their
//!    normalized right-side signature.
//! 3. Enumerate unordered triples of qualifying lines whose pairs are
//!    compatible (distinct, and crossing within a bounded disk).
//! 4. Keep triples whose seven 3-bit inclusion codes are pairwise distinct.
//!
//! The pairwise bound in step 3 is a pruning heuristic; it may drop triples
//! that would otherwise partition the points.
//!
//! Code cross-refs: `geom2::{orient, orientation, line_line_intersection}`, `guard`,
//! `visibility::compose`

mod classify;
mod search;
mod types;

pub use classify::{
    all_lines, classify_line, codes_are_distinct, inclusion_codes, is_right_of, pair_compatible,
    qualifying_lines, right_mask,
};
pub use search::PartitionSearch;
pub use types::{
    DirectedLine, InclusionCode, LineClass, PartitionCfg, PartitionError, SearchOutcome, Side,
    Signature, Split, Triple, POINT_COUNT,
};
