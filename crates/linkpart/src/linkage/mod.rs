//! Linkage solver: closed chains of rigid bars with constrained drags.
//!
//! Purpose
//! - Hold the joint positions of a 4- or 7-joint closed chain and let a caller
//!   rotate one bar about a joint while the rest of the chain follows, without
//!   ever changing a bar length.
//! - Report the angular wedges around the pivot where the dragged bar cannot go.
//!
//! Model
//! - A drag moves two joints: `adjacent` (on a circle about the pivot) and
//!   `opposite` (closing the triangle `adjacent, opposite, alternative`).
//!   All other joints stay fixed.
//! - The opposite joint has two mirror placements; the solver keeps the one
//!   nearest the previous accepted frame so motion stays continuous.
//! - Steps with no placement are held, not errors.
//!
//! Code cross-refs: `geom2::{circle_circle_intersection, segment_contains_projection}`

mod range;
mod solver;
mod types;

pub use range::{compute_angular_range, possible_opposite_positions};
pub use solver::Linkage;
pub use types::{
    AngleRange, AngleRanges, BarSegment, DragOutcome, HalfBar, HalfBarId, Hover, JointId,
    LinkageCfg, LinkageError, RangeKind, SUPPORTED_JOINT_COUNTS,
};

#[cfg(test)]
mod tests;
