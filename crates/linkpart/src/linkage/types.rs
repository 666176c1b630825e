//! Data types for the linkage solver.
//!
//! Kept small and explicit so `solver` and `range` read top to bottom.

use std::fmt;

use nalgebra::Vector2;

use crate::geom2::{ccw_degrees_from_down, wrap_index, GeomCfg};

/// Joint counts the solver accepts.
pub const SUPPORTED_JOINT_COUNTS: [usize; 2] = [4, 7];

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JointId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfBarId(pub usize);

/// The pickable half of bar `(pivot, adjacent)` that touches the pivot, plus the
/// two joints further along the chain in the same direction.
///
/// Dragging a half-bar rotates `adjacent` about `pivot` and re-solves `opposite`
/// so that the chain `adjacent → opposite → alternative` keeps its lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfBar {
    pub pivot: JointId,
    pub adjacent: JointId,
    pub opposite: JointId,
    pub alternative: JointId,
}

impl HalfBar {
    /// Half-bar of joint `i` walking the chain forwards (`2i`) or backwards (`2i + 1`).
    pub fn around(i: usize, n: usize, forward: bool) -> Self {
        let step: isize = if forward { 1 } else { -1 };
        let at = |k: isize| JointId(wrap_index(i as isize + step * k, n));
        Self {
            pivot: at(0),
            adjacent: at(1),
            opposite: at(2),
            alternative: at(3),
        }
    }
}

/// Rendered extent of one half-bar: from the pivot to the bar midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSegment {
    pub half_bar: HalfBarId,
    pub origin: Vector2<f64>,
    /// Unit direction towards the adjacent joint (zero for a collapsed bar).
    pub direction: Vector2<f64>,
    pub half_length: f64,
}

impl BarSegment {
    #[inline]
    pub fn end(&self) -> Vector2<f64> {
        self.origin + self.direction * self.half_length
    }
}

/// Which distance bound a range comes from; doubles as the colour hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeKind {
    /// `|adjacent − alternative|` would exceed `d_ao + d_oa2`.
    Max,
    /// `|adjacent − alternative|` would drop below `|d_ao − d_oa2|`.
    Min,
}

/// Forbidden wedge of directions for the adjacent joint, seen from the pivot.
///
/// `center_deg` is measured counter-clockwise from "down"; `width_deg` is the
/// full opening angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    pub center_deg: f64,
    pub width_deg: f64,
    pub visible: bool,
    pub kind: RangeKind,
}

impl AngleRange {
    #[inline]
    pub fn hidden(kind: RangeKind) -> Self {
        Self {
            center_deg: 0.0,
            width_deg: 0.0,
            visible: false,
            kind,
        }
    }

    #[inline]
    pub fn half_width_deg(&self) -> f64 {
        0.5 * self.width_deg
    }

    /// Visible and wider than `tol_deg`.
    #[inline]
    pub fn is_restrictive(&self, tol_deg: f64) -> bool {
        self.visible && self.width_deg > tol_deg
    }

    /// Whether direction `v` (from the pivot) falls inside the wedge.
    pub fn contains_direction(&self, v: Vector2<f64>) -> bool {
        if !self.visible {
            return false;
        }
        let diff = (ccw_degrees_from_down(v) - self.center_deg + 540.0).rem_euclid(360.0) - 180.0;
        diff.abs() <= self.half_width_deg()
    }
}

/// The two wedges displayed at a pivot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRanges {
    pub max: AngleRange,
    pub min: AngleRange,
}

impl AngleRanges {
    pub fn hidden() -> Self {
        Self {
            max: AngleRange::hidden(RangeKind::Max),
            min: AngleRange::hidden(RangeKind::Min),
        }
    }
}

/// Solver configuration (pick radii, scroll response, tolerance).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkageCfg {
    /// Pointer distance within which a joint is hovered, at zoom 1.
    pub joint_pick_radius: f64,
    /// Pointer distance within which a half-bar is hovered, at zoom 1.
    pub bar_pick_radius: f64,
    /// Length change per unit of scroll input.
    pub length_step: f64,
    /// Scroll magnitudes at or below this are ignored.
    pub scroll_dead_zone: f64,
    pub geom: GeomCfg,
}

impl Default for LinkageCfg {
    fn default() -> Self {
        Self {
            joint_pick_radius: 0.1,
            bar_pick_radius: 0.1,
            length_step: 0.1,
            scroll_dead_zone: 0.01,
            geom: GeomCfg::default(),
        }
    }
}

impl LinkageCfg {
    /// Pick radii follow the camera zoom so hovering feels the same at every scale.
    pub fn scaled(self, zoom: f64) -> Self {
        Self {
            joint_pick_radius: self.joint_pick_radius * zoom,
            bar_pick_radius: self.bar_pick_radius * zoom,
            ..self
        }
    }
}

/// What the pointer is currently over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hover {
    Joint(JointId),
    HalfBar(HalfBarId),
    Nothing,
}

/// Result of one constrained drag step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    /// Both free joints moved to a consistent placement.
    Applied {
        adjacent: Vector2<f64>,
        opposite: Vector2<f64>,
    },
    /// No consistent placement exists; the last valid state was kept.
    Held,
    /// No bar drag is in progress.
    Idle,
}

/// Snapshot taken when a bar drag begins, plus the continuity memory.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BarDrag {
    pub half_bar: HalfBarId,
    pub pivot: Vector2<f64>,
    pub adjacent: Vector2<f64>,
    pub opposite: Vector2<f64>,
    pub alternative: Vector2<f64>,
    pub d_pa: f64,
    pub d_ao: f64,
    pub d_oa2: f64,
    pub last_adjacent: Vector2<f64>,
    pub last_opposite: Vector2<f64>,
}

/// Errors surfaced by the linkage solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkageError {
    /// Joint count is not one of `SUPPORTED_JOINT_COUNTS`.
    UnsupportedJointCount(usize),
    /// Number of initial positions differs from the configured joint count.
    WrongJointCount { expected: usize, got: usize },
    UnknownJoint(JointId),
    UnknownHalfBar(HalfBarId),
}

impl fmt::Display for LinkageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkageError::UnsupportedJointCount(n) => write!(
                f,
                "unsupported joint count {n} (expected one of {SUPPORTED_JOINT_COUNTS:?})"
            ),
            LinkageError::WrongJointCount { expected, got } => {
                write!(f, "{expected} joints are required, got {got}")
            }
            LinkageError::UnknownJoint(id) => write!(f, "unknown joint {}", id.0),
            LinkageError::UnknownHalfBar(id) => write!(f, "unknown half-bar {}", id.0),
        }
    }
}

impl std::error::Error for LinkageError {}
