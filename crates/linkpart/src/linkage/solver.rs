//! The `Linkage` state machine: joints, half-bars, picking and constrained drags.

use nalgebra::Vector2;

use super::range::{compute_angular_range, possible_opposite_positions};
use super::types::{
    AngleRanges, BarDrag, BarSegment, DragOutcome, HalfBar, HalfBarId, Hover, JointId,
    LinkageCfg, LinkageError, SUPPORTED_JOINT_COUNTS,
};
use crate::geom2::{segment_contains_projection, wrap_index};

/// A closed chain of rigid bars joined at `N ∈ {4, 7}` revolute joints.
///
/// Joint `i` is connected to joints `i ± 1` (cyclically). Each joint owns two
/// half-bars (`2i` forward, `2i + 1` backward) that the user grabs to rotate a
/// neighbour about it.
#[derive(Clone, Debug)]
pub struct Linkage {
    joints: Vec<Vector2<f64>>,
    half_bars: Vec<HalfBar>,
    cfg: LinkageCfg,
    drag: Option<BarDrag>,
}

impl Linkage {
    /// Build from initial positions; the joint count is `positions.len()`.
    pub fn new(positions: Vec<Vector2<f64>>, cfg: LinkageCfg) -> Result<Self, LinkageError> {
        Self::with_joint_count(positions.len(), positions, cfg)
    }

    /// Build with an explicit joint count that `positions` must match.
    pub fn with_joint_count(
        n: usize,
        positions: Vec<Vector2<f64>>,
        cfg: LinkageCfg,
    ) -> Result<Self, LinkageError> {
        if !SUPPORTED_JOINT_COUNTS.contains(&n) {
            return Err(LinkageError::UnsupportedJointCount(n));
        }
        if positions.len() != n {
            return Err(LinkageError::WrongJointCount {
                expected: n,
                got: positions.len(),
            });
        }
        let half_bars = (0..n)
            .flat_map(|i| [HalfBar::around(i, n, true), HalfBar::around(i, n, false)])
            .collect();
        Ok(Self {
            joints: positions,
            half_bars,
            cfg,
            drag: None,
        })
    }

    #[inline]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn joints(&self) -> &[Vector2<f64>] {
        &self.joints
    }

    pub fn joint(&self, id: JointId) -> Result<Vector2<f64>, LinkageError> {
        self.joints
            .get(id.0)
            .copied()
            .ok_or(LinkageError::UnknownJoint(id))
    }

    #[inline]
    pub fn half_bars(&self) -> &[HalfBar] {
        &self.half_bars
    }

    pub fn half_bar(&self, id: HalfBarId) -> Result<HalfBar, LinkageError> {
        self.half_bars
            .get(id.0)
            .copied()
            .ok_or(LinkageError::UnknownHalfBar(id))
    }

    #[inline]
    pub fn cfg(&self) -> LinkageCfg {
        self.cfg
    }

    /// Replace the configuration, e.g. with `cfg.scaled(zoom)` after a camera change.
    pub fn set_cfg(&mut self, cfg: LinkageCfg) {
        self.cfg = cfg;
    }

    /// Length of bar `(i, i + 1)` for every `i`.
    pub fn bar_lengths(&self) -> Vec<f64> {
        let n = self.joints.len();
        (0..n)
            .map(|i| (self.joints[wrap_index(i as isize + 1, n)] - self.joints[i]).norm())
            .collect()
    }

    /// Pivot-to-midpoint segment of every half-bar, in half-bar order.
    pub fn update_all_bars(&self) -> Vec<BarSegment> {
        self.half_bars
            .iter()
            .enumerate()
            .map(|(k, hb)| {
                let origin = self.joints[hb.pivot.0];
                let to_adj = self.joints[hb.adjacent.0] - origin;
                let len = to_adj.norm();
                let direction = if len > 0.0 {
                    to_adj / len
                } else {
                    Vector2::zeros()
                };
                BarSegment {
                    half_bar: HalfBarId(k),
                    origin,
                    direction,
                    half_length: 0.5 * len,
                }
            })
            .collect()
    }

    /// Unconstrained move of a single joint.
    pub fn move_joint(&mut self, id: JointId, target: Vector2<f64>) -> Result<(), LinkageError> {
        let slot = self
            .joints
            .get_mut(id.0)
            .ok_or(LinkageError::UnknownJoint(id))?;
        *slot = target;
        Ok(())
    }

    /// Nearest joint to `pos`; ties keep the lower index.
    pub fn find_closest_joint(&self, pos: Vector2<f64>) -> (JointId, f64) {
        let mut best = (JointId(0), f64::INFINITY);
        for (i, p) in self.joints.iter().enumerate() {
            let d = (p - pos).norm();
            if d < best.1 {
                best = (JointId(i), d);
            }
        }
        best
    }

    /// Nearest half-bar whose extent contains the projection of `pos`.
    pub fn find_closest_half_bar(&self, pos: Vector2<f64>) -> Option<(HalfBarId, f64)> {
        let mut best: Option<(HalfBarId, f64)> = None;
        for seg in self.update_all_bars() {
            if let Some((_, d)) =
                segment_contains_projection(pos, seg.origin, seg.end(), self.cfg.geom)
            {
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((seg.half_bar, d));
                }
            }
        }
        best
    }

    /// Joints take priority over half-bars.
    pub fn hover(&self, pos: Vector2<f64>) -> Hover {
        let (joint, dj) = self.find_closest_joint(pos);
        if dj < self.cfg.joint_pick_radius {
            return Hover::Joint(joint);
        }
        match self.find_closest_half_bar(pos) {
            Some((hb, d)) if d < self.cfg.bar_pick_radius => Hover::HalfBar(hb),
            _ => Hover::Nothing,
        }
    }

    /// Forbidden wedges at the pivot of `id` for the current positions.
    pub fn angle_ranges(&self, id: HalfBarId) -> Result<AngleRanges, LinkageError> {
        let hb = self.half_bar(id)?;
        Ok(compute_angular_range(
            self.joints[hb.pivot.0],
            self.joints[hb.adjacent.0],
            self.joints[hb.opposite.0],
            self.joints[hb.alternative.0],
        ))
    }

    /// Per-joint wedges for display: all hidden except at the pivot of `focus`.
    pub fn joint_angle_ranges(&self, focus: Option<HalfBarId>) -> Vec<AngleRanges> {
        let mut out = vec![AngleRanges::hidden(); self.joints.len()];
        if let Some(id) = focus {
            if let Ok(ranges) = self.angle_ranges(id) {
                out[self.half_bars[id.0].pivot.0] = ranges;
            }
        }
        out
    }

    /// Half-bar currently being dragged, if any.
    #[inline]
    pub fn dragging(&self) -> Option<HalfBarId> {
        self.drag.map(|d| d.half_bar)
    }

    /// Snapshot the four joints of `id` and their distances for a constrained drag.
    pub fn begin_bar_drag(&mut self, id: HalfBarId) -> Result<(), LinkageError> {
        let hb = self.half_bar(id)?;
        let pivot = self.joints[hb.pivot.0];
        let adjacent = self.joints[hb.adjacent.0];
        let opposite = self.joints[hb.opposite.0];
        let alternative = self.joints[hb.alternative.0];
        let drag = BarDrag {
            half_bar: id,
            pivot,
            adjacent,
            opposite,
            alternative,
            d_pa: (adjacent - pivot).norm(),
            d_ao: (opposite - adjacent).norm(),
            d_oa2: (alternative - opposite).norm(),
            last_adjacent: adjacent,
            last_opposite: opposite,
        };
        tracing::debug!(
            half_bar = id.0,
            d_pa = drag.d_pa,
            d_ao = drag.d_ao,
            d_oa2 = drag.d_oa2,
            "bar drag started"
        );
        self.drag = Some(drag);
        Ok(())
    }

    /// One constrained step towards `pointer`.
    ///
    /// The adjacent joint goes to `pivot + unit(pointer − pivot) · d_pa`. The
    /// opposite joint takes whichever mirror solution is closer to where it was
    /// on the previous accepted step, so the chain never flips branch mid-drag.
    /// If no solution exists the joints are held at the last accepted placement.
    pub fn drag_bar(&mut self, pointer: Vector2<f64>) -> DragOutcome {
        let eps = self.cfg.geom.eps;
        let Some(drag) = self.drag.as_mut() else {
            return DragOutcome::Idle;
        };
        let hb = self.half_bars[drag.half_bar.0];

        let to_pointer = pointer - drag.pivot;
        let len = to_pointer.norm();
        let candidates = if len.is_finite() && len >= eps {
            let adjacent = drag.pivot + to_pointer * (drag.d_pa / len);
            possible_opposite_positions(adjacent, drag.alternative, drag.d_ao, drag.d_oa2)
                .map(|pair| (adjacent, pair))
        } else {
            None
        };

        match candidates {
            Some((adjacent, [first, second])) => {
                let opposite = if (second - drag.last_opposite).norm()
                    <= (first - drag.last_opposite).norm()
                {
                    second
                } else {
                    first
                };
                drag.last_adjacent = adjacent;
                drag.last_opposite = opposite;
                self.joints[hb.adjacent.0] = adjacent;
                self.joints[hb.opposite.0] = opposite;
                DragOutcome::Applied { adjacent, opposite }
            }
            None => {
                tracing::trace!(half_bar = drag.half_bar.0, ?pointer, "drag step rejected");
                self.joints[hb.adjacent.0] = drag.last_adjacent;
                self.joints[hb.opposite.0] = drag.last_opposite;
                DragOutcome::Held
            }
        }
    }

    /// Finish the drag, keeping the current positions.
    pub fn end_bar_drag(&mut self) -> Option<HalfBarId> {
        let id = self.drag.take().map(|d| d.half_bar);
        if let Some(id) = id {
            tracing::debug!(half_bar = id.0, "bar drag ended");
        }
        id
    }

    /// Put the four snapshotted joints back; the drag stays active.
    pub fn restore_before_drag(&mut self) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let hb = self.half_bars[drag.half_bar.0];
        self.joints[hb.pivot.0] = drag.pivot;
        self.joints[hb.adjacent.0] = drag.adjacent;
        self.joints[hb.opposite.0] = drag.opposite;
        self.joints[hb.alternative.0] = drag.alternative;
        drag.last_adjacent = drag.adjacent;
        drag.last_opposite = drag.opposite;
        true
    }

    /// Lengthen (or shorten) bar `(pivot, adjacent)` by moving only the adjacent joint.
    ///
    /// Returns `false` and leaves the chain untouched when a drag is active, the
    /// id is unknown, the bar has collapsed, or the new length would fall below `eps`.
    pub fn adjust_bar_length(&mut self, id: HalfBarId, delta: f64) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Ok(hb) = self.half_bar(id) else {
            tracing::warn!(half_bar = id.0, "length change on unknown half-bar");
            return false;
        };
        let eps = self.cfg.geom.eps;
        let pivot = self.joints[hb.pivot.0];
        let adjacent = self.joints[hb.adjacent.0];
        let len = (adjacent - pivot).norm();
        if len < eps || len + delta < eps {
            tracing::debug!(half_bar = id.0, len, delta, "bar length change refused");
            return false;
        }
        self.joints[hb.adjacent.0] = pivot + (adjacent - pivot) * ((len + delta) / len);
        true
    }

    /// Scroll input at `pos`: resizes the hovered half-bar by `amount · length_step`.
    pub fn scroll(&mut self, pos: Vector2<f64>, amount: f64) -> bool {
        if amount.abs() <= self.cfg.scroll_dead_zone {
            return false;
        }
        match self.hover(pos) {
            Hover::HalfBar(id) => self.adjust_bar_length(id, amount * self.cfg.length_step),
            _ => false,
        }
    }
}
