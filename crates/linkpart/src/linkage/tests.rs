use super::*;
use crate::geom2::rand::{draw_closed_chain, ChainCfg, ReplayToken};
use nalgebra::{vector, Vector2};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn unit_square() -> Linkage {
    Linkage::new(
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ],
        LinkageCfg::default(),
    )
    .expect("square")
}

fn skewed_quad() -> Linkage {
    Linkage::new(
        vec![
            vector![0.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.2],
            vector![2.0, 0.0],
        ],
        LinkageCfg::default(),
    )
    .expect("quad")
}

fn assert_lengths(before: &[f64], after: &[f64], tol: f64) {
    for (k, (a, b)) in before.iter().zip(after.iter()).enumerate() {
        assert!((a - b).abs() < tol, "bar {k}: {a} vs {b}");
    }
}

#[test]
fn rejects_bad_joint_counts() {
    let three = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]];
    assert_eq!(
        Linkage::new(three.clone(), LinkageCfg::default()).unwrap_err(),
        LinkageError::UnsupportedJointCount(3)
    );
    assert_eq!(
        Linkage::with_joint_count(4, three, LinkageCfg::default()).unwrap_err(),
        LinkageError::WrongJointCount {
            expected: 4,
            got: 3
        }
    );
    let five = vec![Vector2::zeros(); 5];
    assert!(matches!(
        Linkage::with_joint_count(5, five, LinkageCfg::default()),
        Err(LinkageError::UnsupportedJointCount(5))
    ));
}

#[test]
fn half_bar_topology_is_cyclic() {
    let l = unit_square();
    assert_eq!(l.half_bars().len(), 8);
    let ids = |hb: HalfBar| [hb.pivot.0, hb.adjacent.0, hb.opposite.0, hb.alternative.0];
    assert_eq!(ids(l.half_bars()[0]), [0, 1, 2, 3]);
    assert_eq!(ids(l.half_bars()[1]), [0, 3, 2, 1]);
    assert_eq!(ids(l.half_bars()[7]), [3, 2, 1, 0]);

    let seven = Linkage::new(vec![Vector2::zeros(); 7], LinkageCfg::default()).unwrap();
    assert_eq!(seven.half_bars().len(), 14);
    assert_eq!(ids(seven.half_bars()[1]), [0, 6, 5, 4]);
    assert_eq!(ids(seven.half_bars()[12]), [6, 0, 1, 2]);
}

#[test]
fn bar_segments_run_from_pivot_to_midpoint() {
    let l = unit_square();
    let segs = l.update_all_bars();
    assert_eq!(segs.len(), 8);
    assert_eq!(segs[0].origin, vector![0.0, 0.0]);
    assert!((segs[0].direction - vector![1.0, 0.0]).norm() < 1e-12);
    assert!((segs[0].half_length - 0.5).abs() < 1e-12);
    assert!((segs[3].end() - vector![0.5, 0.0]).norm() < 1e-12);
    assert!(segs.iter().all(|s| (s.half_length - 0.5).abs() < 1e-12));
}

#[test]
fn closest_queries_and_hover_priority() {
    let l = unit_square();
    let (j, d) = l.find_closest_joint(vector![0.9, 1.2]);
    assert_eq!(j, JointId(2));
    assert!((d - (0.05f64).sqrt()).abs() < 1e-12);

    let (hb, d) = l.find_closest_half_bar(vector![0.25, 0.05]).expect("hit");
    assert_eq!(hb, HalfBarId(0));
    assert!((d - 0.05).abs() < 1e-12);
    // projection beyond the bar midpoint does not count for this half
    assert!(l
        .find_closest_half_bar(vector![0.75, 0.05])
        .map_or(true, |(hb, _)| hb != HalfBarId(0)));

    assert_eq!(l.hover(vector![0.03, 0.02]), Hover::Joint(JointId(0)));
    assert_eq!(l.hover(vector![0.25, 0.05]), Hover::HalfBar(HalfBarId(0)));
    assert_eq!(l.hover(vector![0.5, 0.5]), Hover::Nothing);
    // a larger zoom widens the pick radii
    let mut zoomed = l.clone();
    zoomed.set_cfg(LinkageCfg::default().scaled(10.0));
    assert_eq!(zoomed.hover(vector![0.5, 0.5]), Hover::Joint(JointId(0)));
}

#[test]
fn direct_joint_moves_are_unconstrained() {
    let mut l = unit_square();
    l.move_joint(JointId(2), vector![3.0, 3.0]).unwrap();
    assert_eq!(l.joint(JointId(2)).unwrap(), vector![3.0, 3.0]);
    assert!((l.bar_lengths()[1] - (13.0f64).sqrt()).abs() < 1e-12);
    assert_eq!(
        l.move_joint(JointId(9), Vector2::zeros()),
        Err(LinkageError::UnknownJoint(JointId(9)))
    );
    assert_eq!(
        l.begin_bar_drag(HalfBarId(8)),
        Err(LinkageError::UnknownHalfBar(HalfBarId(8)))
    );
}

#[test]
fn square_drag_follows_parallelogram_branch() {
    let mut l = unit_square();
    let before = l.bar_lengths();
    l.begin_bar_drag(HalfBarId(0)).unwrap();
    let mut prev_opp = l.joints()[2];
    let mut prev_adj = l.joints()[1];
    for deg in 1..=45 {
        let t = (deg as f64).to_radians();
        match l.drag_bar(vector![2.0 * t.cos(), 2.0 * t.sin()]) {
            DragOutcome::Applied { adjacent, opposite } => {
                assert!((adjacent - vector![t.cos(), t.sin()]).norm() < 1e-9);
                assert!((opposite - vector![t.cos(), 1.0 + t.sin()]).norm() < 1e-9);
                // no branch flip: the opposite joint moves no faster than the adjacent one
                let step = (adjacent - prev_adj).norm();
                assert!((opposite - prev_opp).norm() <= 2.0 * step + 1e-9);
                prev_adj = adjacent;
                prev_opp = opposite;
            }
            other => panic!("step {deg}: unexpected {other:?}"),
        }
    }
    let h = std::f64::consts::FRAC_1_SQRT_2;
    assert!(matches!(
        l.drag_bar(vector![0.5, 0.5]),
        DragOutcome::Applied { .. }
    ));
    assert!((l.joints()[1] - vector![h, h]).norm() < 1e-9);
    assert!((l.joints()[2] - vector![h, 1.0 + h]).norm() < 1e-9);
    assert_eq!(l.joints()[0], vector![0.0, 0.0]);
    assert_eq!(l.joints()[3], vector![0.0, 1.0]);
    assert_lengths(&before, &l.bar_lengths(), 1e-9);
}

#[test]
fn infeasible_step_holds_last_valid_state() {
    let mut l = skewed_quad();
    let start = l.joints().to_vec();
    l.begin_bar_drag(HalfBarId(0)).unwrap();
    // adjacent target (-1, 0) is 3 from the alternative joint, beyond 2.58
    assert_eq!(l.drag_bar(vector![-1.0, 0.0]), DragOutcome::Held);
    assert_eq!(l.joints(), &start[..]);
    // pointer on the pivot has no direction
    assert_eq!(l.drag_bar(vector![0.0, 0.0]), DragOutcome::Held);
    assert_eq!(l.joints(), &start[..]);

    let before = l.bar_lengths();
    assert!(matches!(l.drag_bar(vector![1.0, 1.0]), DragOutcome::Applied { .. }));
    assert_lengths(&before, &l.bar_lengths(), 1e-9);
    let applied = l.joints().to_vec();
    assert_eq!(l.drag_bar(vector![-1.0, 0.0]), DragOutcome::Held);
    assert_eq!(l.joints(), &applied[..]);
}

#[test]
fn restore_and_end_drag() {
    let mut l = unit_square();
    let start = l.joints().to_vec();
    assert!(!l.restore_before_drag());
    assert_eq!(l.drag_bar(vector![1.0, 1.0]), DragOutcome::Idle);

    l.begin_bar_drag(HalfBarId(0)).unwrap();
    assert_eq!(l.dragging(), Some(HalfBarId(0)));
    l.drag_bar(vector![1.0, 1.0]);
    assert!(l.restore_before_drag());
    assert_eq!(l.joints(), &start[..]);
    l.drag_bar(vector![1.0, 0.5]);
    assert_eq!(l.end_bar_drag(), Some(HalfBarId(0)));
    assert_eq!(l.dragging(), None);
    assert_ne!(l.joints(), &start[..]);
}

#[test]
fn bar_length_adjustment_moves_only_adjacent() {
    let mut l = unit_square();
    assert!(l.adjust_bar_length(HalfBarId(0), 0.5));
    assert!((l.joints()[1] - vector![1.5, 0.0]).norm() < 1e-12);
    assert_eq!(l.joints()[0], vector![0.0, 0.0]);
    assert_eq!(l.joints()[2], vector![1.0, 1.0]);
    // would collapse past the pivot
    assert!(!l.adjust_bar_length(HalfBarId(0), -2.0));
    assert!((l.joints()[1] - vector![1.5, 0.0]).norm() < 1e-12);
    assert!(!l.adjust_bar_length(HalfBarId(99), 0.1));

    l.begin_bar_drag(HalfBarId(0)).unwrap();
    assert!(!l.adjust_bar_length(HalfBarId(2), 0.1));
}

#[test]
fn scroll_respects_dead_zone_and_hover() {
    let mut l = unit_square();
    assert!(!l.scroll(vector![0.25, 0.05], 0.005));
    assert!(!l.scroll(vector![0.5, 0.5], 2.0));
    assert!(l.scroll(vector![0.25, 0.05], 2.0));
    assert!((l.joints()[1] - vector![1.2, 0.0]).norm() < 1e-12);
}

#[test]
fn square_ranges_are_degenerate_wedges() {
    let r = unit_square().angle_ranges(HalfBarId(0)).unwrap();
    assert!(r.max.visible && r.min.visible);
    assert!(r.max.width_deg.abs() < 1e-6);
    assert!(r.min.width_deg.abs() < 1e-6);
    assert!(r.max.center_deg.abs() < 1e-9);
    assert!((r.min.center_deg.abs() - 180.0).abs() < 1e-9);
    assert!(!r.max.is_restrictive(1e-3) && !r.min.is_restrictive(1e-3));
}

#[test]
fn max_range_blocks_infeasible_directions() {
    let l = skewed_quad();
    let r = l.angle_ranges(HalfBarId(0)).unwrap();
    assert_eq!(r.max.kind, RangeKind::Max);
    assert!(r.max.visible);
    assert!((r.max.center_deg + 90.0).abs() < 1e-9);
    assert!((r.max.width_deg - 130.7733408666854).abs() < 1e-6);
    assert!(!r.min.visible);
    assert!(r.max.contains_direction(vector![-1.0, 0.0]));
    assert!(!r.max.contains_direction(vector![0.0, 1.0]));

    // the opposing pivot carries the min restriction instead
    let across = l.angle_ranges(HalfBarId(4)).unwrap();
    assert!(!across.max.visible);
    assert!((across.min.width_deg - 77.7689928674292).abs() < 1e-6);
}

#[test]
fn min_and_max_swap_between_opposing_pivots() {
    let l = Linkage::new(
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![3.0, 0.5],
            vector![0.0, 1.0],
        ],
        LinkageCfg::default(),
    )
    .unwrap();
    let here = l.angle_ranges(HalfBarId(0)).unwrap();
    assert!(!here.max.visible);
    assert!(here.min.visible);
    assert!((here.min.center_deg.abs() - 180.0).abs() < 1e-9);
    assert!((here.min.width_deg - 117.33977626642965).abs() < 1e-6);

    let across = l.angle_ranges(HalfBarId(4)).unwrap();
    assert!(across.max.visible);
    assert!((across.max.center_deg - 104.03624346792648).abs() < 1e-6);
    assert!((across.max.width_deg - 278.5025678471924).abs() < 1e-6);
    assert!(!across.min.visible);

    let shown = l.joint_angle_ranges(Some(HalfBarId(4)));
    assert!(!shown[0].max.visible && !shown[0].min.visible);
    assert_eq!(shown[2], across);
    assert!(l
        .joint_angle_ranges(None)
        .iter()
        .all(|r| !r.max.visible && !r.min.visible));
}

#[test]
fn opposite_positions_are_mirror_images() {
    let [p, q] = possible_opposite_positions(vector![0.0, 0.0], vector![2.0, 0.0], 1.5, 1.5)
        .expect("solutions");
    assert!((p.x - 1.0).abs() < 1e-12 && p.y > 0.0);
    assert!((q - vector![p.x, -p.y]).norm() < 1e-12);
    assert!(possible_opposite_positions(vector![0.0, 0.0], vector![4.0, 0.0], 1.5, 1.5).is_none());
    assert!(possible_opposite_positions(vector![0.0, 0.0], vector![0.5, 0.0], 3.0, 1.0).is_none());
}

#[test]
fn seven_joint_drags_keep_every_bar() {
    let pts = draw_closed_chain(
        ChainCfg {
            count: 7,
            ..ChainCfg::default()
        },
        ReplayToken::new(11, 0),
    );
    let mut l = Linkage::new(pts, LinkageCfg::default()).unwrap();
    let before = l.bar_lengths();
    let mut rng = StdRng::seed_from_u64(2024);
    for hb in [0usize, 5, 9, 13] {
        l.begin_bar_drag(HalfBarId(hb)).unwrap();
        let pivot = l.joints()[l.half_bars()[hb].pivot.0];
        for _ in 0..40 {
            let off = vector![rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)];
            l.drag_bar(pivot + off);
            assert_lengths(&before, &l.bar_lengths(), 1e-9);
        }
        l.end_bar_drag();
    }
}

fn chain_strategy() -> impl Strategy<Value = (Vec<Vector2<f64>>, usize)> {
    (any::<u64>(), prop::sample::select(vec![4usize, 7])).prop_map(|(seed, n)| {
        let cfg = ChainCfg {
            count: n,
            ..ChainCfg::default()
        };
        (draw_closed_chain(cfg, ReplayToken::new(seed, 0)), n)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drags_preserve_bar_lengths(
        (pts, n) in chain_strategy(),
        hb_pick in 0usize..14,
        pointers in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..40),
    ) {
        let mut l = Linkage::new(pts, LinkageCfg::default()).unwrap();
        let before = l.bar_lengths();
        l.begin_bar_drag(HalfBarId(hb_pick % (2 * n))).unwrap();
        for (x, y) in pointers {
            l.drag_bar(vector![x, y]);
            for (a, b) in before.iter().zip(l.bar_lengths()) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn at_most_one_restrictive_range_per_opposing_pair(
        coords in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 4),
    ) {
        let pts: Vec<Vector2<f64>> = coords.iter().map(|&(x, y)| vector![x, y]).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                prop_assume!((pts[i] - pts[j]).norm() > 1e-3);
            }
        }
        let l = Linkage::new(pts, LinkageCfg::default()).unwrap();
        let tol = 1e-3;
        for i in 0..2 {
            // forward half-bars of joints i and i + 2 face each other
            let a = l.angle_ranges(HalfBarId(2 * i)).unwrap();
            let b = l.angle_ranges(HalfBarId(2 * (i + 2))).unwrap();
            prop_assert!(!(a.max.is_restrictive(tol) && b.max.is_restrictive(tol)));
            prop_assert!(!(a.min.is_restrictive(tol) && b.min.is_restrictive(tol)));
        }
    }
}
