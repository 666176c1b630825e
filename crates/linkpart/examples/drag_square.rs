//! Drag one bar of a unit square and print the chain as it deforms.
//!
//! Usage:
//!   cargo run -p linkpart --example drag_square
//!   cargo run -p linkpart --example drag_square -- 120
//!
//! The optional argument is the final pointer angle in degrees (default 90).
//! Steps past the reachable range are reported as held.

use linkpart::linkage::{DragOutcome, HalfBarId, Linkage, LinkageCfg};
use nalgebra::vector;

fn main() {
    let end_deg: i32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(90);
    let mut l = Linkage::new(
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ],
        LinkageCfg::default(),
    )
    .unwrap();

    let r = l.angle_ranges(HalfBarId(0)).unwrap();
    println!(
        "ranges at joint 0: max {:.1}°±{:.1} (visible {}), min {:.1}°±{:.1} (visible {})",
        r.max.center_deg,
        r.max.half_width_deg(),
        r.max.visible,
        r.min.center_deg,
        r.min.half_width_deg(),
        r.min.visible
    );

    l.begin_bar_drag(HalfBarId(0)).unwrap();
    for deg in (0..=end_deg).step_by(15) {
        let t = (deg as f64).to_radians();
        match l.drag_bar(vector![2.0 * t.cos(), 2.0 * t.sin()]) {
            DragOutcome::Applied { adjacent, opposite } => println!(
                "{deg:>4}°: adjacent ({:.3}, {:.3}) opposite ({:.3}, {:.3})",
                adjacent.x, adjacent.y, opposite.x, opposite.y
            ),
            DragOutcome::Held => println!("{deg:>4}°: held"),
            DragOutcome::Idle => unreachable!("drag is active"),
        }
    }
    l.end_bar_drag();
    let lengths: Vec<String> = l.bar_lengths().iter().map(|d| format!("{d:.6}")).collect();
    println!("bar lengths: {}", lengths.join(", "));
}
