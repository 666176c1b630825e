//! Run the seven-point partition search on seeded samples and print solutions.
//!
//! Usage:
//!   cargo run -p linkpart --example partition_demo
//!   cargo run -p linkpart --example partition_demo -- 5
//!
//! The optional argument is the number of samples (default 3).

use linkpart::geom2::rand::{draw_points_general_position, PointsCfg, ReplayToken};
use linkpart::partition::{PartitionCfg, PartitionSearch, SearchOutcome};
use linkpart::GeomCfg;

fn main() {
    let samples: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);
    for index in 0..samples {
        let Some(pts) = draw_points_general_position(
            PointsCfg::default(),
            GeomCfg::default(),
            ReplayToken::new(2025, index),
        ) else {
            println!("sample {index}: no general-position draw");
            continue;
        };
        let mut s = PartitionSearch::new(pts, PartitionCfg::default()).unwrap();
        match s.outcome() {
            SearchOutcome::Degenerate { triple } => {
                println!("sample {index}: collinear {triple:?}");
            }
            SearchOutcome::Searched {
                qualifying,
                compatible_triples,
                solutions,
            } => {
                println!(
                    "sample {index}: {qualifying} qualifying lines, {compatible_triples} compatible triples, {solutions} solutions"
                );
                for _ in 0..solutions.min(3) {
                    if let Some((_, t)) = s.selected() {
                        let lines: Vec<String> = t.lines.iter().map(|l| l.to_string()).collect();
                        let codes: Vec<u8> = t.codes.iter().map(|c| c.0).collect();
                        println!("  {} [{}] codes {codes:?}", s.selection_label(), lines.join(", "));
                    }
                    s.select_next();
                }
            }
        }
    }
}
