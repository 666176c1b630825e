use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linkpart::geom2::rand::{draw_points_general_position, PointsCfg, ReplayToken};
use linkpart::linkage::{DragOutcome, HalfBarId, Linkage};
use linkpart::partition::{PartitionCfg, PartitionSearch, POINT_COUNT};
use linkpart::{GeomCfg, Vec2};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod scene;
mod table;

use provenance::{write_sidecar, Payload};
use scene::{xy, DragReport, PartitionReport, Scene, StepRecord};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Drive the linkage solver and the seven-point partition search from files")]
struct Cmd {
    /// Optional free-form tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Drag one half-bar of a scene toward a target and record every step
    Linkage {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        half_bar: usize,
        /// Final pointer position as `X,Y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        target: Vec2<f64>,
        #[arg(long, default_value_t = 32)]
        steps: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run the partition search on a 7-row `x,y` CSV
    Partition {
        #[arg(long)]
        points: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Override the shared geometric tolerance
        #[arg(long)]
        eps: Option<f64>,
    },
    /// Write seven seeded points in general position as CSV
    Sample {
        #[arg(long)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 2.0)]
        radius: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Linkage {
            scene,
            half_bar,
            target,
            steps,
            out,
        } => run_linkage(&scene, half_bar, target, steps, &out, cmd.tag),
        Action::Partition { points, out, eps } => run_partition(&points, &out, eps, cmd.tag),
        Action::Sample {
            seed,
            index,
            radius,
            out,
        } => run_sample(seed, index, radius, &out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn parse_point(s: &str) -> Result<Vec2<f64>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad X in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad Y in {s:?}: {e}"))?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(format!("non-finite point {s:?}"));
    }
    Ok(Vec2::new(x, y))
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

/// Sweep the pointer linearly from the adjacent joint to `target` in `steps` steps.
fn drag_report(
    linkage: &mut Linkage,
    half_bar: HalfBarId,
    target: Vec2<f64>,
    steps: usize,
) -> Result<DragReport> {
    let hb = linkage.half_bar(half_bar)?;
    let start = linkage.joint(hb.adjacent)?;
    let bar_lengths_before = linkage.bar_lengths();
    linkage.begin_bar_drag(half_bar)?;
    let mut records = Vec::with_capacity(steps);
    for k in 1..=steps {
        let t = k as f64 / steps as f64;
        let pointer = start + (target - start) * t;
        let outcome = linkage.drag_bar(pointer);
        if outcome == DragOutcome::Held {
            tracing::debug!(step = k, "held");
        }
        records.push(StepRecord::new(
            k,
            pointer,
            outcome,
            linkage.joints(),
            linkage.angle_ranges(half_bar)?,
        ));
    }
    linkage.end_bar_drag();
    Ok(DragReport {
        half_bar: half_bar.0,
        target: xy(target),
        bar_lengths_before,
        bar_lengths_after: linkage.bar_lengths(),
        steps: records,
    })
}

fn run_linkage(
    scene_path: &Path,
    half_bar: usize,
    target: Vec2<f64>,
    steps: usize,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(scene = %scene_path.display(), half_bar, steps, tag = ?tag, "linkage");
    if steps == 0 {
        bail!("--steps must be at least 1");
    }
    let scene = Scene::load(scene_path)?;
    let mut linkage = Linkage::new(scene.positions(), scene.cfg.to_linkage_cfg())
        .with_context(|| format!("building linkage from {}", scene_path.display()))?;
    let report = drag_report(&mut linkage, HalfBarId(half_bar), target, steps)?;
    let applied = report
        .steps
        .iter()
        .filter(|s| s.outcome == scene::StepKind::Applied)
        .count();
    tracing::info!(applied, held = steps - applied, "drag finished");
    write_json(out, &report)?;

    let params = json!({
        "scene": scene_path.to_string_lossy(),
        "half_bar": half_bar,
        "target": xy(target),
        "steps": steps,
        "applied": applied,
    });
    write_sidecar(out, Payload::new("linkage", params).with_tag(tag))?;
    Ok(())
}

fn run_partition(points: &Path, out: &Path, eps: Option<f64>, tag: Option<String>) -> Result<()> {
    tracing::info!(points = %points.display(), tag = ?tag, "partition");
    let pts = table::read_points(points)?;
    let cfg = PartitionCfg {
        geom: eps.map_or(GeomCfg::default(), GeomCfg::with_eps),
        ..PartitionCfg::default()
    };
    let search = PartitionSearch::new(pts, cfg)
        .with_context(|| format!("{} must have exactly {POINT_COUNT} rows", points.display()))?;
    if let Some(triple) = search.collinear_triple() {
        tracing::warn!(?triple, "collinear points; no solutions");
    }
    let report = PartitionReport::from_search(&search);
    tracing::info!(
        qualifying = report.qualifying.len(),
        solutions = report.solutions.len(),
        "search finished"
    );
    write_json(out, &report)?;

    let params = json!({
        "points": points.to_string_lossy(),
        "eps": cfg.geom.eps,
        "bounds_factor": cfg.bounds_factor,
        "solutions": report.solutions.len(),
    });
    write_sidecar(out, Payload::new("partition", params).with_tag(tag))?;
    Ok(())
}

fn run_sample(seed: u64, index: u64, radius: f64, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(seed, index, radius, tag = ?tag, "sample");
    let cfg = PointsCfg {
        radius,
        ..PointsCfg::default()
    };
    let Some(pts) = draw_points_general_position(cfg, GeomCfg::default(), ReplayToken::new(seed, index))
    else {
        bail!("no general-position sample after {} attempts", cfg.max_attempts);
    };
    table::write_points(out, &pts)?;
    let params = json!({ "seed": seed, "index": index, "radius": radius, "count": pts.len() });
    write_sidecar(out, Payload::new("sample", params).with_tag(tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let doc = provenance::document(&Payload::new("report", json!({})).with_tag(tag), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpart::linkage::LinkageCfg;
    use tempfile::tempdir;

    #[test]
    fn parses_target_points() {
        assert_eq!(parse_point("1.5,-2").unwrap(), Vec2::new(1.5, -2.0));
        assert_eq!(parse_point(" 0 , 3 ").unwrap(), Vec2::new(0.0, 3.0));
        assert!(parse_point("1.5").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
        let cmd = Cmd::try_parse_from([
            "cli", "--tag", "t1", "linkage", "--scene", "s.json", "--half-bar", "0", "--target",
            "-1,0.5", "--out", "o.json",
        ])
        .unwrap();
        assert_eq!(cmd.tag.as_deref(), Some("t1"));
        match cmd.action {
            Action::Linkage { target, steps, .. } => {
                assert_eq!(target, Vec2::new(-1.0, 0.5));
                assert_eq!(steps, 32);
            }
            _ => panic!("expected linkage"),
        }
    }

    #[test]
    fn drag_report_keeps_bar_lengths() {
        let mut l = Linkage::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            LinkageCfg::default(),
        )
        .unwrap();
        let report = drag_report(&mut l, HalfBarId(0), Vec2::new(0.0, 2.0), 10).unwrap();
        assert_eq!(report.steps.len(), 10);
        for (a, b) in report
            .bar_lengths_before
            .iter()
            .zip(report.bar_lengths_after.iter())
        {
            assert!((a - b).abs() < 1e-9);
        }
        assert!(l.dragging().is_none());
        assert!(drag_report(&mut l, HalfBarId(42), Vec2::new(0.0, 2.0), 3).is_err());
    }

    #[test]
    fn linkage_command_writes_report_and_sidecar() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("square.json");
        std::fs::write(&scene, r#"{"joints": [[0,0],[1,0],[1,1],[0,1]]}"#).unwrap();
        let out = dir.path().join("out").join("drag.json");
        run_linkage(&scene, 0, Vec2::new(0.0, 2.0), 8, &out, Some("demo".into())).unwrap();
        let report: DragReport = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(report.steps.len(), 8);
        assert_eq!(report.steps[0].joints.len(), 4);
        assert!(dir.path().join("out").join("drag.provenance.json").exists());

        std::fs::write(&scene, r#"{"joints": [[0,0],[1,0],[1,1]]}"#).unwrap();
        assert!(run_linkage(&scene, 0, Vec2::new(0.0, 2.0), 8, &out, None).is_err());
        assert!(run_linkage(&scene, 0, Vec2::new(0.0, 2.0), 0, &out, None).is_err());
    }

    #[test]
    fn sample_then_partition() {
        let dir = tempdir().unwrap();
        let pts = dir.path().join("points.csv");
        run_sample(7, 0, 2.0, &pts, None).unwrap();
        assert!(dir.path().join("points.provenance.json").exists());
        assert_eq!(table::read_points(&pts).unwrap().len(), POINT_COUNT);

        let out = dir.path().join("partition.json");
        run_partition(&pts, &out, None, None).unwrap();
        let report: PartitionReport =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(report.points.len(), POINT_COUNT);
        assert_eq!(report.collinear, None);
        for s in &report.solutions {
            let mut codes = s.codes.to_vec();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), POINT_COUNT);
        }
    }

    #[test]
    fn partition_rejects_wrong_row_count() {
        let dir = tempdir().unwrap();
        let pts = dir.path().join("six.csv");
        std::fs::write(&pts, "x,y\n0,0\n1,0\n0,1\n2,3\n-1,2\n3,-1\n").unwrap();
        let err = run_partition(&pts, &dir.path().join("o.json"), None, None).unwrap_err();
        assert!(format!("{err:#}").contains("exactly 7 rows"));
    }
}
