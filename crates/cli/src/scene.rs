//! Serde shapes for CLI inputs and outputs, and their mapping onto library types.

use anyhow::{ensure, Context, Result};
use linkpart::linkage::{AngleRange, AngleRanges, DragOutcome, LinkageCfg};
use linkpart::partition::{LineClass, PartitionSearch, SearchOutcome, Triple};
use linkpart::{GeomCfg, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Linkage scene file: joint positions plus optional solver overrides.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scene {
    pub joints: Vec<[f64; 2]>,
    #[serde(default)]
    pub cfg: SceneCfg,
}

/// Every field falls back to the library default when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneCfg {
    pub eps: Option<f64>,
    pub joint_pick_radius: Option<f64>,
    pub bar_pick_radius: Option<f64>,
    pub length_step: Option<f64>,
    pub scroll_dead_zone: Option<f64>,
    pub zoom: Option<f64>,
}

impl SceneCfg {
    pub fn to_linkage_cfg(&self) -> LinkageCfg {
        let d = LinkageCfg::default();
        let cfg = LinkageCfg {
            joint_pick_radius: self.joint_pick_radius.unwrap_or(d.joint_pick_radius),
            bar_pick_radius: self.bar_pick_radius.unwrap_or(d.bar_pick_radius),
            length_step: self.length_step.unwrap_or(d.length_step),
            scroll_dead_zone: self.scroll_dead_zone.unwrap_or(d.scroll_dead_zone),
            geom: self.eps.map_or(d.geom, GeomCfg::with_eps),
        };
        cfg.scaled(self.zoom.unwrap_or(1.0))
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading scene {}", path.display()))?;
        let scene: Scene = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        ensure!(
            scene.joints.iter().flatten().all(|v| v.is_finite()),
            "scene {} has non-finite joint coordinates",
            path.display()
        );
        Ok(scene)
    }

    pub fn positions(&self) -> Vec<Vec2<f64>> {
        self.joints.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
    }
}

#[inline]
pub fn xy(p: Vec2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeRecord {
    pub center_deg: f64,
    pub width_deg: f64,
    pub visible: bool,
}

impl From<AngleRange> for RangeRecord {
    fn from(r: AngleRange) -> Self {
        Self {
            center_deg: r.center_deg,
            width_deg: r.width_deg,
            visible: r.visible,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangesRecord {
    pub max: RangeRecord,
    pub min: RangeRecord,
}

impl From<AngleRanges> for RangesRecord {
    fn from(r: AngleRanges) -> Self {
        Self {
            max: r.max.into(),
            min: r.min.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Applied,
    Held,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub pointer: [f64; 2],
    pub outcome: StepKind,
    pub joints: Vec<[f64; 2]>,
    pub ranges: RangesRecord,
}

impl StepRecord {
    pub fn new(
        step: usize,
        pointer: Vec2<f64>,
        outcome: DragOutcome,
        joints: &[Vec2<f64>],
        ranges: AngleRanges,
    ) -> Self {
        Self {
            step,
            pointer: xy(pointer),
            outcome: match outcome {
                DragOutcome::Applied { .. } => StepKind::Applied,
                DragOutcome::Held | DragOutcome::Idle => StepKind::Held,
            },
            joints: joints.iter().copied().map(xy).collect(),
            ranges: ranges.into(),
        }
    }
}

/// Output of the `linkage` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragReport {
    pub half_bar: usize,
    pub target: [f64; 2],
    pub bar_lengths_before: Vec<f64>,
    pub bar_lengths_after: Vec<f64>,
    pub steps: Vec<StepRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineRecord {
    pub from: usize,
    pub to: usize,
    pub left: usize,
    pub right: usize,
    pub on: usize,
    pub signature: u8,
}

impl From<&LineClass> for LineRecord {
    fn from(c: &LineClass) -> Self {
        Self {
            from: c.line.from,
            to: c.line.to,
            left: c.split.left,
            right: c.split.right,
            on: c.split.on,
            signature: c.signature.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolutionRecord {
    pub label: String,
    pub lines: [[usize; 2]; 3],
    pub codes: [u8; 7],
}

impl SolutionRecord {
    fn new(index: usize, total: usize, t: &Triple) -> Self {
        Self {
            label: format!("Solution {} out of {}.", index + 1, total),
            lines: t.lines.map(|l| [l.from, l.to]),
            codes: t.codes.map(|c| c.0),
        }
    }
}

/// Output of the `partition` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionReport {
    pub points: Vec<[f64; 2]>,
    pub collinear: Option<[usize; 3]>,
    pub compatible_triples: usize,
    pub qualifying: Vec<LineRecord>,
    pub solutions: Vec<SolutionRecord>,
}

impl PartitionReport {
    pub fn from_search(search: &PartitionSearch) -> Self {
        let (collinear, compatible_triples) = match search.outcome() {
            SearchOutcome::Degenerate { triple } => (Some(triple), 0),
            SearchOutcome::Searched {
                compatible_triples, ..
            } => (None, compatible_triples),
        };
        let total = search.solutions().len();
        Self {
            points: search.points().iter().copied().map(xy).collect(),
            collinear,
            compatible_triples,
            qualifying: search.qualifying_lines().iter().map(LineRecord::from).collect(),
            solutions: search
                .solutions()
                .iter()
                .enumerate()
                .map(|(i, t)| SolutionRecord::new(i, total, t))
                .collect(),
        }
    }
}
