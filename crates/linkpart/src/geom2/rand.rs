//! Seeded samplers for point sets and closed joint chains.
//!
//! Purpose
//! - Provide small, deterministic generators used by property tests, benches
//!   and the CLI `sample` command.
//!
//! Model
//! - Point sets: uniform in a disk, redrawn as a whole until no triple is
//!   collinear under the shared tolerance (bounded attempts).
//! - Closed chains: `n` equally spaced angles with bounded angular and radial
//!   jitter, kept in angular order so the chain is a simple star-shaped polygon.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::GeomCfg;
use crate::guard::has_collinear_triple;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Point-set sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PointsCfg {
    pub count: usize,
    /// Radius of the sampling disk around the origin.
    pub radius: f64,
    /// Whole-set redraws before giving up on general position.
    pub max_attempts: usize,
}
impl Default for PointsCfg {
    fn default() -> Self {
        Self {
            count: 7,
            radius: 2.0,
            max_attempts: 64,
        }
    }
}

/// Draw `cfg.count` points in a disk with no collinear triple.
///
/// Returns `None` if every attempt produced a degenerate set.
pub fn draw_points_general_position(
    cfg: PointsCfg,
    geom: GeomCfg,
    tok: ReplayToken,
) -> Option<Vec<Vector2<f64>>> {
    let mut rng = tok.to_std_rng();
    let r0 = cfg.radius.max(1e-9);
    for _ in 0..cfg.max_attempts.max(1) {
        let pts: Vec<Vector2<f64>> = (0..cfg.count)
            .map(|_| {
                let th = rng.gen::<f64>() * std::f64::consts::TAU;
                let r = r0 * rng.gen::<f64>().sqrt();
                Vector2::new(th.cos() * r, th.sin() * r)
            })
            .collect();
        if !has_collinear_triple(&pts, geom) {
            return Some(pts);
        }
    }
    None
}

/// Closed-chain sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct ChainCfg {
    pub count: usize,
    pub base_radius: f64,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
}
impl Default for ChainCfg {
    fn default() -> Self {
        Self {
            count: 4,
            base_radius: 1.0,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.4,
        }
    }
}

/// Draw a cyclic joint layout (angularly ordered around the origin).
pub fn draw_closed_chain(cfg: ChainCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.max(3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    (0..n)
        .map(|k| {
            let th = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect()
}
