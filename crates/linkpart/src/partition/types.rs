use std::fmt;

use crate::geom2::{GeomCfg, Orientation};

/// The search is defined for exactly this many points.
pub const POINT_COUNT: usize = 7;

/// Side of a directed line on which a point lies (shared-eps classification).
pub type Side = Orientation;

/// Line through points `from` and `to`, oriented `from → to`.
///
/// "Right" of the line is the half-plane with `cross(to − from, p − from) <= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedLine {
    pub from: usize,
    pub to: usize,
}

impl DirectedLine {
    #[inline]
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from != to, "directed line needs two distinct points");
        Self { from, to }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Same pair of defining points, in either orientation.
    #[inline]
    pub fn same_endpoints(self, other: Self) -> bool {
        self == other || self == other.reversed()
    }
}

impl fmt::Display for DirectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.from, self.to)
    }
}

/// Counts of the five non-defining points on each side of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Split {
    pub left: usize,
    pub right: usize,
    pub on: usize,
}

impl Split {
    /// A 2–3 or 1–4 split, possibly after pushing every on-line point to one side.
    ///
    /// Together with the two defining points (one pushed to each side) these
    /// become 3–4 or 2–5 splits of all seven points.
    pub fn qualifies(&self) -> bool {
        fn balanced(l: usize, r: usize) -> bool {
            matches!((l, r), (2, 3) | (3, 2) | (1, 4) | (4, 1))
        }
        balanced(self.left, self.right)
            || (self.on > 0
                && (balanced(self.left + self.on, self.right)
                    || balanced(self.left, self.right + self.on)))
    }
}

/// Which points a line puts on its right (bit `k` = point `k`), normalized so
/// that at most three bits are set.
///
/// Both defining points count as right, so a line and its reverse usually
/// differ. Deduplication drops a later line whose point pair puts the same
/// points on its right as an earlier one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(pub u8);

impl Signature {
    pub fn from_right_mask(mask: u8) -> Self {
        let full = (1u8 << POINT_COUNT) - 1;
        let mask = mask & full;
        if mask.count_ones() as usize > POINT_COUNT / 2 {
            Signature(!mask & full)
        } else {
            Signature(mask)
        }
    }

    #[inline]
    pub fn contains(self, point: usize) -> bool {
        point < POINT_COUNT && (self.0 >> point) & 1 == 1
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Classification of one directed line against the point set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineClass {
    pub line: DirectedLine,
    pub split: Split,
    pub qualifies: bool,
    pub signature: Signature,
}

/// Membership of one point in the three right half-planes of a triple:
/// bit 0 = first line, bit 1 = second, bit 2 = third.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InclusionCode(pub u8);

/// Three lines whose half-planes give all seven points distinct codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triple {
    pub lines: [DirectedLine; 3],
    pub codes: [InclusionCode; POINT_COUNT],
}

impl Triple {
    /// Index of the point that owns `code`, if any.
    pub fn point_with_code(&self, code: InclusionCode) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartitionCfg {
    pub geom: GeomCfg,
    /// Line pairs must cross within `bounds_factor · max |p|` of the origin.
    pub bounds_factor: f64,
}

impl Default for PartitionCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            bounds_factor: 2.0,
        }
    }
}

/// Result of one full search.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Some triple of points is collinear; nothing was searched.
    Degenerate { triple: [usize; 3] },
    Searched {
        qualifying: usize,
        compatible_triples: usize,
        solutions: usize,
    },
}

impl SearchOutcome {
    pub fn solution_count(&self) -> usize {
        match self {
            SearchOutcome::Degenerate { .. } => 0,
            SearchOutcome::Searched { solutions, .. } => *solutions,
        }
    }
}

/// Errors surfaced by the partition search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    WrongPointCount { expected: usize, got: usize },
    UnknownPoint(usize),
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionError::WrongPointCount { expected, got } => {
                write!(f, "partition search needs {expected} points, got {got}")
            }
            PartitionError::UnknownPoint(i) => write!(f, "unknown point {i}"),
        }
    }
}

impl std::error::Error for PartitionError {}
