//! `PartitionSearch`: owns the seven points, the cached search result and the
//! current solution selection.

use nalgebra::Vector2;

use super::classify::{
    classify_line, codes_are_distinct, inclusion_codes, pair_compatible, qualifying_lines,
};
use super::types::{
    DirectedLine, InclusionCode, LineClass, PartitionCfg, PartitionError, SearchOutcome, Triple,
    POINT_COUNT,
};
use crate::guard::find_collinear_triple;
use crate::visibility::compose;

#[derive(Clone, Debug)]
pub struct PartitionSearch {
    points: [Vector2<f64>; POINT_COUNT],
    cfg: PartitionCfg,
    collinear: Option<[usize; 3]>,
    qualifying: Vec<LineClass>,
    compatible_triples: usize,
    solutions: Vec<Triple>,
    selected: usize,
    dragging: Option<usize>,
}

impl PartitionSearch {
    /// Take exactly seven points and run the first search.
    pub fn new(points: Vec<Vector2<f64>>, cfg: PartitionCfg) -> Result<Self, PartitionError> {
        let got = points.len();
        let points: [Vector2<f64>; POINT_COUNT] =
            points
                .try_into()
                .map_err(|_| PartitionError::WrongPointCount {
                    expected: POINT_COUNT,
                    got,
                })?;
        let mut search = Self {
            points,
            cfg,
            collinear: None,
            qualifying: Vec::new(),
            compatible_triples: 0,
            solutions: Vec::new(),
            selected: 0,
            dragging: None,
        };
        search.find_valid_triples();
        Ok(search)
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>; POINT_COUNT] {
        &self.points
    }

    pub fn point(&self, i: usize) -> Result<Vector2<f64>, PartitionError> {
        self.points
            .get(i)
            .copied()
            .ok_or(PartitionError::UnknownPoint(i))
    }

    #[inline]
    pub fn cfg(&self) -> PartitionCfg {
        self.cfg
    }

    /// First collinear triple of the current points, if any.
    pub fn check_collinear(&self) -> Option<[usize; 3]> {
        find_collinear_triple(&self.points, self.cfg.geom)
    }

    /// Warning flag: the last check (search or live drag) found collinear points.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.collinear.is_some()
    }

    #[inline]
    pub fn collinear_triple(&self) -> Option<[usize; 3]> {
        self.collinear
    }

    pub fn classify_line(&self, line: DirectedLine) -> LineClass {
        classify_line(&self.points, line, self.cfg)
    }

    /// Every directed line with its classification, row-major.
    pub fn all_lines(&self) -> Vec<LineClass> {
        super::classify::all_lines()
            .into_iter()
            .map(|line| self.classify_line(line))
            .collect()
    }

    /// Qualifying lines of the last search (empty when degenerate).
    #[inline]
    pub fn qualifying_lines(&self) -> &[LineClass] {
        &self.qualifying
    }

    pub fn pair_compatible(&self, a: DirectedLine, b: DirectedLine) -> bool {
        pair_compatible(&self.points, a, b, self.cfg)
    }

    /// Inclusion codes of the triple if they put every point in its own cell.
    pub fn induces_unique_partition(
        &self,
        a: DirectedLine,
        b: DirectedLine,
        c: DirectedLine,
    ) -> Option<[InclusionCode; POINT_COUNT]> {
        let codes = inclusion_codes(&self.points, [a, b, c]);
        codes_are_distinct(&codes).then_some(codes)
    }

    /// Recompute everything from the current points and reset the selection.
    pub fn find_valid_triples(&mut self) -> SearchOutcome {
        self.qualifying.clear();
        self.solutions.clear();
        self.compatible_triples = 0;
        self.selected = 0;
        self.collinear = self.check_collinear();
        if let Some(triple) = self.collinear {
            tracing::warn!(?triple, "collinear points; partition search skipped");
            return SearchOutcome::Degenerate { triple };
        }

        let lines = qualifying_lines(&self.points, self.cfg);
        let n = lines.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (lines[i].line, lines[j].line);
                if !self.pair_compatible(a, b) {
                    continue;
                }
                for k in (j + 1)..n {
                    let c = lines[k].line;
                    if !(self.pair_compatible(a, c) && self.pair_compatible(b, c)) {
                        continue;
                    }
                    self.compatible_triples += 1;
                    if let Some(codes) = self.induces_unique_partition(a, b, c) {
                        self.solutions.push(Triple {
                            lines: [a, b, c],
                            codes,
                        });
                    }
                }
            }
        }
        self.qualifying = lines;
        tracing::debug!(
            qualifying = self.qualifying.len(),
            compatible = self.compatible_triples,
            solutions = self.solutions.len(),
            "partition search finished"
        );
        self.outcome()
    }

    /// Summary of the cached result. Collinear points mean no solutions, even
    /// mid-drag before the search has been rerun.
    pub fn outcome(&self) -> SearchOutcome {
        match self.collinear {
            Some(triple) => SearchOutcome::Degenerate { triple },
            None => SearchOutcome::Searched {
                qualifying: self.qualifying.len(),
                compatible_triples: self.compatible_triples,
                solutions: self.solutions.len(),
            },
        }
    }

    /// Solutions of the last search; empty while the points are degenerate.
    #[inline]
    pub fn solutions(&self) -> &[Triple] {
        if self.is_degenerate() {
            &[]
        } else {
            &self.solutions
        }
    }

    pub fn selected(&self) -> Option<(usize, &Triple)> {
        self.solutions().get(self.selected).map(|t| (self.selected, t))
    }

    /// Advance the selection cyclically; `None` when there are no solutions.
    pub fn select_next(&mut self) -> Option<usize> {
        let n = self.solutions().len();
        if n == 0 {
            return None;
        }
        self.selected = (self.selected + 1) % n;
        Some(self.selected)
    }

    pub fn select_previous(&mut self) -> Option<usize> {
        let n = self.solutions().len();
        if n == 0 {
            return None;
        }
        self.selected = (self.selected + n - 1) % n;
        Some(self.selected)
    }

    pub fn selection_label(&self) -> String {
        match self.selected() {
            Some((i, _)) => format!("Solution {} out of {}.", i + 1, self.solutions().len()),
            None => "No Solutions.".to_string(),
        }
    }

    /// Commit a new position for point `i` and search again.
    pub fn move_point(
        &mut self,
        i: usize,
        pos: Vector2<f64>,
    ) -> Result<SearchOutcome, PartitionError> {
        let slot = self
            .points
            .get_mut(i)
            .ok_or(PartitionError::UnknownPoint(i))?;
        *slot = pos;
        Ok(self.find_valid_triples())
    }

    /// Nearest point to `pos`; ties keep the lower index.
    pub fn find_closest_point(&self, pos: Vector2<f64>) -> (usize, f64) {
        let mut best = (0, f64::INFINITY);
        for (i, p) in self.points.iter().enumerate() {
            let d = (p - pos).norm();
            if d < best.1 {
                best = (i, d);
            }
        }
        best
    }

    pub fn begin_point_drag(&mut self, i: usize) -> Result<(), PartitionError> {
        if i >= POINT_COUNT {
            return Err(PartitionError::UnknownPoint(i));
        }
        self.dragging = Some(i);
        Ok(())
    }

    #[inline]
    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    /// Live drag: move the point and refresh only the collinearity flag.
    ///
    /// Returns `false` when no point drag is active.
    pub fn drag_point(&mut self, pos: Vector2<f64>) -> bool {
        let Some(i) = self.dragging else {
            return false;
        };
        self.points[i] = pos;
        self.collinear = self.check_collinear();
        true
    }

    /// Finish the drag and run the full search at the final position.
    pub fn end_point_drag(&mut self) -> Option<SearchOutcome> {
        self.dragging.take()?;
        Some(self.find_valid_triples())
    }

    /// Qualifying lines are shown unless the set is degenerate or the caller
    /// hides non-debug lines.
    pub fn line_visible(&self, class: &LineClass, hide_non_debug: bool) -> bool {
        compose(
            &[!self.is_degenerate() && class.qualifies],
            &[hide_non_debug],
        )
    }
}
