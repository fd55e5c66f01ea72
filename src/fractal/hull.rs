//! Convex hull fixed-point solver and its geometric helpers.
//!
//! Definitions reference each other, so their hulls form a mutually recursive system. It
//! is solved by repeated rounds: each round maps every child's previous hull into the
//! parent frame, unions the points and reduces them to a convex polygon. There is no
//! convergence proof; a fixed number of rounds is "close enough".

use crate::foundation::core::Vec2;
use crate::foundation::error::{IfsError, IfsResult};
use crate::fractal::piece::ResolveCtx;
use crate::fractal::system::FractalSystem;

pub const DEFAULT_HULL_ROUNDS: usize = 20;
/// Grid spacing used to merge nearby points before reduction.
pub const DEFAULT_HULL_ACCURACY: f64 = 0.031415;
pub const DEFAULT_INITIAL_HULL: [Vec2; 3] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 0.5),
    Vec2::new(0.5, -1.0),
];
/// Axis rotations (degrees) sampled when measuring a hull's minimum width.
pub const DIAMETER_ANGLES: [f64; 3] = [0.0, 30.0, 60.0];
/// Largest snapped grid coordinate; keeps hull cross products inside `i128`.
const GRID_LIMIT: f64 = (1u64 << 61) as f64;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HullOpts {
    pub rounds: usize,
    pub accuracy: f64,
    /// Seed polygon for every definition; at least three non-collinear points.
    pub initial_hull: Vec<Vec2>,
}

impl Default for HullOpts {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_HULL_ROUNDS,
            accuracy: DEFAULT_HULL_ACCURACY,
            initial_hull: DEFAULT_INITIAL_HULL.to_vec(),
        }
    }
}

impl HullOpts {
    pub fn validate(&self) -> IfsResult<()> {
        if !(self.accuracy.is_finite() && self.accuracy > 0.0) {
            return Err(IfsError::validation(format!(
                "hull accuracy must be finite and > 0, got {}",
                self.accuracy
            )));
        }
        if self.initial_hull.iter().any(|p| !p.is_finite()) {
            return Err(IfsError::validation("initial hull must be finite"));
        }
        if reduce_hull(&self.initial_hull, self.accuracy).is_none() {
            return Err(IfsError::validation(
                "initial hull needs at least 3 non-collinear points at the chosen accuracy",
            ));
        }
        Ok(())
    }
}

/// Outcome of [`FractalSystem::calculate_hulls`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct HullReport {
    pub rounds: usize,
    /// Reductions that collapsed below a polygon; the previous hull was kept each time.
    pub degenerate_events: usize,
    /// Children skipped because their fid did not resolve to a definition.
    pub skipped_children: usize,
    /// Vertex count per definition, in fid order.
    pub hull_sizes: Vec<usize>,
    /// Effective relative diameter per definition, in fid order.
    pub diameters: Vec<f64>,
}

/// Convex hull of `points` after snapping to a grid of spacing `accuracy`.
///
/// Points that snap to the same cell merge; each surviving vertex is the first input point
/// that landed in its cell. Output is counter-clockwise. Returns `None` when fewer than
/// three non-collinear cells remain, or when a snapped coordinate exceeds 2^61 cells.
pub fn reduce_hull(points: &[Vec2], accuracy: f64) -> Option<Vec<Vec2>> {
    let inv = 1.0 / accuracy;
    let snap = |c: f64| {
        let cell = (c * inv).round();
        (cell.abs() <= GRID_LIMIT).then_some(cell as i64)
    };
    let mut cells: Vec<((i64, i64), usize)> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_finite())
        .map(|(i, p)| Some(((snap(p.x)?, snap(p.y)?), i)))
        .collect::<Option<_>>()?;
    cells.sort_unstable();
    cells.dedup_by_key(|c| c.0);
    if cells.len() < 3 {
        return None;
    }

    let cross = |o: (i64, i64), a: (i64, i64), b: (i64, i64)| -> i128 {
        let d = |p: i64, q: i64| i128::from(p) - i128::from(q);
        d(a.0, o.0) * d(b.1, o.1) - d(a.1, o.1) * d(b.0, o.0)
    };
    let mut chain: Vec<((i64, i64), usize)> = Vec::with_capacity(cells.len() * 2);
    // lower hull
    for &c in &cells {
        while chain.len() >= 2
            && cross(chain[chain.len() - 2].0, chain[chain.len() - 1].0, c.0) <= 0
        {
            chain.pop();
        }
        chain.push(c);
    }
    // upper hull
    let lower_len = chain.len() + 1;
    for &c in cells.iter().rev().skip(1) {
        while chain.len() >= lower_len
            && cross(chain[chain.len() - 2].0, chain[chain.len() - 1].0, c.0) <= 0
        {
            chain.pop();
        }
        chain.push(c);
    }
    chain.pop();

    if chain.len() < 3 {
        return None;
    }
    Some(chain.into_iter().map(|(_, i)| points[i]).collect())
}

/// Minimum bounding-box span of `hull` over the axis rotations in [`DIAMETER_ANGLES`].
pub fn min_span(hull: &[Vec2]) -> f64 {
    DIAMETER_ANGLES
        .iter()
        .flat_map(|deg| {
            let (s, c) = deg.to_radians().sin_cos();
            let (mut lo_u, mut hi_u) = (f64::INFINITY, f64::NEG_INFINITY);
            let (mut lo_v, mut hi_v) = (f64::INFINITY, f64::NEG_INFINITY);
            for p in hull {
                let u = c * p.x + s * p.y;
                let v = -s * p.x + c * p.y;
                lo_u = lo_u.min(u);
                hi_u = hi_u.max(u);
                lo_v = lo_v.min(v);
                hi_v = hi_v.max(v);
            }
            [hi_u - lo_u, hi_v - lo_v]
        })
        .fold(f64::INFINITY, f64::min)
}

/// `point` lies inside or on the counter-clockwise polygon `hull`, within `tolerance`.
pub fn hull_contains(hull: &[Vec2], point: Vec2, tolerance: f64) -> bool {
    let n = hull.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = hull[i];
        let b = hull[(i + 1) % n];
        let edge = b - a;
        let len = edge.hypot();
        if len == 0.0 {
            return true;
        }
        edge.cross(point - a) / len >= -tolerance
    })
}

impl FractalSystem {
    /// Solve every definition's hull, then derive its diameter.
    ///
    /// Rounds are simultaneous: each definition reads its children's hulls from the
    /// previous round. Generated children are evaluated without a context piece.
    /// Definitions without children keep their seed hull.
    #[tracing::instrument(skip(self, opts), fields(rounds = opts.rounds))]
    pub fn calculate_hulls(&mut self, opts: &HullOpts) -> IfsResult<HullReport> {
        opts.validate()?;
        for defn in &mut self.defns {
            defn.store_hull(opts.initial_hull.clone());
        }

        let mut report = HullReport {
            rounds: opts.rounds,
            ..HullReport::default()
        };
        for round in 0..opts.rounds {
            let previous: Vec<Option<Vec<Vec2>>> = self
                .defns
                .iter()
                .map(|d| d.hull().map(<[Vec2]>::to_vec))
                .collect();

            for i in 0..self.defns.len() {
                let defn = &self.defns[i];
                let mut ctx = ResolveCtx::detached(&mut self.rng);
                let children = defn.get_children(&mut ctx);
                if children.is_empty() {
                    continue;
                }
                let mut points = Vec::new();
                for child in &children {
                    let fid = child.resolve_fid(&mut ctx);
                    let Some(child_hull) = previous.get(fid).and_then(Option::as_ref) else {
                        tracing::warn!(
                            fid = defn.fid(),
                            child_fid = fid,
                            "skipping child with unknown fid"
                        );
                        report.skipped_children += 1;
                        continue;
                    };
                    let local = child.resolve_transform(&mut ctx);
                    points.extend(child_hull.iter().map(|&p| local.apply(p)));
                }
                if points.is_empty() {
                    continue;
                }
                match reduce_hull(&points, opts.accuracy) {
                    Some(hull) => {
                        tracing::trace!(round, fid = i, len = hull.len(), "hull updated");
                        self.defns[i].store_hull(hull);
                    }
                    None => {
                        tracing::warn!(
                            round,
                            fid = i,
                            "degenerate hull reduction; keeping previous hull"
                        );
                        report.degenerate_events += 1;
                    }
                }
            }
            tracing::debug!(round = round + 1, "hull round complete");
        }

        for defn in &mut self.defns {
            let diameter = defn.hull().map(min_span);
            defn.store_hull_diameter(diameter);
            report.hull_sizes.push(defn.hull().map_or(0, <[Vec2]>::len));
            report.diameters.push(defn.relative_diameter());
        }
        tracing::info!(
            degenerate = report.degenerate_events,
            skipped = report.skipped_children,
            "hulls calculated"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fractal/hull.rs"]
mod tests;
