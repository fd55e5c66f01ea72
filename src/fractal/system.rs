//! The definition arena and the iteration driver.

use std::fmt;

use crate::canvas::Canvas;
use crate::foundation::core::{Fid, FractalRng, seeded_rng};
use crate::foundation::error::{IfsError, IfsResult};
use crate::fractal::defn::{Children, FractalDefn};
use crate::fractal::piece::{ConcretePiece, Piece, PieceContext, PieceState, Progress, ResolveCtx};
use crate::strategy::iteration::{IterationFn, default_iteration_fn};
use crate::strategy::plot::PlotCtx;
use crate::strategy::sort::{PieceSorter, sort_pieces};
use crate::transform::metric::Metric;

pub const DEFAULT_MAX_PIECES: usize = 10_000;
pub const DEFAULT_MAX_ROUNDS: usize = 1000;
pub const DEFAULT_DRAWING_SIZE: f64 = 1000.0;
/// Upper bound on the number of definitions in one system.
pub const MAX_DEFNS: usize = 10_000;

/// What one call to [`FractalSystem::iterate_once`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RoundStats {
    /// Pieces replaced by their children.
    pub expanded: usize,
    /// Pieces that stopped naturally this round.
    pub terminated: usize,
    /// Pieces whose generator returned no children; they vanish.
    pub pruned: usize,
    /// Pieces or children dropped for an unknown fid.
    pub dropped: usize,
    pub budget_exhausted: bool,
}

/// Outcome of [`FractalSystem::do_iterations`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct IterationReport {
    pub rounds: usize,
    pub final_pieces: usize,
    pub dropped: usize,
    pub budget_exhausted: bool,
    pub round_cap_hit: bool,
}

/// Registry of definitions plus the iteration, hull and plot drivers.
///
/// Definitions live in a flat arena indexed by [`Fid`]; pieces refer to them by index
/// only, so self-referential and mutually recursive recipes need no shared ownership.
pub struct FractalSystem {
    pub(crate) defns: Vec<FractalDefn>,
    /// Hard cap on the generation size at the end of any round.
    pub max_pieces: usize,
    /// Hard cap on iteration rounds.
    pub max_rounds: usize,
    /// Canvas height used to flip engine y coordinates when plotting.
    pub drawing_size: f64,
    /// Predicate for definitions without their own.
    pub iteration_fn: IterationFn,
    /// Metric for definitions without their own.
    pub metric: Metric,
    pub initial_pieces: Vec<Piece>,
    pub piece_sorter: Option<PieceSorter>,
    pub(crate) generation: Vec<ConcretePiece>,
    pub(crate) rng: FractalRng,
}

impl Default for FractalSystem {
    fn default() -> Self {
        Self::with_seed(0)
    }
}

impl fmt::Debug for FractalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FractalSystem")
            .field("defns", &self.defns)
            .field("max_pieces", &self.max_pieces)
            .field("max_rounds", &self.max_rounds)
            .field("drawing_size", &self.drawing_size)
            .field("metric", &self.metric)
            .field("initial_pieces", &self.initial_pieces.len())
            .field("generation", &self.generation.len())
            .field("piece_sorter", &self.piece_sorter.is_some())
            .finish()
    }
}

impl FractalSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            defns: Vec::new(),
            max_pieces: DEFAULT_MAX_PIECES,
            max_rounds: DEFAULT_MAX_ROUNDS,
            drawing_size: DEFAULT_DRAWING_SIZE,
            iteration_fn: default_iteration_fn(),
            metric: Metric::default(),
            initial_pieces: Vec::new(),
            piece_sorter: None,
            generation: Vec::new(),
            rng: seeded_rng(seed),
        }
    }

    /// Restart the random stream. Call before hull solving and iteration to reproduce output.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = seeded_rng(seed);
    }

    pub fn rng_mut(&mut self) -> &mut FractalRng {
        &mut self.rng
    }

    /// Replace all definitions with `n` empty ones, fids `0..n`.
    pub fn make_defns(&mut self, n: usize) -> IfsResult<&mut Self> {
        if n == 0 || n > MAX_DEFNS {
            return Err(IfsError::validation(format!(
                "definition count must be in 1..={MAX_DEFNS}, got {n}"
            )));
        }
        self.defns = (0..n).map(FractalDefn::new).collect();
        Ok(self)
    }

    /// Append an empty definition with the next fid.
    pub fn add_defn(&mut self) -> IfsResult<&mut FractalDefn> {
        let fid = self.defns.len();
        if fid >= MAX_DEFNS {
            return Err(IfsError::validation(format!(
                "cannot exceed {MAX_DEFNS} definitions"
            )));
        }
        self.defns.push(FractalDefn::new(fid));
        Ok(&mut self.defns[fid])
    }

    /// Definition for `fid`, or `None` if it does not exist.
    pub fn lookup_defn(&self, fid: Fid) -> Option<&FractalDefn> {
        self.defns.get(fid)
    }

    pub fn defn_mut(&mut self, fid: Fid) -> IfsResult<&mut FractalDefn> {
        let count = self.defns.len();
        self.defns
            .get_mut(fid)
            .ok_or_else(|| IfsError::validation(format!("unknown fid {fid} (have {count})")))
    }

    pub fn defns(&self) -> &[FractalDefn] {
        &self.defns
    }

    pub fn add_initial(&mut self, piece: Piece) -> &mut Self {
        self.initial_pieces.push(piece);
        self
    }

    /// Check setup before running: caps, sizes and every static fid.
    ///
    /// Fids produced by closures can only be checked at run time; those are dropped.
    pub fn validate(&self) -> IfsResult<()> {
        if self.max_pieces == 0 {
            return Err(IfsError::validation("max_pieces must be > 0"));
        }
        if self.max_rounds == 0 {
            return Err(IfsError::validation("max_rounds must be > 0"));
        }
        if !(self.drawing_size.is_finite() && self.drawing_size > 0.0) {
            return Err(IfsError::validation("drawing_size must be finite and > 0"));
        }
        if self.initial_pieces.len() > self.max_pieces {
            return Err(IfsError::validation(format!(
                "{} initial pieces exceed max_pieces {}",
                self.initial_pieces.len(),
                self.max_pieces
            )));
        }
        let check_fid = |piece: &Piece, owner: &str| -> IfsResult<()> {
            match piece.fid.as_static() {
                Some(&fid) if fid >= self.defns.len() => Err(IfsError::validation(format!(
                    "{owner} references unknown fid {fid}"
                ))),
                _ => Ok(()),
            }
        };
        for piece in &self.initial_pieces {
            check_fid(piece, "initial piece")?;
        }
        for defn in &self.defns {
            if let Children::Static(children) = &defn.children {
                for child in children {
                    check_fid(child, &format!("definition {}", defn.fid()))?;
                }
            }
            if let Some(d) = defn.manual_diameter {
                if !(d.is_finite() && d > 0.0) {
                    return Err(IfsError::validation(format!(
                        "definition {} manual diameter must be finite and > 0",
                        defn.fid()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Canvas diameter of `piece`, if its definition exists.
    pub fn diameter_of(&self, piece: &ConcretePiece) -> Option<f64> {
        self.lookup_defn(piece.fid)
            .map(|d| d.diameter_of(&piece.transform, &self.metric))
    }

    /// Seed the generation from `initial_pieces` and expand until nothing changes or a
    /// cap is hit.
    #[tracing::instrument(skip(self))]
    pub fn do_iterations(&mut self) -> IterationReport {
        let mut report = IterationReport::default();

        let mut seeds = Vec::with_capacity(self.initial_pieces.len());
        for piece in &self.initial_pieces {
            let mut ctx = ResolveCtx::detached(&mut self.rng);
            let seed = piece.resolve(&mut ctx, Progress::FULL);
            if seed.fid >= self.defns.len() {
                tracing::debug!(fid = seed.fid, "dropping initial piece with unknown fid");
                report.dropped += 1;
                continue;
            }
            seeds.push(seed);
        }
        if seeds.len() > self.max_pieces {
            tracing::warn!(
                seeds = seeds.len(),
                max_pieces = self.max_pieces,
                "initial generation already exceeds max_pieces"
            );
        }
        self.generation = seeds;

        loop {
            let stats = self.iterate_once();
            report.rounds += 1;
            report.dropped += stats.dropped;
            tracing::debug!(
                round = report.rounds,
                pieces = self.generation.len(),
                expanded = stats.expanded,
                "iteration round"
            );
            if stats.budget_exhausted {
                tracing::warn!(
                    max_pieces = self.max_pieces,
                    "max pieces exceeded; remaining pieces frozen"
                );
                report.budget_exhausted = true;
                break;
            }
            if stats.expanded == 0 {
                break;
            }
            if report.rounds >= self.max_rounds {
                tracing::warn!(rounds = report.rounds, "forced stop at round cap");
                report.round_cap_hit = true;
                break;
            }
        }

        report.final_pieces = self.generation.len();
        tracing::info!(
            rounds = report.rounds,
            pieces = report.final_pieces,
            dropped = report.dropped,
            "iteration finished"
        );
        report
    }

    /// Expand the current generation by one round.
    ///
    /// Terminal and frozen pieces carry over untouched. Once the piece budget would be
    /// exceeded, every piece still active at the end of the round is frozen, including
    /// children produced earlier in the same round.
    pub fn iterate_once(&mut self) -> RoundStats {
        let current = std::mem::take(&mut self.generation);
        let n = current.len();
        let mut next = Vec::with_capacity(n);
        let mut stats = RoundStats::default();

        for (i, piece) in current.into_iter().enumerate() {
            if !piece.is_active() {
                next.push(piece);
                continue;
            }
            if stats.budget_exhausted {
                next.push(piece.with_state(PieceState::Frozen));
                continue;
            }
            let Some(defn) = self.defns.get(piece.fid) else {
                tracing::debug!(fid = piece.fid, "dropping piece with unknown fid");
                stats.dropped += 1;
                continue;
            };

            let diameter = defn.diameter_of(&piece.transform, &self.metric);
            let expands = defn.should_continue(
                &PieceContext {
                    piece: &piece,
                    diameter,
                },
                &self.iteration_fn,
            );
            if !expands || defn.has_no_static_children() {
                next.push(piece.with_state(PieceState::Terminal));
                stats.terminated += 1;
                continue;
            }

            let children = {
                let mut ctx = ResolveCtx::within(&mut self.rng, &piece, diameter);
                defn.get_children(&mut ctx)
            };
            let remaining = n - i - 1;
            if next.len() + children.len() + remaining > self.max_pieces {
                stats.budget_exhausted = true;
                next.push(piece.with_state(PieceState::Frozen));
                continue;
            }
            if children.is_empty() {
                stats.pruned += 1;
                continue;
            }

            let intervals = piece.split_progress(children.len());
            let mut ctx = ResolveCtx::within(&mut self.rng, &piece, diameter);
            for (child, interval) in children.iter().zip(intervals) {
                let resolved = child.resolve(&mut ctx, interval);
                if resolved.fid >= self.defns.len() {
                    tracing::debug!(fid = resolved.fid, "dropping child with unknown fid");
                    stats.dropped += 1;
                    continue;
                }
                next.push(resolved);
            }
            stats.expanded += 1;
        }

        if stats.budget_exhausted {
            for piece in next.iter_mut().filter(|p| p.is_active()) {
                piece.state = PieceState::Frozen;
            }
        }
        self.generation = next;
        stats
    }

    /// Number of pieces in the current generation.
    pub fn final_size(&self) -> usize {
        self.generation.len()
    }

    pub fn pieces(&self) -> &[ConcretePiece] {
        &self.generation
    }

    /// Sort the generation (if a sorter is set) and hand each piece to its plotter.
    ///
    /// Returns the number of pieces whose definition draws.
    #[tracing::instrument(skip(self, canvas))]
    pub fn plot(&mut self, canvas: &mut dyn Canvas) -> usize {
        if let Some(sorter) = &self.piece_sorter {
            sort_pieces(&mut self.generation, sorter, &mut self.rng);
        }
        let mut drawn = 0;
        for piece in &self.generation {
            let Some(defn) = self.defns.get(piece.fid) else {
                continue;
            };
            if !defn.plotter.draws {
                continue;
            }
            let mut ctx = PlotCtx {
                piece,
                diameter: defn.diameter_of(&piece.transform, &self.metric),
                hull: defn.hull(),
                drawing_size: self.drawing_size,
                rng: &mut self.rng,
            };
            defn.plotter.plot(canvas, &mut ctx);
            drawn += 1;
        }
        tracing::info!(drawn, "plotted");
        drawn
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fractal/system.rs"]
mod tests;
