//! Abstract child templates and the concrete pieces the iteration driver works on.

use std::{fmt, sync::Arc};

use crate::foundation::core::{Fid, FractalRng, Vec2};
use crate::transform::{affine::Transform, matrix::Matrix2};

/// The piece currently being expanded, with its precomputed diameter.
#[derive(Clone, Copy, Debug)]
pub struct PieceContext<'a> {
    /// Piece whose children are being resolved.
    pub piece: &'a ConcretePiece,
    /// Canvas diameter of `piece` under its definition's metric.
    pub diameter: f64,
}

/// Everything a deferred value may look at while resolving.
///
/// `context` is `None` when the hull solver or the initial seeding evaluates a child; closures
/// must then return their largest (most conservative) instantiation.
pub struct ResolveCtx<'a> {
    /// Injected random stream; the only source of randomness for deferred values.
    pub rng: &'a mut FractalRng,
    /// The parent piece, if any.
    pub context: Option<PieceContext<'a>>,
}

impl<'a> ResolveCtx<'a> {
    /// Context-free resolution.
    pub fn detached(rng: &'a mut FractalRng) -> Self {
        Self { rng, context: None }
    }

    /// Resolution relative to a parent piece.
    pub fn within(rng: &'a mut FractalRng, piece: &'a ConcretePiece, diameter: f64) -> Self {
        Self {
            rng,
            context: Some(PieceContext { piece, diameter }),
        }
    }

    pub fn piece(&self) -> Option<&'a ConcretePiece> {
        self.context.map(|c| c.piece)
    }
}

/// Closure producing a deferred value.
pub type DeferredFn<T> = Arc<dyn Fn(&mut ResolveCtx<'_>) -> T + Send + Sync>;

/// A literal value, or a function of the resolve context.
pub enum Deferred<T> {
    Static(T),
    Dynamic(DeferredFn<T>),
}

impl<T: Clone> Deferred<T> {
    pub fn dynamic(f: impl Fn(&mut ResolveCtx<'_>) -> T + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    /// Evaluate against `ctx`. Static values ignore the context and consume no randomness.
    pub fn resolve(&self, ctx: &mut ResolveCtx<'_>) -> T {
        match self {
            Self::Static(v) => v.clone(),
            Self::Dynamic(f) => f(ctx),
        }
    }

    /// The literal value, when there is one.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(v) => Some(v),
            Self::Dynamic(_) => None,
        }
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

impl<T> Clone for Deferred<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Static(v) => Self::Static(v.clone()),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(v) => f.debug_tuple("Static").field(v).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Sequential position of a piece, for colour and animation continuity.
///
/// `start > end` marks a reversed interval; sub-intervals always walk from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Progress {
    pub start: f64,
    pub end: f64,
}

impl Default for Progress {
    fn default() -> Self {
        Self::FULL
    }
}

impl Progress {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn midpoint(self) -> f64 {
        0.5 * (self.start + self.end)
    }

    pub fn is_reversed(self) -> bool {
        self.start > self.end
    }

    /// Same interval, walked the other way.
    pub fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    /// `n` equal, contiguous sub-intervals in walking order.
    ///
    /// Shared boundaries are bit-identical, and the last interval ends exactly at `end`.
    pub fn split(self, n: usize) -> Vec<Progress> {
        if n == 0 {
            return Vec::new();
        }
        let step = (self.end - self.start) / n as f64;
        let boundary = |i: usize| {
            if i == n {
                self.end
            } else {
                self.start + step * i as f64
            }
        };
        (0..n)
            .map(|i| Progress::new(boundary(i), boundary(i + 1)))
            .collect()
    }
}

/// Expansion state of a concrete piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceState {
    /// May still expand.
    Active,
    /// Stopped naturally; never re-evaluated.
    Terminal,
    /// Held back by the piece budget; never re-evaluated.
    Frozen,
}

/// A fully resolved piece in the working generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ConcretePiece {
    pub fid: Fid,
    pub transform: Transform,
    pub iteration: u32,
    pub progress: Progress,
    pub state: PieceState,
}

impl ConcretePiece {
    /// A root piece: iteration 0, full progress, active.
    pub fn seed(fid: Fid, transform: Transform) -> Self {
        Self {
            fid,
            transform,
            iteration: 0,
            progress: Progress::FULL,
            state: PieceState::Active,
        }
    }

    pub fn vector(&self) -> Vec2 {
        self.transform.vector
    }

    pub fn matrix(&self) -> Matrix2 {
        self.transform.matrix
    }

    pub fn progress_midpoint(&self) -> f64 {
        self.progress.midpoint()
    }

    pub fn split_progress(&self, n: usize) -> Vec<Progress> {
        self.progress.split(n)
    }

    pub fn is_active(&self) -> bool {
        self.state == PieceState::Active
    }

    pub(crate) fn with_state(mut self, state: PieceState) -> Self {
        self.state = state;
        self
    }
}

/// Abstract child template owned by a definition.
#[derive(Clone, Debug)]
pub struct Piece {
    pub fid: Deferred<Fid>,
    pub vect: Deferred<Vec2>,
    pub mx: Deferred<Matrix2>,
    /// Walk the inherited progress interval backwards.
    pub reverse_progress: bool,
    /// Ignore the inherited interval and restart at `(0, 1)`.
    pub reset_progress: bool,
}

impl Piece {
    pub fn new(
        fid: impl Into<Deferred<Fid>>,
        vect: impl Into<Deferred<Vec2>>,
        mx: impl Into<Deferred<Matrix2>>,
    ) -> Self {
        Self {
            fid: fid.into(),
            vect: vect.into(),
            mx: mx.into(),
            reverse_progress: false,
            reset_progress: false,
        }
    }

    /// Template from a resolved transform.
    pub fn at(fid: Fid, transform: Transform) -> Self {
        Self::new(fid, transform.vector, transform.matrix)
    }

    pub fn dynamic_fid(
        mut self,
        f: impl Fn(&mut ResolveCtx<'_>) -> Fid + Send + Sync + 'static,
    ) -> Self {
        self.fid = Deferred::dynamic(f);
        self
    }

    pub fn dynamic_vect(
        mut self,
        f: impl Fn(&mut ResolveCtx<'_>) -> Vec2 + Send + Sync + 'static,
    ) -> Self {
        self.vect = Deferred::dynamic(f);
        self
    }

    pub fn dynamic_mx(
        mut self,
        f: impl Fn(&mut ResolveCtx<'_>) -> Matrix2 + Send + Sync + 'static,
    ) -> Self {
        self.mx = Deferred::dynamic(f);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_progress = true;
        self
    }

    pub fn reset(mut self) -> Self {
        self.reset_progress = true;
        self
    }

    pub fn resolve_fid(&self, ctx: &mut ResolveCtx<'_>) -> Fid {
        self.fid.resolve(ctx)
    }

    pub fn resolve_vect(&self, ctx: &mut ResolveCtx<'_>) -> Vec2 {
        self.vect.resolve(ctx)
    }

    pub fn resolve_mx(&self, ctx: &mut ResolveCtx<'_>) -> Matrix2 {
        self.mx.resolve(ctx)
    }

    /// Local transform `(vect, mx)` relative to the parent.
    pub fn resolve_transform(&self, ctx: &mut ResolveCtx<'_>) -> Transform {
        let vect = self.resolve_vect(ctx);
        let mx = self.resolve_mx(ctx);
        Transform::new(vect, mx)
    }

    /// Progress this child receives when handed `interval` by its parent.
    pub fn child_progress(&self, interval: Progress) -> Progress {
        if self.reset_progress {
            Progress::FULL
        } else if self.reverse_progress {
            interval.reversed()
        } else {
            interval
        }
    }

    /// Resolve into a concrete piece.
    ///
    /// With a context piece the result is that piece's child: transforms compose as
    /// `parent ∘ local` and the iteration count increments. Without one the result is a
    /// root piece at the local transform.
    pub fn resolve(&self, ctx: &mut ResolveCtx<'_>, interval: Progress) -> ConcretePiece {
        let fid = self.resolve_fid(ctx);
        let local = self.resolve_transform(ctx);
        let (transform, iteration) = match ctx.piece() {
            Some(parent) => (parent.transform.compose(local), parent.iteration + 1),
            None => (local, 0),
        };
        ConcretePiece {
            fid,
            transform,
            iteration,
            progress: self.child_progress(interval),
            state: PieceState::Active,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fractal/piece.rs"]
mod tests;
