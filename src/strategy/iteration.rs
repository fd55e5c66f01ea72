//! Predicates deciding whether a piece expands further.

use std::sync::Arc;

use crate::fractal::piece::PieceContext;

/// Default cap on expansion depth.
pub const DEFAULT_MAX_ITERATIONS: u32 = 6;
/// Default canvas diameter below which pieces stop expanding.
pub const DEFAULT_MIN_DIAMETER: f64 = 30.0;

/// Returns `true` when the piece in `ctx` should expand.
pub type IterationFn = Arc<dyn Fn(&PieceContext<'_>) -> bool + Send + Sync>;

/// Expand while the piece is larger than `min_diameter` and shallower than `max_iterations`.
pub fn standard(min_diameter: f64, max_iterations: u32) -> IterationFn {
    Arc::new(move |ctx: &PieceContext<'_>| {
        min_diameter < ctx.diameter && ctx.piece.iteration < max_iterations
    })
}

/// Expand while shallower than `max_iterations`, regardless of size.
pub fn depth(max_iterations: u32) -> IterationFn {
    Arc::new(move |ctx: &PieceContext<'_>| ctx.piece.iteration < max_iterations)
}

/// Never expand.
pub fn stop() -> IterationFn {
    Arc::new(|_: &PieceContext<'_>| false)
}

/// Always expand; the definition's children and the caps decide termination.
pub fn always() -> IterationFn {
    Arc::new(|_: &PieceContext<'_>| true)
}

/// [`standard`] with the default thresholds.
pub fn default_iteration_fn() -> IterationFn {
    standard(DEFAULT_MIN_DIAMETER, DEFAULT_MAX_ITERATIONS)
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/iteration.rs"]
mod tests;
