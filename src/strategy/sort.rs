//! Draw-order keys for the final generation.
//!
//! Later pieces are drawn on top, so ascending keys paint back to front.

use std::sync::Arc;

use rand::Rng as _;

use crate::foundation::core::{FractalRng, Vec2};
use crate::fractal::piece::ConcretePiece;
use crate::strategy::property::{self, TsfmFn};
use crate::transform::metric::min_abs_eigenvalue;

/// Sort key for a piece. The RNG allows random jitter between otherwise equal keys.
pub type PieceSorter = Arc<dyn Fn(&ConcretePiece, &mut FractalRng) -> f64 + Send + Sync>;

pub fn sort_randomly() -> PieceSorter {
    Arc::new(|_: &ConcretePiece, rng: &mut FractalRng| rng.r#gen::<f64>())
}

/// Key `tsfm(transform) + jitter * U[0, 1)`; `jitter = 0` consumes no randomness.
pub fn sort_by_tsfm(tsfm: TsfmFn, jitter: f64) -> PieceSorter {
    Arc::new(move |piece: &ConcretePiece, rng: &mut FractalRng| {
        let base = tsfm(&piece.transform);
        if jitter == 0.0 {
            base
        } else {
            base + jitter * rng.r#gen::<f64>()
        }
    })
}

/// Largest pieces first, so small detail stays visible.
pub fn sort_by_size() -> PieceSorter {
    sort_by_tsfm(
        property::custom(|t| -min_abs_eigenvalue(t.matrix)),
        0.0,
    )
}

/// Key `|vector - from|^power / scale`, plus optional jitter.
pub fn sort_by_distance(from: Vec2, power: f64, scale: f64, jitter: f64) -> PieceSorter {
    let dist = property::distance_pow(from, power);
    let scale = if scale == 0.0 { 1.0 } else { scale };
    sort_by_tsfm(property::custom(move |t| dist(t) / scale), jitter)
}

/// Stable sort by key. Keys are drawn once per piece, in current order.
pub fn sort_pieces(pieces: &mut Vec<ConcretePiece>, sorter: &PieceSorter, rng: &mut FractalRng) {
    let mut keyed: Vec<(f64, ConcretePiece)> = pieces
        .drain(..)
        .map(|p| (sorter(&p, rng), p))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    pieces.extend(keyed.into_iter().map(|(_, p)| p));
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/sort.rs"]
mod tests;
