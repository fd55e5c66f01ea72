//! Deferred-value and child-list generators.
//!
//! Every generator must treat a missing context piece as a request for its largest
//! instantiation: the hull solver evaluates them that way, and an undersized hull lets
//! recursion run past its intended minimum diameter.

use std::sync::Arc;

use rand::Rng as _;
use rand::seq::SliceRandom as _;

use crate::foundation::core::{Fid, Vec2};
use crate::foundation::error::{IfsError, IfsResult};
use crate::fractal::defn::ChildrenFn;
use crate::fractal::piece::{Deferred, Piece, ResolveCtx};
use crate::transform::matrix::Matrix2;

/// Centres of an evenly divided rectangle.
///
/// With `steps_x = 4` over `[-1, 1]`, positions `0..4` map to `-0.75, -0.25, 0.25, 0.75`.
/// Fractional positions interpolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub steps_x: usize,
    pub steps_y: usize,
    pub min: Vec2,
    pub max: Vec2,
}

impl Grid {
    /// Grid over `[-1, 1] x [-1, 1]`.
    pub fn unit(steps_x: usize, steps_y: usize) -> Self {
        Self {
            steps_x,
            steps_y,
            min: Vec2::new(-1.0, -1.0),
            max: Vec2::new(1.0, 1.0),
        }
    }

    pub fn at(&self, x: f64, y: f64) -> Vec2 {
        let px = (x + 0.5) / self.steps_x.max(1) as f64;
        let py = (y + 0.5) / self.steps_y.max(1) as f64;
        Vec2::new(
            self.min.x + px * (self.max.x - self.min.x),
            self.min.y + py * (self.max.y - self.min.y),
        )
    }

    /// Every tile centre, column-major (x outer, y inner).
    pub fn centres(&self) -> Vec<Vec2> {
        (0..self.steps_x)
            .flat_map(|x| (0..self.steps_y).map(move |y| (x, y)))
            .map(|(x, y)| self.at(x as f64, y as f64))
            .collect()
    }
}

/// Shorthand for [`Grid::unit`].
pub fn grid(steps_x: usize, steps_y: usize) -> Grid {
    Grid::unit(steps_x, steps_y)
}

fn tiles(fid: Fid, n: usize) -> Vec<Piece> {
    let scale = Matrix2::scale(1.0 / n.max(1) as f64);
    grid(n, n)
        .centres()
        .into_iter()
        .map(|v| Piece::new(fid, v, scale))
        .collect()
}

/// Split `[-1, 1]²` into `n x n` tiles and keep `m` at random.
///
/// Without a context piece all `n²` tiles are returned.
pub fn gen_children_rand_small_squares(fid: Fid, m: usize, n: usize) -> ChildrenFn {
    Arc::new(move |ctx: &mut ResolveCtx<'_>| {
        let all = tiles(fid, n);
        if ctx.context.is_none() {
            return all;
        }
        let keep = m.min(all.len());
        rand::seq::index::sample(ctx.rng, all.len(), keep)
            .into_iter()
            .map(|i| all[i].clone())
            .collect()
    })
}

/// Distance-based thinning of an `n x n` tile split.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeOut {
    pub fid: Fid,
    pub n: usize,
    pub centre: Vec2,
    /// Pieces at least this large always keep every tile.
    pub cutoff_diameter: f64,
    pub d1: f64,
    pub d2: f64,
    /// Keep probability at distance `d1` or closer.
    pub p1: f64,
    /// Keep probability at distance `d2` or further.
    pub p2: f64,
}

impl FadeOut {
    pub fn keep_probability(&self, distance: f64) -> f64 {
        let span = self.d2 - self.d1;
        let t = if span == 0.0 {
            if distance < self.d1 { 0.0 } else { 1.0 }
        } else {
            ((distance - self.d1) / span).clamp(0.0, 1.0)
        };
        self.p1 + t * (self.p2 - self.p1)
    }
}

/// Keep each tile with a probability that fades with the parent's distance from `centre`.
///
/// Only pieces smaller than `cutoff_diameter` are thinned. Without a context piece every
/// tile is kept.
pub fn gen_children_fade_out(opts: FadeOut) -> ChildrenFn {
    Arc::new(move |ctx: &mut ResolveCtx<'_>| {
        let p = match ctx.context {
            Some(c) if c.diameter < opts.cutoff_diameter => {
                opts.keep_probability((c.piece.vector() - opts.centre).hypot())
            }
            _ => 1.0,
        };
        let all = tiles(opts.fid, opts.n);
        if p >= 1.0 {
            return all;
        }
        all.into_iter()
            .filter(|_| ctx.rng.r#gen::<f64>() < p)
            .collect()
    })
}

/// Two-piece dragon whose fold height follows the parent's progress.
///
/// The fractal dimension varies from 1 to 2 along the curve. Without context the full
/// height (progress 1) is used.
pub fn gen_children_variable_dragon(fid: Fid) -> ChildrenFn {
    Arc::new(move |ctx: &mut ResolveCtx<'_>| {
        let h = ctx.piece().map_or(1.0, |p| p.progress_midpoint());
        let left = Piece::new(
            fid,
            Vec2::new(-0.5, 0.5 * h),
            Matrix2::new(0.5, -0.5 * h, 0.5 * h, 0.5),
        );
        let right = Piece::new(
            fid,
            Vec2::new(0.5, 0.5 * h),
            Matrix2::new(-0.5, -0.5 * h, 0.5 * h, -0.5),
        )
        .reversed();
        vec![left, right]
    })
}

/// Uniform choice from `fids`. An empty list yields an invalid fid, which the driver drops.
pub fn gen_fid_rand(fids: Vec<Fid>) -> Deferred<Fid> {
    Deferred::dynamic(move |ctx: &mut ResolveCtx<'_>| {
        fids.choose(ctx.rng).copied().unwrap_or(Fid::MAX)
    })
}

/// Uniform vector in `x_range x y_range` (bounds may be given in either order).
pub fn gen_vect_rand(x_range: (f64, f64), y_range: (f64, f64)) -> Deferred<Vec2> {
    Deferred::dynamic(move |ctx: &mut ResolveCtx<'_>| {
        let x = x_range.0 + (x_range.1 - x_range.0) * ctx.rng.r#gen::<f64>();
        let y = y_range.0 + (y_range.1 - y_range.0) * ctx.rng.r#gen::<f64>();
        Vec2::new(x, y)
    })
}

/// Any rotation, optionally reflected, at a fixed scale.
pub fn gen_mx_rand_circ(scale: f64, reflect: bool) -> Deferred<Matrix2> {
    Deferred::dynamic(move |ctx: &mut ResolveCtx<'_>| {
        let mx = Matrix2::rotate(ctx.rng.gen_range(0.0..360.0), scale);
        if reflect && ctx.rng.gen_bool(0.5) {
            mx * Matrix2::reflect_x(1.0)
        } else {
            mx
        }
    })
}

/// Uniform element of the dihedral group of a `sides`-gon (rotations only unless `reflect`).
pub fn gen_mx_rand_dihedral(sides: u32, scale: f64, reflect: bool) -> IfsResult<Deferred<Matrix2>> {
    if sides < 2 {
        return Err(IfsError::geometry(format!(
            "dihedral group needs at least 2 sides, got {sides}"
        )));
    }
    Ok(Deferred::dynamic(move |ctx: &mut ResolveCtx<'_>| {
        let rotation_num = ctx.rng.gen_range(0..sides);
        let reflected = reflect && ctx.rng.gen_bool(0.5);
        Matrix2::dihedral_element(sides, rotation_num, reflected, scale)
    }))
}

/// Symmetries of a square with a flat bottom edge.
pub fn gen_mx_rand_sq(scale: f64, reflect: bool) -> IfsResult<Deferred<Matrix2>> {
    gen_mx_rand_dihedral(4, scale, reflect)
}

/// Symmetries of an equilateral triangle with a flat bottom edge.
pub fn gen_mx_rand_tri(scale: f64, reflect: bool) -> IfsResult<Deferred<Matrix2>> {
    gen_mx_rand_dihedral(3, scale, reflect)
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/generator.rs"]
mod tests;
