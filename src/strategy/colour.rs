//! Colour functions: map a finished piece to a straight-alpha colour.

use std::sync::Arc;

use crate::foundation::core::{Rgba8, palette};
use crate::fractal::piece::ConcretePiece;
use crate::strategy::property::{self, TsfmFn};
use crate::transform::metric::Metric;

/// Colour for a piece.
pub type ColourFn = Arc<dyn Fn(&ConcretePiece) -> Rgba8 + Send + Sync>;

/// Per-channel linear blend, rounded and clamped.
pub fn mix(from: Rgba8, to: Rgba8, t: f64) -> Rgba8 {
    let ch = |a: u8, b: u8| {
        let v = f64::from(a) * (1.0 - t) + f64::from(b) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba8::rgba(
        ch(from.r, to.r),
        ch(from.g, to.g),
        ch(from.b, to.b),
        ch(from.a, to.a),
    )
}

/// Look up `t ∈ [0, 1]` in an evenly spaced colour list.
///
/// `t` is clamped (NaN maps to the first colour). With `snap` the nearest listed colour is
/// used instead of interpolating. The result's alpha is scaled by `alpha`.
pub fn gradient(colours: &[Rgba8], t: f64, alpha: f64, snap: bool) -> Rgba8 {
    let Some(last) = colours.len().checked_sub(1) else {
        return palette::BLACK.fade(alpha);
    };
    let max = last as f64;
    let pos = if t.is_nan() {
        0.0
    } else {
        (t * max).clamp(0.0, max)
    };
    if snap {
        return colours[pos.round() as usize].fade(alpha);
    }
    let lo = pos.floor();
    let rem = pos - lo;
    let start = colours[lo as usize];
    let end = colours[pos.ceil() as usize];
    mix(start, end, rem).fade(alpha)
}

/// One colour everywhere.
pub fn colour_fixed(colour: Rgba8, alpha: f64) -> ColourFn {
    let c = gradient(&[colour], 0.0, alpha, false);
    Arc::new(move |_: &ConcretePiece| c)
}

/// Gradient over the midpoint of the piece's progress interval.
pub fn colour_by_progress(colours: Vec<Rgba8>, alpha: f64, snap: bool) -> ColourFn {
    Arc::new(move |piece: &ConcretePiece| {
        gradient(&colours, piece.progress_midpoint(), alpha, snap)
    })
}

/// Gradient over a transform property, mapping `[min, max]` onto the colour list.
pub fn colour_by_tsfm(
    min: f64,
    max: f64,
    colours: Vec<Rgba8>,
    tsfm: TsfmFn,
    alpha: f64,
    snap: bool,
) -> ColourFn {
    let span = max - min;
    Arc::new(move |piece: &ConcretePiece| {
        let value = tsfm(&piece.transform);
        let t = if span == 0.0 { 0.0 } else { (value - min) / span };
        gradient(&colours, t, alpha, snap)
    })
}

/// Gradient over `log2(metric)`, so each halving of size moves one unit.
pub fn colour_by_log2_size(
    min: f64,
    max: f64,
    colours: Vec<Rgba8>,
    metric: Metric,
    alpha: f64,
    snap: bool,
) -> ColourFn {
    colour_by_tsfm(min, max, colours, property::log2_size(metric), alpha, snap)
}

/// Used when a plot layer has no colour function.
pub fn default_colour_fn() -> ColourFn {
    colour_by_progress(vec![palette::BLACK, palette::BLUE], 1.0, false)
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/colour.rs"]
mod tests;
