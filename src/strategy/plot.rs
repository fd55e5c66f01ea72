//! Plot functions and the per-definition [`Plotter`].

use std::{fmt, sync::Arc};

use rand::Rng as _;

use crate::canvas::Canvas;
use crate::foundation::core::{FractalRng, Point, Rgba8, Vec2, palette};
use crate::fractal::piece::ConcretePiece;
use crate::strategy::colour::{ColourFn, default_colour_fn};
use crate::strategy::path::{shrink, spiral_fill};

/// Piece diameter at which `scale_width` leaves the stroke width unchanged.
pub const BASE_SCALE_WIDTH: f64 = 100.0;

/// Outline used when neither explicit points nor a hull are available.
pub const UNIT_SQUARE: [Vec2; 5] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// What a plot function can see about the piece being drawn.
pub struct PlotCtx<'a> {
    pub piece: &'a ConcretePiece,
    /// Canvas diameter of the piece under its definition's metric.
    pub diameter: f64,
    /// Hull of the piece's definition at unit transform, if solved.
    pub hull: Option<&'a [Vec2]>,
    pub drawing_size: f64,
    pub rng: &'a mut FractalRng,
}

impl PlotCtx<'_> {
    /// Engine coordinates (y up) to canvas coordinates (y down).
    pub fn canvas_pos(&self, v: Vec2) -> Point {
        Point::new(v.x, self.drawing_size - v.y)
    }
}

/// Emits primitives for one piece in the given colour.
pub type PlotFn = Arc<dyn Fn(&mut dyn Canvas, &mut PlotCtx<'_>, Rgba8) + Send + Sync>;

/// Hand-drawn jitter: uniform in a square of side `pixels`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Wobble {
    pub pixels: f64,
}

impl Wobble {
    pub fn sample(self, rng: &mut FractalRng) -> Vec2 {
        let half = 0.5 * self.pixels;
        if half <= 0.0 || !half.is_finite() {
            return Vec2::ZERO;
        }
        Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half))
    }
}

fn wobble_offset(wobble: Option<Wobble>, rng: &mut FractalRng) -> Vec2 {
    wobble.map_or(Vec2::ZERO, |w| w.sample(rng))
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DotOpts {
    /// Radius multiplier; values below 1 leave gaps between neighbouring dots.
    pub expand_factor: f64,
    /// Offset of the dot in the piece's local frame.
    pub offset: Option<Vec2>,
    pub wobble: Option<Wobble>,
}

impl Default for DotOpts {
    fn default() -> Self {
        Self {
            expand_factor: 1.0,
            offset: None,
            wobble: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PathOpts {
    /// Local-frame outline. Falls back to the definition hull, then a closed unit square.
    pub points: Option<Vec<Vec2>>,
    /// Replace the outline by an inward spiral covering its interior.
    pub fill: bool,
    pub closed: bool,
    pub curved: bool,
    /// Full stroke width in canvas units.
    pub width: f64,
    /// Scale `width` by `diameter / BASE_SCALE_WIDTH`.
    pub scale_width: bool,
    /// Offset the outline inward by half the stroke width.
    pub shrink: bool,
    pub expand_factor: f64,
    pub wobble: Option<Wobble>,
}

impl Default for PathOpts {
    fn default() -> Self {
        Self {
            points: None,
            fill: false,
            closed: false,
            curved: false,
            width: 1.0,
            scale_width: false,
            shrink: false,
            expand_factor: 1.0,
            wobble: None,
        }
    }
}

/// One dot per piece, radius `0.5 * expand_factor * diameter`.
pub fn plot_dot(opts: DotOpts) -> PlotFn {
    Arc::new(move |canvas: &mut dyn Canvas, ctx: &mut PlotCtx<'_>, colour: Rgba8| {
        draw_dot(canvas, ctx, colour, &opts)
    })
}

/// One path per piece; see [`PathOpts`].
pub fn plot_path(opts: PathOpts) -> PlotFn {
    Arc::new(move |canvas: &mut dyn Canvas, ctx: &mut PlotCtx<'_>, colour: Rgba8| {
        match (&opts.points, ctx.hull) {
            (Some(points), _) => draw_path(canvas, ctx, colour, points, opts.closed, &opts),
            (None, Some(hull)) => draw_path(canvas, ctx, colour, hull, opts.closed, &opts),
            (None, None) => draw_path(canvas, ctx, colour, &UNIT_SQUARE, true, &opts),
        }
    })
}

pub fn draw_dot(canvas: &mut dyn Canvas, ctx: &mut PlotCtx<'_>, colour: Rgba8, opts: &DotOpts) {
    let t = ctx.piece.transform;
    let mut centre = t.vector;
    if let Some(offset) = opts.offset {
        centre += t.matrix.apply(offset);
    }
    centre += wobble_offset(opts.wobble, ctx.rng);
    let radius = 0.5 * opts.expand_factor * ctx.diameter;
    canvas.add_point(ctx.canvas_pos(centre), colour, radius);
}

/// Transform `points` into the piece's frame and emit them as a line or curve.
pub fn draw_path(
    canvas: &mut dyn Canvas,
    ctx: &mut PlotCtx<'_>,
    colour: Rgba8,
    points: &[Vec2],
    closed: bool,
    opts: &PathOpts,
) {
    let t = ctx.piece.transform;
    let mut outline: Vec<Vec2> = points
        .iter()
        .map(|&p| {
            let jitter = wobble_offset(opts.wobble, ctx.rng);
            t.vector + jitter + t.matrix.apply(p) * opts.expand_factor
        })
        .collect();

    let mut width = opts.width;
    if opts.scale_width {
        width *= ctx.diameter / BASE_SCALE_WIDTH;
    }
    if opts.shrink {
        let amount = (0.5 * width).min(0.5 * ctx.diameter);
        outline = shrink(&outline, amount);
    }
    let mut closed = closed;
    if opts.fill && outline.len() > 2 {
        outline = spiral_fill(&outline, width);
        closed = false;
    }

    let positions: Vec<Point> = outline.iter().map(|&v| ctx.canvas_pos(v)).collect();
    if opts.curved {
        canvas.add_bezier(&positions, colour, width, closed);
    } else {
        canvas.add_line(&positions, colour, width, closed);
    }
}

/// Ordered `(plot, colour)` layers for one definition.
#[derive(Clone)]
pub struct Plotter {
    /// When `false`, pieces of this definition are not drawn at all.
    pub draws: bool,
    layers: Vec<(PlotFn, Option<ColourFn>)>,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Plotter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plotter")
            .field("draws", &self.draws)
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            draws: true,
            layers: Vec::new(),
        }
    }

    pub fn hidden() -> Self {
        Self {
            draws: false,
            layers: Vec::new(),
        }
    }

    /// Append a layer. A missing colour function draws black.
    pub fn add(&mut self, plot: PlotFn, colour: Option<ColourFn>) -> &mut Self {
        self.layers.push((plot, colour));
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Draw one piece through every layer in order.
    ///
    /// With no layers configured, pieces are drawn as dots coloured by progress from black
    /// to blue.
    pub fn plot(&self, canvas: &mut dyn Canvas, ctx: &mut PlotCtx<'_>) {
        if !self.draws {
            return;
        }
        if self.layers.is_empty() {
            let colour = default_colour_fn()(ctx.piece);
            draw_dot(canvas, ctx, colour, &DotOpts::default());
            return;
        }
        for (plot, colour_fn) in &self.layers {
            let colour = colour_fn
                .as_ref()
                .map_or(palette::BLACK, |f| f(ctx.piece));
            plot(canvas, ctx, colour);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/plot.rs"]
mod tests;
