//! Fractal definitions: reusable recipes of child pieces plus expansion and drawing rules.

use std::{fmt, sync::Arc};

use crate::foundation::core::{Fid, Vec2};
use crate::fractal::piece::{Piece, PieceContext, ResolveCtx};
use crate::strategy::iteration::IterationFn;
use crate::strategy::plot::Plotter;
use crate::transform::{affine::Transform, metric::Metric};

/// Diameter of the default seed hull, used until a hull or manual value is known.
pub const DEFAULT_RELATIVE_DIAMETER: f64 = 2.0;

/// Child list computed on demand from the resolve context.
pub type ChildrenFn = Arc<dyn Fn(&mut ResolveCtx<'_>) -> Vec<Piece> + Send + Sync>;

#[derive(Clone)]
pub enum Children {
    Static(Vec<Piece>),
    Generated(ChildrenFn),
}

impl Default for Children {
    fn default() -> Self {
        Self::Static(Vec::new())
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(v) => f.debug_tuple("Static").field(&v.len()).finish(),
            Self::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// One recipe in the system arena, addressed by its [`Fid`].
#[derive(Clone)]
pub struct FractalDefn {
    fid: Fid,
    pub children: Children,
    /// Overrides the system's default predicate.
    pub iteration_fn: Option<IterationFn>,
    /// Overrides the system's default metric.
    pub metric: Option<Metric>,
    /// Diameter of the unit instance; wins over the hull-derived value.
    pub manual_diameter: Option<f64>,
    hull_diameter: Option<f64>,
    hull: Option<Vec<Vec2>>,
    pub plotter: Plotter,
}

impl fmt::Debug for FractalDefn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FractalDefn")
            .field("fid", &self.fid)
            .field("children", &self.children)
            .field("iteration_fn", &self.iteration_fn.is_some())
            .field("metric", &self.metric)
            .field("manual_diameter", &self.manual_diameter)
            .field("hull_diameter", &self.hull_diameter)
            .field("hull_len", &self.hull.as_ref().map(Vec::len))
            .field("plotter", &self.plotter)
            .finish()
    }
}

impl FractalDefn {
    pub fn new(fid: Fid) -> Self {
        Self {
            fid,
            children: Children::default(),
            iteration_fn: None,
            metric: None,
            manual_diameter: None,
            hull_diameter: None,
            hull: None,
            plotter: Plotter::new(),
        }
    }

    pub fn fid(&self) -> Fid {
        self.fid
    }

    /// Append a static child. A generator, if set, is replaced by a static list.
    pub fn add_child(&mut self, piece: Piece) -> &mut Self {
        match &mut self.children {
            Children::Static(list) => list.push(piece),
            Children::Generated(_) => {
                tracing::warn!(fid = self.fid, "replacing child generator with a static child");
                self.children = Children::Static(vec![piece]);
            }
        }
        self
    }

    pub fn set_generator(&mut self, generator: ChildrenFn) -> &mut Self {
        self.children = Children::Generated(generator);
        self
    }

    pub fn set_iteration_fn(&mut self, f: IterationFn) -> &mut Self {
        self.iteration_fn = Some(f);
        self
    }

    pub fn set_metric(&mut self, metric: Metric) -> &mut Self {
        self.metric = Some(metric);
        self
    }

    pub fn set_manual_diameter(&mut self, diameter: f64) -> &mut Self {
        self.manual_diameter = Some(diameter);
        self
    }

    /// A fixed, empty child list: pieces of this definition never expand.
    pub fn has_no_static_children(&self) -> bool {
        matches!(&self.children, Children::Static(v) if v.is_empty())
    }

    /// The static list, or the generator's output for `ctx`.
    pub fn get_children(&self, ctx: &mut ResolveCtx<'_>) -> Vec<Piece> {
        match &self.children {
            Children::Static(v) => v.clone(),
            Children::Generated(f) => f(ctx),
        }
    }

    /// Manual diameter, else hull-derived, else [`DEFAULT_RELATIVE_DIAMETER`].
    pub fn relative_diameter(&self) -> f64 {
        self.manual_diameter
            .or(self.hull_diameter)
            .unwrap_or(DEFAULT_RELATIVE_DIAMETER)
    }

    pub fn metric_or<'a>(&'a self, default: &'a Metric) -> &'a Metric {
        self.metric.as_ref().unwrap_or(default)
    }

    /// Canvas diameter of a piece of this definition at `transform`.
    pub fn diameter_of(&self, transform: &Transform, default_metric: &Metric) -> f64 {
        self.relative_diameter() * self.metric_or(default_metric).measure(transform)
    }

    pub fn should_continue(&self, ctx: &PieceContext<'_>, default: &IterationFn) -> bool {
        let f = self.iteration_fn.as_ref().unwrap_or(default);
        f(ctx)
    }

    pub fn hull(&self) -> Option<&[Vec2]> {
        self.hull.as_deref()
    }

    pub fn hull_diameter(&self) -> Option<f64> {
        self.hull_diameter
    }

    /// Install a hull by hand. Clears the derived diameter until hulls are recalculated.
    pub fn set_hull(&mut self, hull: Vec<Vec2>) -> &mut Self {
        self.hull = Some(hull);
        self.hull_diameter = None;
        self
    }

    pub(crate) fn store_hull(&mut self, hull: Vec<Vec2>) {
        self.hull = Some(hull);
    }

    pub(crate) fn store_hull_diameter(&mut self, diameter: Option<f64>) {
        self.hull_diameter = diameter;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fractal/defn.rs"]
mod tests;
