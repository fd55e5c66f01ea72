use crate::canvas::drawing::Drawing;
use crate::foundation::core::{Fid, Rgba8, Vec2};
use crate::foundation::error::IfsResult;
use crate::fractal::defn::ChildrenFn;
use crate::fractal::hull::HullReport;
use crate::fractal::piece::{Deferred, Piece};
use crate::fractal::system::{FractalSystem, IterationReport};
use crate::recipe::colour::ColourDef;
use crate::recipe::model::{
    ColourSpecDef, FidDef, GeneratorDef, IterationDef, MatrixDef, MetricDef, PieceDef, PlotDef,
    PropertyDef, Recipe, SortDef, VectorDef,
};
use crate::strategy::{colour, generator, iteration, plot, property, sort};
use crate::transform::matrix::Matrix2;
use crate::transform::metric::Metric;

/// Everything one run of a recipe produced.
#[derive(Debug)]
pub struct Generated {
    pub system: FractalSystem,
    pub hulls: Option<HullReport>,
    pub iterations: IterationReport,
    pub drawing: Drawing,
    pub plotted: usize,
}

impl Recipe {
    /// Validate, then assemble a live system. Hulls are not solved here.
    #[tracing::instrument(
        skip(self),
        fields(definitions = self.definitions.len(), seed = self.seed)
    )]
    pub fn build(&self) -> IfsResult<FractalSystem> {
        self.validate()?;

        let mut fs = FractalSystem::with_seed(self.seed);
        fs.max_pieces = self.max_pieces;
        fs.max_rounds = self.max_rounds;
        fs.drawing_size = self.drawing_size;
        fs.iteration_fn = self.iteration.to_fn();
        fs.metric = self.metric.to_metric();
        fs.piece_sorter = self.sort.as_ref().map(SortDef::to_sorter);
        fs.make_defns(self.definitions.len())?;

        for (fid, def) in self.definitions.iter().enumerate() {
            let defn = fs.defn_mut(fid)?;
            for child in &def.children {
                defn.add_child(child.to_piece()?);
            }
            if let Some(g) = &def.generator {
                defn.set_generator(g.to_fn());
            }
            if let Some(it) = &def.iteration {
                defn.set_iteration_fn(it.to_fn());
            }
            if let Some(m) = def.metric {
                defn.set_metric(m.to_metric());
            }
            if let Some(d) = def.diameter {
                defn.set_manual_diameter(d);
            }
            defn.plotter.draws = def.draws;
            for layer in &def.layers {
                defn.plotter
                    .add(layer.plot.to_fn(), layer.colour.as_ref().map(ColourSpecDef::to_fn));
            }
        }
        for piece in &self.initial {
            fs.add_initial(piece.to_piece()?);
        }
        tracing::debug!(initial = self.initial.len(), "recipe built");
        Ok(fs)
    }

    /// Build, solve hulls (when configured), iterate and plot into a fresh drawing.
    #[tracing::instrument(skip(self))]
    pub fn generate(&self) -> IfsResult<Generated> {
        let mut system = self.build()?;
        let hulls = self
            .hulls
            .as_ref()
            .map(|opts| system.calculate_hulls(opts))
            .transpose()?;
        let iterations = system.do_iterations();
        let mut drawing = Drawing::new(self.drawing_size);
        let plotted = system.plot(&mut drawing);
        Ok(Generated {
            system,
            hulls,
            iterations,
            drawing,
            plotted,
        })
    }
}

impl PieceDef {
    pub fn to_piece(&self) -> IfsResult<Piece> {
        let mut piece = Piece::new(
            self.fid.to_deferred(),
            self.vector.to_deferred(),
            self.matrix.to_deferred()?,
        );
        if self.reverse_progress {
            piece = piece.reversed();
        }
        if self.reset_progress {
            piece = piece.reset();
        }
        Ok(piece)
    }
}

impl FidDef {
    pub fn to_deferred(&self) -> Deferred<Fid> {
        match self {
            Self::One(fid) => Deferred::Static(*fid),
            Self::AnyOf(list) => generator::gen_fid_rand(list.clone()),
        }
    }
}

impl VectorDef {
    pub fn to_deferred(&self) -> Deferred<Vec2> {
        match *self {
            Self::Fixed(v) => Deferred::Static(v.into()),
            Self::Random { x_range, y_range } => {
                generator::gen_vect_rand((x_range[0], x_range[1]), (y_range[0], y_range[1]))
            }
        }
    }
}

impl MatrixDef {
    pub fn to_deferred(&self) -> IfsResult<Deferred<Matrix2>> {
        let m = match *self {
            Self::Identity => Matrix2::IDENTITY,
            Self::Scale { scale } => Matrix2::scale(scale),
            Self::Diag { x, y } => Matrix2::diag(x, y),
            Self::Rotate { degrees, scale } => Matrix2::rotate(degrees, scale),
            Self::ReflectX { scale } => Matrix2::reflect_x(scale),
            Self::ReflectY { scale } => Matrix2::reflect_y(scale),
            Self::Dihedral { sides, index, scale } => Matrix2::dihedral(sides, index, scale)?,
            Self::Entries { a, b, c, d } => Matrix2::new(a, b, c, d),
            Self::RandomCircle { scale, reflect } => {
                return Ok(generator::gen_mx_rand_circ(scale, reflect));
            }
            Self::RandomDihedral {
                sides,
                scale,
                reflect,
            } => return generator::gen_mx_rand_dihedral(sides, scale, reflect),
        };
        Ok(Deferred::Static(m))
    }
}

impl IterationDef {
    pub fn to_fn(&self) -> iteration::IterationFn {
        match *self {
            Self::Standard {
                min_diameter,
                max_iterations,
            } => iteration::standard(min_diameter, max_iterations),
            Self::Depth { max_iterations } => iteration::depth(max_iterations),
            Self::Stop => iteration::stop(),
            Self::Always => iteration::always(),
        }
    }
}

impl MetricDef {
    pub fn to_metric(self) -> Metric {
        match self {
            Self::MinEigenvalue => Metric::MinEigenvalue,
            Self::Rms => Metric::Rms,
            Self::XUnit => Metric::XUnit,
        }
    }
}

impl PropertyDef {
    pub fn to_fn(&self) -> property::TsfmFn {
        match *self {
            Self::Angle => property::angle(),
            Self::X => property::x(),
            Self::Y => property::y(),
            Self::XMinusY => property::x_minus_y(),
            Self::DistanceFrom { point } => property::distance_from(point.into()),
            Self::DistancePow { point, power } => property::distance_pow(point.into(), power),
            Self::Log2Size { metric } => property::log2_size(metric.to_metric()),
        }
    }
}

impl SortDef {
    pub fn to_sorter(&self) -> sort::PieceSorter {
        match self {
            Self::Random => sort::sort_randomly(),
            Self::Size => sort::sort_by_size(),
            Self::Distance {
                from,
                power,
                scale,
                jitter,
            } => sort::sort_by_distance((*from).into(), *power, *scale, *jitter),
            Self::Property { property, jitter } => sort::sort_by_tsfm(property.to_fn(), *jitter),
        }
    }
}

impl GeneratorDef {
    pub fn to_fn(&self) -> ChildrenFn {
        match self {
            Self::SmallSquares { fid, m, n } => {
                generator::gen_children_rand_small_squares(*fid, *m, *n)
            }
            Self::FadeOut(f) => generator::gen_children_fade_out((*f).into()),
            Self::VariableDragon { fid } => generator::gen_children_variable_dragon(*fid),
        }
    }
}

impl PlotDef {
    pub fn to_fn(&self) -> plot::PlotFn {
        match self {
            Self::Dot(opts) => plot::plot_dot(opts.clone()),
            Self::Path(opts) => plot::plot_path(opts.clone()),
        }
    }
}

impl ColourSpecDef {
    pub fn to_fn(&self) -> colour::ColourFn {
        fn rgba(list: &[ColourDef]) -> Vec<Rgba8> {
            list.iter().map(|c| c.0).collect()
        }

        match self {
            Self::Fixed { colour, alpha } => colour::colour_fixed(colour.0, *alpha),
            Self::Progress {
                colours,
                alpha,
                snap,
            } => colour::colour_by_progress(rgba(colours), *alpha, *snap),
            Self::Property {
                property,
                min,
                max,
                colours,
                alpha,
                snap,
            } => colour::colour_by_tsfm(*min, *max, rgba(colours), property.to_fn(), *alpha, *snap),
            Self::Log2Size {
                min,
                max,
                colours,
                metric,
                alpha,
                snap,
            } => colour::colour_by_log2_size(
                *min,
                *max,
                rgba(colours),
                metric.to_metric(),
                *alpha,
                *snap,
            ),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/build.rs"]
mod tests;
