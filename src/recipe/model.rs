use serde::{Deserialize, Serialize};

use crate::foundation::core::{Fid, Vec2};
use crate::foundation::error::{IfsError, IfsResult};
use crate::fractal::hull::HullOpts;
use crate::fractal::system::{
    DEFAULT_DRAWING_SIZE, DEFAULT_MAX_PIECES, DEFAULT_MAX_ROUNDS, MAX_DEFNS,
};
use crate::recipe::colour::ColourDef;
use crate::strategy::generator::FadeOut;
use crate::strategy::iteration::{DEFAULT_MAX_ITERATIONS, DEFAULT_MIN_DIAMETER};
use crate::strategy::plot::{DotOpts, PathOpts, Wobble};
use crate::transform::matrix::Matrix2;

/// A complete fractal system: definitions, seeds, caps and drawing rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub seed: u64,
    pub max_pieces: usize,
    pub max_rounds: usize,
    pub drawing_size: f64,
    /// Default predicate for definitions without their own.
    pub iteration: IterationDef,
    pub metric: MetricDef,
    /// Run the hull solver before iterating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hulls: Option<HullOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortDef>,
    pub initial: Vec<PieceDef>,
    pub definitions: Vec<DefinitionDef>,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: None,
            seed: 0,
            max_pieces: DEFAULT_MAX_PIECES,
            max_rounds: DEFAULT_MAX_ROUNDS,
            drawing_size: DEFAULT_DRAWING_SIZE,
            iteration: IterationDef::default(),
            metric: MetricDef::default(),
            hulls: None,
            sort: None,
            initial: Vec::new(),
            definitions: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2Def {
    pub x: f64,
    pub y: f64,
}

impl Vec2Def {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for Vec2Def {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl<'de> Deserialize<'de> for Vec2Def {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// Child fid: one index, or a uniform pick from a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FidDef {
    One(Fid),
    AnyOf(Vec<Fid>),
}

impl From<Fid> for FidDef {
    fn from(fid: Fid) -> Self {
        Self::One(fid)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorDef {
    Fixed(Vec2Def),
    Random { x_range: [f64; 2], y_range: [f64; 2] },
}

impl Default for VectorDef {
    fn default() -> Self {
        Self::Fixed(Vec2Def::default())
    }
}

impl From<Vec2> for VectorDef {
    fn from(v: Vec2) -> Self {
        Self::Fixed(v.into())
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatrixDef {
    #[default]
    Identity,
    Scale {
        scale: f64,
    },
    Diag {
        x: f64,
        y: f64,
    },
    /// Counter-clockwise rotation in degrees.
    Rotate {
        degrees: f64,
        #[serde(default = "one")]
        scale: f64,
    },
    ReflectX {
        #[serde(default = "one")]
        scale: f64,
    },
    ReflectY {
        #[serde(default = "one")]
        scale: f64,
    },
    Dihedral {
        sides: u32,
        index: u32,
        #[serde(default = "one")]
        scale: f64,
    },
    /// Row-major `[a b; c d]`.
    Entries {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
    },
    RandomCircle {
        scale: f64,
        #[serde(default)]
        reflect: bool,
    },
    RandomDihedral {
        sides: u32,
        scale: f64,
        #[serde(default)]
        reflect: bool,
    },
}

impl From<Matrix2> for MatrixDef {
    fn from(m: Matrix2) -> Self {
        Self::Entries {
            a: m.a,
            b: m.b,
            c: m.c,
            d: m.d,
        }
    }
}

/// A child of a definition, or an initial piece of the system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDef {
    pub fid: FidDef,
    #[serde(default)]
    pub vector: VectorDef,
    #[serde(default)]
    pub matrix: MatrixDef,
    #[serde(default)]
    pub reverse_progress: bool,
    #[serde(default)]
    pub reset_progress: bool,
}

impl PieceDef {
    pub fn new(
        fid: impl Into<FidDef>,
        vector: impl Into<VectorDef>,
        matrix: impl Into<MatrixDef>,
    ) -> Self {
        Self {
            fid: fid.into(),
            vector: vector.into(),
            matrix: matrix.into(),
            reverse_progress: false,
            reset_progress: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse_progress = true;
        self
    }

    pub fn reset(mut self) -> Self {
        self.reset_progress = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IterationDef {
    /// Expand while larger than `min_diameter` and shallower than `max_iterations`.
    Standard {
        min_diameter: f64,
        max_iterations: u32,
    },
    Depth {
        max_iterations: u32,
    },
    Stop,
    Always,
}

impl Default for IterationDef {
    fn default() -> Self {
        Self::Standard {
            min_diameter: DEFAULT_MIN_DIAMETER,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetricDef {
    #[default]
    MinEigenvalue,
    Rms,
    XUnit,
}

/// Scalar read off a piece transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyDef {
    /// Rotation angle of the matrix in degrees.
    Angle,
    X,
    Y,
    XMinusY,
    DistanceFrom {
        point: Vec2Def,
    },
    DistancePow {
        point: Vec2Def,
        power: f64,
    },
    Log2Size {
        #[serde(default)]
        metric: MetricDef,
    },
}

/// Draw order. Keys are sorted ascending, so smaller keys are drawn first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortDef {
    Random,
    /// Largest pieces first.
    Size,
    Distance {
        from: Vec2Def,
        #[serde(default = "one")]
        power: f64,
        #[serde(default = "one")]
        scale: f64,
        #[serde(default)]
        jitter: f64,
    },
    Property {
        property: PropertyDef,
        #[serde(default)]
        jitter: f64,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorDef {
    /// `m` random tiles out of an `n x n` split.
    SmallSquares { fid: Fid, m: usize, n: usize },
    FadeOut(FadeOutDef),
    /// Dragon variant whose fold height follows the parent's progress.
    VariableDragon { fid: Fid },
}

/// Mirror of [`FadeOut`] with recipe-friendly vectors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FadeOutDef {
    pub fid: Fid,
    pub n: usize,
    pub centre: Vec2Def,
    pub cutoff_diameter: f64,
    pub d1: f64,
    pub d2: f64,
    pub p1: f64,
    pub p2: f64,
}

impl From<FadeOutDef> for FadeOut {
    fn from(d: FadeOutDef) -> Self {
        FadeOut {
            fid: d.fid,
            n: d.n,
            centre: d.centre.into(),
            cutoff_diameter: d.cutoff_diameter,
            d1: d.d1,
            d2: d.d2,
            p1: d.p1,
            p2: d.p2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColourSpecDef {
    Fixed {
        colour: ColourDef,
        #[serde(default = "one")]
        alpha: f64,
    },
    Progress {
        colours: Vec<ColourDef>,
        #[serde(default = "one")]
        alpha: f64,
        #[serde(default)]
        snap: bool,
    },
    Property {
        property: PropertyDef,
        min: f64,
        max: f64,
        colours: Vec<ColourDef>,
        #[serde(default = "one")]
        alpha: f64,
        #[serde(default)]
        snap: bool,
    },
    Log2Size {
        min: f64,
        max: f64,
        colours: Vec<ColourDef>,
        #[serde(default)]
        metric: MetricDef,
        #[serde(default = "one")]
        alpha: f64,
        #[serde(default)]
        snap: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotDef {
    Dot(DotOpts),
    Path(PathOpts),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDef {
    pub plot: PlotDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<ColourSpecDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PieceDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<IterationDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricDef>,
    /// Manual relative diameter; wins over the hull-derived value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    pub draws: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerDef>,
}

impl Default for DefinitionDef {
    fn default() -> Self {
        Self {
            note: None,
            children: Vec::new(),
            generator: None,
            iteration: None,
            metric: None,
            diameter: None,
            draws: true,
            layers: Vec::new(),
        }
    }
}

impl Recipe {
    pub fn from_json(text: &str) -> IfsResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> IfsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fail fast on anything that would make [`Recipe::build`] misbehave.
    pub fn validate(&self) -> IfsResult<()> {
        let n = self.definitions.len();
        if n == 0 || n > MAX_DEFNS {
            return Err(IfsError::validation(format!(
                "recipe needs 1..={MAX_DEFNS} definitions, got {n}"
            )));
        }
        if self.max_pieces == 0 {
            return Err(IfsError::validation("max_pieces must be > 0"));
        }
        if self.max_rounds == 0 {
            return Err(IfsError::validation("max_rounds must be > 0"));
        }
        positive("drawing_size", self.drawing_size)?;
        self.iteration.validate("iteration")?;
        if let Some(h) = &self.hulls {
            h.validate()?;
        }
        if let Some(sort) = &self.sort {
            sort.validate()?;
        }

        for (i, piece) in self.initial.iter().enumerate() {
            piece.validate(n, &format!("initial piece {i}"))?;
        }
        for (fid, def) in self.definitions.iter().enumerate() {
            def.validate(n, fid)?;
        }
        Ok(())
    }
}

impl DefinitionDef {
    fn validate(&self, n: usize, fid: Fid) -> IfsResult<()> {
        let at = format!("definition {fid}");
        if self.generator.is_some() && !self.children.is_empty() {
            return Err(IfsError::validation(format!(
                "{at}: set either children or a generator, not both"
            )));
        }
        for (j, child) in self.children.iter().enumerate() {
            child.validate(n, &format!("{at} child {j}"))?;
        }
        if let Some(g) = &self.generator {
            g.validate(n, &at)?;
        }
        if let Some(it) = &self.iteration {
            it.validate(&at)?;
        }
        if let Some(d) = self.diameter {
            positive(&format!("{at} diameter"), d)?;
        }
        for (j, layer) in self.layers.iter().enumerate() {
            layer.validate(&format!("{at} layer {j}"))?;
        }
        Ok(())
    }
}

impl PieceDef {
    fn validate(&self, n: usize, at: &str) -> IfsResult<()> {
        self.fid.validate(n, at)?;
        match &self.vector {
            VectorDef::Fixed(v) => finite(&format!("{at} vector"), &[v.x, v.y])?,
            VectorDef::Random { x_range, y_range } => {
                range(&format!("{at} x_range"), *x_range)?;
                range(&format!("{at} y_range"), *y_range)?;
            }
        }
        self.matrix.validate(at)
    }
}

impl FidDef {
    fn validate(&self, n: usize, at: &str) -> IfsResult<()> {
        let fids: &[Fid] = match self {
            Self::One(fid) => std::slice::from_ref(fid),
            Self::AnyOf(list) if list.is_empty() => {
                return Err(IfsError::validation(format!("{at}: fid list is empty")));
            }
            Self::AnyOf(list) => list,
        };
        fid_in_range(fids, n, at)
    }
}

impl MatrixDef {
    fn validate(&self, at: &str) -> IfsResult<()> {
        let at = format!("{at} matrix");
        match *self {
            Self::Identity => Ok(()),
            Self::Scale { scale }
            | Self::ReflectX { scale }
            | Self::ReflectY { scale }
            | Self::RandomCircle { scale, .. } => finite(&at, &[scale]),
            Self::Diag { x, y } => finite(&at, &[x, y]),
            Self::Rotate { degrees, scale } => finite(&at, &[degrees, scale]),
            Self::Entries { a, b, c, d } => finite(&at, &[a, b, c, d]),
            Self::Dihedral { sides, index, scale } => {
                finite(&at, &[scale])?;
                Matrix2::dihedral(sides, index, scale)
                    .map(|_| ())
                    .map_err(|e| IfsError::validation(format!("{at}: {e}")))
            }
            Self::RandomDihedral { sides, scale, .. } => {
                finite(&at, &[scale])?;
                Matrix2::dihedral(sides, 1, scale)
                    .map(|_| ())
                    .map_err(|e| IfsError::validation(format!("{at}: {e}")))
            }
        }
    }
}

impl IterationDef {
    fn validate(&self, at: &str) -> IfsResult<()> {
        match *self {
            Self::Standard { min_diameter, .. } => {
                finite(&format!("{at} min_diameter"), &[min_diameter])
            }
            Self::Depth { .. } | Self::Stop | Self::Always => Ok(()),
        }
    }
}

impl PropertyDef {
    fn validate(&self, at: &str) -> IfsResult<()> {
        match self {
            Self::DistanceFrom { point } => finite(at, &[point.x, point.y]),
            Self::DistancePow { point, power } => finite(at, &[point.x, point.y, *power]),
            Self::Angle | Self::X | Self::Y | Self::XMinusY | Self::Log2Size { .. } => Ok(()),
        }
    }
}

impl SortDef {
    fn validate(&self) -> IfsResult<()> {
        match self {
            Self::Random | Self::Size => Ok(()),
            Self::Distance {
                from,
                power,
                scale,
                jitter,
            } => {
                finite("sort", &[from.x, from.y, *power, *jitter])?;
                if *scale == 0.0 || !scale.is_finite() {
                    return Err(IfsError::validation("sort scale must be finite and non-zero"));
                }
                Ok(())
            }
            Self::Property { property, jitter } => {
                property.validate("sort property")?;
                finite("sort jitter", &[*jitter])
            }
        }
    }
}

impl GeneratorDef {
    fn validate(&self, n: usize, at: &str) -> IfsResult<()> {
        let at = format!("{at} generator");
        match self {
            Self::SmallSquares { fid, m, n: tiles } => {
                fid_in_range(&[*fid], n, &at)?;
                if *tiles == 0 || *m > tiles * tiles {
                    return Err(IfsError::validation(format!(
                        "{at}: need n > 0 and m <= n*n, got m={m} n={tiles}"
                    )));
                }
                Ok(())
            }
            Self::FadeOut(f) => {
                fid_in_range(&[f.fid], n, &at)?;
                if f.n == 0 {
                    return Err(IfsError::validation(format!("{at}: n must be > 0")));
                }
                finite(
                    &at,
                    &[f.centre.x, f.centre.y, f.cutoff_diameter, f.d1, f.d2, f.p1, f.p2],
                )
            }
            Self::VariableDragon { fid } => fid_in_range(&[*fid], n, &at),
        }
    }
}

impl LayerDef {
    fn validate(&self, at: &str) -> IfsResult<()> {
        match &self.plot {
            PlotDef::Dot(d) => {
                finite(at, &[d.expand_factor])?;
                wobble(at, d.wobble)?;
                if let Some(o) = d.offset {
                    finite(at, &[o.x, o.y])?;
                }
            }
            PlotDef::Path(p) => {
                finite(at, &[p.width, p.expand_factor])?;
                if p.width < 0.0 {
                    return Err(IfsError::validation(format!("{at}: width must be >= 0")));
                }
                wobble(at, p.wobble)?;
                if let Some(points) = &p.points {
                    if points.is_empty() {
                        return Err(IfsError::validation(format!("{at}: path points are empty")));
                    }
                    if points.iter().any(|v| !v.is_finite()) {
                        return Err(IfsError::validation(format!(
                            "{at}: path points must be finite"
                        )));
                    }
                }
            }
        }
        if let Some(colour) = &self.colour {
            colour.validate(at)?;
        }
        Ok(())
    }
}

impl ColourSpecDef {
    fn validate(&self, at: &str) -> IfsResult<()> {
        let at = format!("{at} colour");
        let (colours, alpha): (&[ColourDef], f64) = match self {
            Self::Fixed { alpha, .. } => (&[], *alpha),
            Self::Progress { colours, alpha, .. } => (colours, *alpha),
            Self::Property {
                property,
                min,
                max,
                colours,
                alpha,
                ..
            } => {
                property.validate(&at)?;
                finite(&at, &[*min, *max])?;
                (colours, *alpha)
            }
            Self::Log2Size {
                min,
                max,
                colours,
                alpha,
                ..
            } => {
                finite(&at, &[*min, *max])?;
                (colours, *alpha)
            }
        };
        if !matches!(self, Self::Fixed { .. }) && colours.is_empty() {
            return Err(IfsError::validation(format!("{at}: colour list is empty")));
        }
        finite(&format!("{at} alpha"), &[alpha])
    }
}

fn fid_in_range(fids: &[Fid], n: usize, at: &str) -> IfsResult<()> {
    match fids.iter().find(|&&f| f >= n) {
        Some(bad) => Err(IfsError::validation(format!(
            "{at}: fid {bad} out of range (system has {n} definitions)"
        ))),
        None => Ok(()),
    }
}

fn finite(at: &str, values: &[f64]) -> IfsResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(IfsError::validation(format!("{at}: values must be finite")))
    }
}

fn positive(at: &str, v: f64) -> IfsResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(IfsError::validation(format!("{at} must be finite and > 0, got {v}")))
    }
}

fn range(at: &str, [lo, hi]: [f64; 2]) -> IfsResult<()> {
    finite(at, &[lo, hi])?;
    if lo > hi {
        return Err(IfsError::validation(format!("{at}: min {lo} exceeds max {hi}")));
    }
    Ok(())
}

fn wobble(at: &str, w: Option<Wobble>) -> IfsResult<()> {
    match w {
        Some(w) if !(w.pixels.is_finite() && w.pixels >= 0.0) => Err(IfsError::validation(
            format!("{at}: wobble pixels must be finite and >= 0"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/model.rs"]
mod tests;
