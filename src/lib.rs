#![forbid(unsafe_code)]

pub mod canvas;
pub mod foundation;
pub mod fractal;
pub mod recipe;
pub mod render;
pub mod strategy;
pub mod transform;

pub use canvas::Canvas;
pub use canvas::drawing::{Drawing, Stroke, StrokeKind};
pub use foundation::core::{Fid, FractalRng, Point, Rgba8, Vec2, palette, seeded_rng};
pub use foundation::error::{IfsError, IfsResult};
pub use fractal::defn::FractalDefn;
pub use fractal::hull::{HullOpts, HullReport};
pub use fractal::piece::{ConcretePiece, Deferred, Piece, PieceState, Progress};
pub use fractal::system::{FractalSystem, IterationReport, RoundStats};
pub use recipe::{Generated, Recipe};
pub use render::{FrameRGBA, RasterOpts, rasterize, save_png};
pub use transform::affine::Transform;
pub use transform::matrix::Matrix2;
pub use transform::metric::Metric;
